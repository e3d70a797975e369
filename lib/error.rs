//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned when a coordinate grid is too short or not strictly increasing.
#[derive(Debug, Error)]
pub enum GridError {
    /// Fewer than two points were requested or supplied.
    #[error("coordinate grids must have at least 2 points; got {0}")]
    TooShort(usize),

    /// Grid bounds are not finite, not in increasing order, or span more than
    /// `f64::MAX`.
    #[error("grid bounds must be finite with start < end; got ({0}, {1})")]
    BadBounds(f64, f64),
}

impl GridError {
    pub(crate) fn check_len(n: usize) -> Result<(), Self> {
        (n >= 2).then_some(()).ok_or(Self::TooShort(n))
    }

    pub(crate) fn check_bounds(a: f64, b: f64) -> Result<(), Self> {
        (a.is_finite() && b.is_finite() && a < b && (b - a).is_finite())
            .then_some(())
            .ok_or(Self::BadBounds(a, b))
    }
}

/// Returned from the adaptive integrators in [`quad`][crate::quad].
#[derive(Debug, Error)]
pub enum QuadError {
    /// Returned when a tolerance is negative, NaN, or when both absolute and
    /// relative tolerances are zero.
    #[error("tolerances must be non-negative and not both zero; got epsabs = {0}, epsrel = {1}")]
    BadEpsilon(f64, f64),

    /// Returned when the subinterval limit is zero.
    #[error("subinterval limit must be greater than 0; got {0}")]
    BadLimit(usize),

    /// Returned when the error ceiling is not positive.
    #[error("error ceiling must be greater than 0; got {0}")]
    BadCeiling(f64),

    /// Returned when finite integration bounds are NaN or infinite.
    #[error("integration bounds must be finite; got ({0}, {1})")]
    BadDomain(f64, f64),

    /// Returned when the integrand produces a non-finite value.
    #[error("integrand returned a non-finite value at x = {0}")]
    NonFinite(f64),

    /// Returned when the final error estimate is above the configured ceiling.
    #[error("quadrature did not converge: error estimate {abserr:.3e} exceeds ceiling {ceiling:.3e}")]
    DidNotConverge {
        /// Estimated absolute error of the returned value.
        abserr: f64,
        /// Configured ceiling.
        ceiling: f64,
    },
}

impl QuadError {
    pub(crate) fn check_epsilon(epsabs: f64, epsrel: f64) -> Result<(), Self> {
        (epsabs >= 0.0 && epsrel >= 0.0 && (epsabs > 0.0 || epsrel > 0.0))
            .then_some(())
            .ok_or(Self::BadEpsilon(epsabs, epsrel))
    }

    pub(crate) fn check_limit(limit: usize) -> Result<(), Self> {
        (limit != 0).then_some(()).ok_or(Self::BadLimit(limit))
    }

    pub(crate) fn check_ceiling(ceiling: f64) -> Result<(), Self> {
        (ceiling > 0.0).then_some(()).ok_or(Self::BadCeiling(ceiling))
    }

    /// Return `true` if `self` is `DidNotConverge`.
    pub fn is_did_not_converge(&self) -> bool {
        matches!(self, Self::DidNotConverge { .. })
    }
}

/// Returned from Hermite polynomial, normalization and eigenfunction
/// evaluation and from orthonormality verification.
#[derive(Debug, Error)]
pub enum HermError {
    /// Returned when an order is negative or not an integer.
    #[error("orders must be non-negative integers; got {0}")]
    InvalidOrder(f64),

    /// Returned when a result cannot be represented as a finite `f64`.
    #[error("value of order {n} at x = {x} overflows f64")]
    Overflow {
        /// Order.
        n: usize,
        /// Evaluation point.
        x: f64,
    },

    /// Returned when a normalization constant falls below the smallest normal
    /// `f64`.
    #[error("normalization constant of order {0} underflows f64; use the log-domain value")]
    Underflow(usize),

    /// Returned when a physical parameter is not a finite, positive number.
    #[error("{0} must be finite and greater than 0; got {1}")]
    NonPositive(&'static str, f64),

    /// [`QuadError`]
    #[error("quadrature error: {0}")]
    Quadrature(#[from] QuadError),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),

    /// [`GridError`]
    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}

impl HermError {
    pub(crate) fn check_positive(name: &'static str, val: f64)
        -> Result<(), Self>
    {
        (val.is_finite() && val > 0.0)
            .then_some(())
            .ok_or(Self::NonPositive(name, val))
    }

    /// Return `true` if `self` is `InvalidOrder`.
    pub fn is_invalid_order(&self) -> bool {
        matches!(self, Self::InvalidOrder(..))
    }

    /// Return `true` if `self` wraps [`QuadError::DidNotConverge`].
    pub fn is_did_not_converge(&self) -> bool {
        matches!(self, Self::Quadrature(err) if err.is_did_not_converge())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_check() {
        let a = nd::Array1::<f64>::zeros(3);
        let b = nd::Array1::<f64>::zeros(4);
        assert!(LengthError::check(&a, &a).is_ok());
        let err = LengthError::check(&a, &b).unwrap_err();
        assert_eq!((err.0, err.1), (3, 4));
    }

    #[test]
    fn quad_validators() {
        assert!(QuadError::check_epsilon(1e-8, 0.0).is_ok());
        assert!(QuadError::check_epsilon(0.0, 0.0).is_err());
        assert!(QuadError::check_epsilon(-1.0, 1e-8).is_err());
        assert!(QuadError::check_epsilon(f64::NAN, 1e-8).is_err());
        assert!(QuadError::check_limit(0).is_err());
        assert!(QuadError::check_ceiling(0.0).is_err());
    }

    #[test]
    fn grid_bounds() {
        assert!(GridError::check_bounds(-1.0, 1.0).is_ok());
        assert!(GridError::check_bounds(1.0, 1.0).is_err());
        assert!(GridError::check_bounds(0.0, f64::INFINITY).is_err());
        assert!(GridError::check_bounds(-1e308, 1.7e308).is_err());
    }

    #[test]
    fn did_not_converge_is_detectable_through_wrapper() {
        let err: HermError
            = QuadError::DidNotConverge { abserr: 1.0, ceiling: 1e-6 }.into();
        assert!(err.is_did_not_converge());
        assert!(!err.is_invalid_order());
    }
}
