//! Physicists' Hermite polynomials *H*ₙ(*x*).
//!
//! Values are computed with the three-term recurrence
//! ```text
//! H₀(x) = 1
//! H₁(x) = 2 x
//! Hₖ₊₁(x) = 2 x Hₖ(x) - 2 k Hₖ₋₁(x)
//! ```
//! which costs *O*(*n*) per point and never forms the (badly cancelling)
//! expanded coefficients.
//!
//! ```
//! use hermfn::hermite::hermite;
//!
//! assert_eq!(hermite(0, 0.0).unwrap(), 1.0);
//! assert_eq!(hermite(2, 0.0).unwrap(), -2.0);
//! assert_eq!(hermite(2, 1.0).unwrap(), 2.0);
//! assert!(hermite(-1, 0.0).is_err());
//! ```

use std::f64::consts::LN_2;
use ndarray as nd;
use crate::{
    Arr1,
    HResult,
    error::HermError,
    order::{ IntoOrder, Order },
};

// renormalize the recurrence once magnitudes pass 2¹²⁸
const RESCALE_ABOVE: f64 = 3.402823669209385e38;

/// A Hermite polynomial value stored as `mantissa × 2^exp2`.
///
/// Produced by [`hermite_scaled`]; the representation cannot overflow for any
/// order or finite argument of moderate size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Scaled {
    /// Scaled value.
    pub mantissa: f64,
    /// Binary exponent applied to `mantissa`.
    pub exp2: i64,
}

impl Scaled {
    /// Natural logarithm of the magnitude of the represented value.
    ///
    /// Returns `-inf` for an exact zero.
    pub fn ln_abs(&self) -> f64 {
        self.mantissa.abs().ln() + self.exp2 as f64 * LN_2
    }

    /// Sign of the represented value (`0.0` for an exact zero).
    pub fn signum(&self) -> f64 {
        if self.mantissa == 0.0 { 0.0 } else { self.mantissa.signum() }
    }

    /// Collapse to a plain `f64`, which may overflow to infinity.
    pub fn value(&self) -> f64 {
        if self.mantissa == 0.0 || self.exp2 == 0 { return self.mantissa; }
        match i32::try_from(self.exp2) {
            Ok(e) if e <= f64::MAX_EXP => self.mantissa * 2.0_f64.powi(e),
            _ => self.signum() * f64::INFINITY,
        }
    }
}

/// Evaluate *H*ₙ(*x*) with exact power-of-two renormalization of the
/// recurrence.
pub fn hermite_scaled(n: Order, x: f64) -> Scaled {
    let n = n.get();
    if n == 0 { return Scaled { mantissa: 1.0, exp2: 0 }; }
    let mut h0: f64 = 1.0;
    let mut h1: f64 = 2.0 * x;
    let mut exp2: i64 = 0;
    let mut h2: f64;
    for k in 1..n {
        h2 = 2.0 * x * h1 - 2.0 * k as f64 * h0;
        h0 = h1;
        h1 = h2;
        let big = h0.abs().max(h1.abs());
        if big > RESCALE_ABOVE && big.is_finite() {
            let e = big.log2().floor() as i32;
            let scale = 2.0_f64.powi(-e);
            h0 *= scale;
            h1 *= scale;
            exp2 += i64::from(e);
        }
    }
    Scaled { mantissa: h1, exp2 }
}

/// Evaluate *H*ₙ(*x*).
///
/// Fails with [`HermError::InvalidOrder`] for negative or non-integer `n` and
/// with [`HermError::Overflow`] if the value is not representable as a finite
/// `f64` for finite `x`. At `x = ±∞` the leading term dominates, giving
/// (±1)ⁿ·∞ for `n > 0`.
pub fn hermite<N>(n: N, x: f64) -> HResult<f64>
where N: IntoOrder
{
    let n = n.into_order()?;
    hermite_value(n, x)
}

fn hermite_value(n: Order, x: f64) -> HResult<f64> {
    if x.is_infinite() && n.get() > 0 {
        let sign = if n.get() % 2 == 0 { 1.0 } else { x.signum() };
        return Ok(sign * f64::INFINITY);
    }
    let h = hermite_scaled(n, x).value();
    if x.is_finite() && !h.is_finite() {
        Err(HermError::Overflow { n: n.get(), x })
    } else {
        Ok(h)
    }
}

/// Evaluate *H*ₙ(*x*) element-wise over an array.
///
/// Fails under the same conditions as [`hermite`]; the first overflowing
/// element aborts the evaluation.
pub fn hermite_arr<N, S>(n: N, x: &Arr1<S>) -> HResult<nd::Array1<f64>>
where
    N: IntoOrder,
    S: nd::Data<Elem = f64>,
{
    let n = n.into_order()?;
    x.iter().map(|&xk| hermite_value(n, xk)).collect()
}

/// Return the coefficients of *H*ₙ in ascending powers of *x*.
///
/// Built from the coefficient form of the recurrence,
/// `c[n + 1][k] = 2 c[n][k - 1] - 2 n c[n - 1][k]`. Coefficients grow like
/// 2ⁿ; fails with [`HermError::Overflow`] once one of them is no longer finite.
pub fn hermite_coeffs<N>(n: N) -> HResult<Vec<f64>>
where N: IntoOrder
{
    let n = n.into_order()?.get();
    let mut c0: Vec<f64> = vec![1.0];
    if n == 0 { return Ok(c0); }
    let mut c1: Vec<f64> = vec![0.0, 2.0];
    for k in 1..n {
        let mut c2: Vec<f64> = vec![0.0; k + 2];
        c1.iter().enumerate()
            .for_each(|(j, cj)| { c2[j + 1] += 2.0 * cj; });
        c0.iter().enumerate()
            .for_each(|(j, cj)| { c2[j] -= 2.0 * k as f64 * cj; });
        if c2.iter().any(|c| !c.is_finite()) {
            return Err(HermError::Overflow { n, x: f64::NAN });
        }
        c0 = c1;
        c1 = c2;
    }
    Ok(c1)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use super::*;

    #[test]
    fn values_at_zero() {
        let expected = [1.0, 0.0, -2.0, 0.0, 12.0, 0.0, -120.0];
        for (n, h) in expected.into_iter().enumerate() {
            assert_eq!(hermite(n, 0.0).unwrap(), h, "n = {n}");
        }
    }

    #[test]
    fn known_values() {
        // H₂(x) = 4x² - 2
        assert_eq!(hermite(2, 1.0).unwrap(), 2.0);
        assert!(hermite(2, 0.5_f64.sqrt()).unwrap().abs() < 1e-15);
        assert_eq!(hermite(1, 1.5).unwrap(), 3.0);
        // H₃(x) = 8x³ - 12x
        assert_relative_eq!(hermite(3, 2.0).unwrap(), 40.0);
        // H₄(x) = 16x⁴ - 48x² + 12
        assert_relative_eq!(hermite(4, 0.5).unwrap(), 1.0 - 12.0 + 12.0);
    }

    #[test]
    fn invalid_orders() {
        assert!(hermite(-1, 0.3).unwrap_err().is_invalid_order());
        assert!(hermite(2.5, 0.3).unwrap_err().is_invalid_order());
        assert!(hermite_arr(-1, &nd::array![0.0]).is_err());
    }

    #[test]
    fn coefficients_match_recurrence() {
        assert_eq!(hermite_coeffs(0).unwrap(), vec![1.0]);
        assert_eq!(hermite_coeffs(3).unwrap(), vec![0.0, -12.0, 0.0, 8.0]);
        assert_eq!(
            hermite_coeffs(4).unwrap(), vec![12.0, 0.0, -48.0, 0.0, 16.0]);
        let c = hermite_coeffs(6).unwrap();
        let x: f64 = 0.7;
        let poly: f64
            = c.iter().rev().fold(0.0, |acc, ck| acc * x + ck);
        assert_relative_eq!(poly, hermite(6, x).unwrap(), max_relative = 1e-12);
    }

    fn naive(n: usize, x: f64) -> f64 {
        (1..n).fold((1.0, 2.0 * x), |(h0, h1), k| {
            (h1, 2.0 * x * h1 - 2.0 * k as f64 * h0)
        }).1
    }

    #[test]
    fn scaled_matches_plain_where_representable() {
        let x = 3.1;
        let plain = naive(60, x);
        let scaled = hermite_scaled(Order(60), x);
        assert_relative_eq!(scaled.value(), plain, max_relative = 1e-12);
    }

    #[test]
    fn scaled_survives_large_orders() {
        let s = hermite_scaled(Order(2000), 10.0);
        assert!(s.ln_abs().is_finite());
        assert!(s.exp2 > 0);
        assert!(hermite(2000, 10.0).unwrap_err().to_string().contains("overflows"));
    }

    #[test]
    fn infinite_argument() {
        assert_eq!(hermite(0, f64::INFINITY).unwrap(), 1.0);
        assert_eq!(hermite(1, f64::NEG_INFINITY).unwrap(), f64::NEG_INFINITY);
        assert_eq!(hermite(3, f64::INFINITY).unwrap(), f64::INFINITY);
        assert_eq!(hermite(5, f64::NEG_INFINITY).unwrap(), f64::NEG_INFINITY);
        assert_eq!(hermite(4, f64::NEG_INFINITY).unwrap(), f64::INFINITY);
        assert!(hermite(3, f64::NAN).unwrap().is_nan());
    }

    #[test]
    fn array_evaluation() {
        let x = nd::array![-1.0, 0.0, 1.0];
        let h = hermite_arr(2, &x).unwrap();
        assert_eq!(h, nd::array![2.0, -2.0, 2.0]);
    }
}
