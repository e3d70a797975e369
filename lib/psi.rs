//! Harmonic oscillator eigenfunctions (Hermite functions)
//! ```text
//! ψₙ(x) = N(n) Hₙ(x) exp(-x² / 2)
//! ```
//! in units where the oscillator length is 1.
//!
//! Both evaluation methods carry the polynomial part with a separate binary
//! exponent and only combine it with `ln N(n)` and `-x²/2` at the very end, so
//! no intermediate overflows for any order. Values underflow to exactly `0.0`
//! far outside the classically allowed region `|x| < √(2n + 1)`; this is
//! expected and not an error.
//!
//! ```
//! use hermfn::psi::psi;
//!
//! let psi0 = psi(0, 0.0).unwrap();
//! assert!((psi0 - 0.7511255444649425).abs() < 1e-9);
//! assert_eq!(psi(3, 1.2).unwrap(), -psi(3, -1.2).unwrap());
//! assert!(psi(2.5, 0.0).is_err());
//! ```

use std::f64::consts::{ LN_2, PI, SQRT_2 };
use ndarray as nd;
use crate::{
    Arr1,
    HResult,
    hermite::hermite_scaled,
    norm::ln_norm,
    order::{ IntoOrder, Order },
};

// same renormalization threshold as the polynomial recurrence, 2¹²⁸
const RESCALE_ABOVE: f64 = 3.402823669209385e38;

/// Evaluation method selector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Method {
    /// Compose `N(n)`, `Hₙ(x)` and the Gaussian envelope.
    #[default]
    Direct,
    /// Use the normalized three-term recurrence
    /// ```text
    /// ψ₀(x) = π^(-1/4) exp(-x²/2)
    /// ψ₁(x) = √2 x ψ₀(x)
    /// ψₖ₊₁(x) = √(2/(k+1)) x ψₖ(x) - √(k/(k+1)) ψₖ₋₁(x)
    /// ```
    Recurrence,
}

/// A single eigenfunction with its normalization precomputed.
///
/// Constructing one validates the order once; [`Self::eval`] is then
/// infallible, which makes it suitable as a quadrature integrand.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Eigenfunction {
    n: Order,
    ln_norm: f64,
    method: Method,
}

impl Eigenfunction {
    /// Create a new `Eigenfunction` of order `n` using [`Method::Direct`].
    pub fn new<N>(n: N) -> HResult<Self>
    where N: IntoOrder
    {
        Self::with_method(n, Method::Direct)
    }

    /// Create a new `Eigenfunction` of order `n` with a particular evaluation
    /// method.
    pub fn with_method<N>(n: N, method: Method) -> HResult<Self>
    where N: IntoOrder
    {
        let n = n.into_order()?;
        Ok(Self { n, ln_norm: ln_norm(n), method })
    }

    /// Get the order.
    pub fn order(&self) -> Order { self.n }

    /// Get the evaluation method.
    pub fn method(&self) -> Method { self.method }

    /// Get `ln N(n)`.
    pub fn ln_norm(&self) -> f64 { self.ln_norm }

    /// Energy of the state in units of ħω.
    pub fn energy(&self) -> f64 { energy(self.n) }

    /// Evaluate ψₙ(x).
    ///
    /// Returns `0.0` for infinite `x` and propagates NaN.
    pub fn eval(&self, x: f64) -> f64 {
        if x.is_nan() { return f64::NAN; }
        if x.is_infinite() { return 0.0; }
        let gauss = -0.5 * x * x;
        if gauss == f64::NEG_INFINITY { return 0.0; }
        match self.method {
            Method::Direct => self.eval_direct(x, gauss),
            Method::Recurrence => self.eval_recurrence(x, gauss),
        }
    }

    fn eval_direct(&self, x: f64, gauss: f64) -> f64 {
        let h = hermite_scaled(self.n, x);
        let ln_h = h.ln_abs();
        if !ln_h.is_finite() { return 0.0; }
        h.signum() * (ln_h + self.ln_norm + gauss).exp()
    }

    fn eval_recurrence(&self, x: f64, gauss: f64) -> f64 {
        // ψ₀ is carried as exp(ln0) and factored out of the recurrence
        let ln0 = gauss - 0.25 * PI.ln();
        let n = self.n.get();
        let mut p0: f64 = 1.0;
        if n == 0 { return ln0.exp(); }
        let mut p1: f64 = SQRT_2 * x;
        let mut p2: f64;
        let mut exp2: i64 = 0;
        for k in 1..n {
            let kf = k as f64;
            p2 = (2.0 / (kf + 1.0)).sqrt() * x * p1
                - (kf / (kf + 1.0)).sqrt() * p0;
            p0 = p1;
            p1 = p2;
            let big = p0.abs().max(p1.abs());
            if big > RESCALE_ABOVE && big.is_finite() {
                let e = big.log2().floor() as i32;
                let scale = 2.0_f64.powi(-e);
                p0 *= scale;
                p1 *= scale;
                exp2 += i64::from(e);
            }
        }
        if p1 == 0.0 || !p1.is_finite() { return 0.0; }
        p1.signum() * (p1.abs().ln() + exp2 as f64 * LN_2 + ln0).exp()
    }

    /// Evaluate ψₙ(x)².
    pub fn density(&self, x: f64) -> f64 { self.eval(x).powi(2) }

    /// Evaluate ψₙ element-wise over an array.
    pub fn eval_arr<S>(&self, x: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        x.mapv(|xk| self.eval(xk))
    }

    /// Evaluate ψₙ² element-wise over an array.
    pub fn density_arr<S>(&self, x: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        x.mapv(|xk| self.density(xk))
    }
}

/// Energy of the `n`-th state in units of ħω, `n + 1/2`.
pub fn energy(n: Order) -> f64 { n.get() as f64 + 0.5 }

/// Evaluate ψₙ(x).
///
/// Fails with [`HermError::InvalidOrder`][crate::error::HermError::InvalidOrder]
/// for negative or non-integer `n`.
pub fn psi<N>(n: N, x: f64) -> HResult<f64>
where N: IntoOrder
{
    Eigenfunction::new(n).map(|f| f.eval(x))
}

/// Like [`psi`], but with a particular evaluation method.
pub fn psi_with<N>(n: N, x: f64, method: Method) -> HResult<f64>
where N: IntoOrder
{
    Eigenfunction::with_method(n, method).map(|f| f.eval(x))
}

/// Evaluate ψₙ element-wise over an array.
pub fn psi_arr<N, S>(n: N, x: &Arr1<S>) -> HResult<nd::Array1<f64>>
where
    N: IntoOrder,
    S: nd::Data<Elem = f64>,
{
    Eigenfunction::new(n).map(|f| f.eval_arr(x))
}

/// Evaluate the probability density ψₙ(x)².
pub fn density<N>(n: N, x: f64) -> HResult<f64>
where N: IntoOrder
{
    Eigenfunction::new(n).map(|f| f.density(x))
}

/// Evaluate the probability density ψₙ² element-wise over an array.
pub fn density_arr<N, S>(n: N, x: &Arr1<S>) -> HResult<nd::Array1<f64>>
where
    N: IntoOrder,
    S: nd::Data<Elem = f64>,
{
    Eigenfunction::new(n).map(|f| f.density_arr(x))
}
