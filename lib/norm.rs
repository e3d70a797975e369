//! Normalization constants of the Hermite functions,
//! ```text
//! N(n) = 1 / √(2ⁿ n! √π)
//! ```
//!
//! Everything is computed in the log domain. `ln n!` is the exact sum of
//! `ln k`, so no intermediate factorial is ever formed and [`ln_normalization`]
//! is finite for every order. The plain constant [`normalization`] first drops
//! below the smallest normal `f64` at `n = 268`; orders up to
//! [`MAX_NORMALIZABLE_ORDER`] return a strictly positive value.
//!
//! ```
//! use hermfn::norm::normalization;
//!
//! let n0 = normalization(0).unwrap();
//! assert!((n0 - std::f64::consts::PI.powf(-0.25)).abs() < 1e-15);
//! assert!(normalization(2.5).is_err());
//! ```

use std::f64::consts::{ LN_2, PI };
use crate::{
    HResult,
    error::HermError,
    order::{ IntoOrder, Order },
};

/// Largest order whose normalization constant is a normal (non-subnormal)
/// `f64`.
pub const MAX_NORMALIZABLE_ORDER: usize = 267;

/// Return `ln n!` as the sum `ln 2 + ln 3 + ... + ln n`.
pub fn ln_factorial(n: Order) -> f64 {
    (2..=n.get()).map(|k| (k as f64).ln()).sum()
}

pub(crate) fn ln_norm(n: Order) -> f64 {
    -0.5 * (n.get() as f64 * LN_2 + ln_factorial(n) + 0.5 * PI.ln())
}

/// Return `ln N(n)`.
pub fn ln_normalization<N>(n: N) -> HResult<f64>
where N: IntoOrder
{
    n.into_order().map(ln_norm)
}

/// Return `N(n)`.
///
/// Fails with [`HermError::InvalidOrder`] for negative or non-integer `n` and
/// with [`HermError::Underflow`] for `n > MAX_NORMALIZABLE_ORDER`.
pub fn normalization<N>(n: N) -> HResult<f64>
where N: IntoOrder
{
    let n = n.into_order()?;
    let c = ln_norm(n).exp();
    c.is_normal().then_some(c).ok_or(HermError::Underflow(n.get()))
}
