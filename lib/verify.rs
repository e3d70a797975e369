//! Orthonormality verification,
//! ```text
//!           ∞
//! I(n, m) = ∫ ψₙ(x) ψₘ(x) dx = δ(n, m)
//!          -∞
//! ```
//!
//! Overlaps are integrated over the whole real line with
//! [`quad::integrate`][crate::quad::integrate], never over a truncated window.
//! The quadrature error estimate travels with every result, and an estimate
//! above the configured ceiling surfaces as
//! [`QuadError::DidNotConverge`][crate::error::QuadError::DidNotConverge]
//! instead of a number.
//!
//! ```
//! use hermfn::{ quad::QuadConfig, verify::overlap };
//!
//! let cfg = QuadConfig::default();
//! let ov = overlap(2, 2, &cfg).unwrap();
//! assert!(ov.matches());
//! assert!((ov.integral - 1.0).abs() < 1e-5);
//! let ov = overlap(0, 2, &cfg).unwrap();
//! assert!(ov.integral.abs() < 1e-5);
//! ```

use std::fmt;
use log::{ debug, warn };
use ndarray as nd;
use crate::{
    HResult,
    order::{ IntoOrder, Order },
    psi::Eigenfunction,
    quad::{ self, Domain, QuadConfig },
};

/// Absolute tolerance for comparing an overlap integral against δ(n, m).
pub const OVERLAP_TOLERANCE: f64 = 1e-5;

/// Kronecker delta δ(n, m).
pub fn kronecker(n: Order, m: Order) -> f64 { if n == m { 1.0 } else { 0.0 } }

/// A single overlap integral.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Overlap {
    /// First order.
    pub n: Order,
    /// Second order.
    pub m: Order,
    /// Computed value of the integral.
    pub integral: f64,
    /// Quadrature error estimate of `integral`.
    pub abserr: f64,
    /// Number of integrand evaluations used.
    pub neval: usize,
}

impl Overlap {
    /// Expected value δ(n, m).
    pub fn expected(&self) -> f64 { kronecker(self.n, self.m) }

    /// Absolute difference from the expected value.
    pub fn deviation(&self) -> f64 { (self.integral - self.expected()).abs() }

    /// Return `true` if the integral is within [`OVERLAP_TOLERANCE`] of
    /// δ(n, m).
    pub fn matches(&self) -> bool { self.deviation() < OVERLAP_TOLERANCE }
}

/// Compute the overlap of ψₙ and ψₘ over the real line.
///
/// Fails with [`HermError::InvalidOrder`][crate::error::HermError::InvalidOrder]
/// for a bad order and with a wrapped
/// [`QuadError`][crate::error::QuadError] if integration fails, including
/// when the error estimate exceeds `cfg.err_ceiling`.
pub fn overlap<N, M>(n: N, m: M, cfg: &QuadConfig) -> HResult<Overlap>
where
    N: IntoOrder,
    M: IntoOrder,
{
    let psi_n = Eigenfunction::new(n)?;
    let psi_m = Eigenfunction::new(m)?;
    let est = quad::integrate(
        |x| psi_n.eval(x) * psi_m.eval(x), Domain::Full, cfg)?;
    debug!(
        "verify::overlap: ({}, {}) = {:.12} +/- {:.1e} ({} evaluations)",
        psi_n.order(), psi_m.order(), est.value, est.abserr, est.neval,
    );
    Ok(Overlap {
        n: psi_n.order(),
        m: psi_m.order(),
        integral: est.value,
        abserr: est.abserr,
        neval: est.neval,
    })
}

/// One row of an orthonormality report.
///
/// Failures are kept in the row so that a report can skip them without
/// aborting.
#[derive(Debug)]
pub struct Row {
    /// First order.
    pub n: Order,
    /// Second order.
    pub m: Order,
    /// Outcome of the overlap integral.
    pub result: HResult<Overlap>,
}

impl Row {
    /// Return `true` if the overlap was computed and matches δ(n, m).
    pub fn passed(&self) -> bool {
        self.result.as_ref().is_ok_and(|ov| ov.matches())
    }
}

/// Column headings matching the [`Display`][fmt::Display] form of [`Row`].
pub const TABLE_HEADER: &str = " n | m |  Integral | Expected\n---|---|-----------|---------";

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(ov) => {
                let mark = if ov.matches() { "✓" } else { "✗" };
                write!(
                    f, " {} | {} | {:>9.6} | {:.1} {}",
                    self.n, self.m, ov.integral, ov.expected(), mark,
                )
            },
            Err(err) => write!(f, " {} | {} | skipped: {}", self.n, self.m, err),
        }
    }
}

/// Compute overlaps for every ordered pair drawn from `orders`.
pub fn sweep<I>(orders: I, cfg: &QuadConfig) -> Vec<Row>
where I: IntoIterator<Item = usize>
{
    let orders: Vec<Order> = orders.into_iter().map(Order).collect();
    orders.iter()
        .flat_map(|&n| orders.iter().map(move |&m| (n, m)))
        .map(|(n, m)| {
            let result = overlap(n, m, cfg);
            if let Err(err) = &result {
                warn!("verify::sweep: ({}, {}) failed: {}", n, m, err);
            }
            Row { n, m, result }
        })
        .collect()
}

/// Assemble the matrix of overlaps `G[i, j] = I(orders[i], orders[j])`.
///
/// Only the upper triangle is integrated; the lower is filled by symmetry.
pub fn gram_matrix(orders: &[usize], cfg: &QuadConfig)
    -> HResult<nd::Array2<f64>>
{
    let k = orders.len();
    let mut g: nd::Array2<f64> = nd::Array2::zeros((k, k));
    for (i, &n) in orders.iter().enumerate() {
        for (j, &m) in orders.iter().enumerate().skip(i) {
            let ov = overlap(n, m, cfg)?;
            g[[i, j]] = ov.integral;
            g[[j, i]] = ov.integral;
        }
    }
    Ok(g)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use crate::error::HermError;
    use super::*;

    #[test]
    fn orthonormal_up_to_four() {
        let cfg = QuadConfig::default();
        for n in 0..=4_usize {
            for m in 0..=4_usize {
                let ov = overlap(n, m, &cfg).unwrap();
                let expected = if n == m { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(ov.integral, expected, epsilon = 1e-5);
                assert!(ov.matches(), "({n}, {m}): {}", ov.integral);
                assert!(ov.abserr <= cfg.err_ceiling);
            }
        }
    }

    #[test]
    fn higher_orders() {
        let cfg = QuadConfig::default();
        for (n, m) in [(10, 10), (10, 12), (20, 20), (15, 17)] {
            assert!(overlap(n, m, &cfg).unwrap().matches(), "({n}, {m})");
        }
    }

    #[test]
    fn odd_pairs_vanish_exactly() {
        let ov = overlap(1, 2, &QuadConfig::default()).unwrap();
        assert_eq!(ov.integral, 0.0);
    }

    #[test]
    fn non_convergence_is_reported() {
        let cfg = QuadConfig::new(None, None, Some(1), Some(1e-14)).unwrap();
        let err = overlap(4, 4, &cfg).unwrap_err();
        assert!(err.is_did_not_converge(), "{err}");
    }

    #[test]
    fn invalid_orders() {
        let cfg = QuadConfig::default();
        assert!(overlap(-1, 0, &cfg).unwrap_err().is_invalid_order());
        assert!(matches!(overlap(0, 2.5, &cfg), Err(HermError::InvalidOrder(_))));
    }

    #[test]
    fn sweep_rows() {
        let cfg = QuadConfig::default();
        let rows = sweep(0..3, &cfg);
        assert_eq!(rows.len(), 9);
        assert!(rows.iter().all(Row::passed));
        let diag = rows.iter().find(|r| r.n == Order(1) && r.m == Order(1)).unwrap();
        let line = diag.to_string();
        assert!(line.starts_with(" 1 | 1 |  1.000000 | 1.0"), "{line}");
        assert!(line.ends_with('✓'));
    }

    #[test]
    fn sweep_keeps_failures() {
        let cfg = QuadConfig::new(None, None, Some(1), Some(1e-14)).unwrap();
        let rows = sweep([0, 2], &cfg);
        assert!(rows.iter().any(|r| r.result.is_err()));
        let failed = rows.iter().find(|r| r.result.is_err()).unwrap();
        assert!(!failed.passed());
        assert!(failed.to_string().contains("skipped"));
    }

    #[test]
    fn gram_is_identity() {
        let g = gram_matrix(&[0, 1, 2, 3], &QuadConfig::default()).unwrap();
        let eye: nd::Array2<f64> = nd::Array2::eye(4);
        g.iter().zip(&eye)
            .for_each(|(gij, eij)| assert_abs_diff_eq!(gij, eij, epsilon = 1e-5));
    }
}
