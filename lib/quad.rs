//! Adaptive Gauss-Kronrod quadrature on finite and infinite domains.
//!
//! Each subinterval is integrated with the 7-point Gauss and 15-point Kronrod
//! rules; the difference between the two, rescaled as in QUADPACK, gives a
//! per-interval error estimate. The interval with the largest estimate is
//! bisected until the summed estimate is within tolerance or the subinterval
//! limit is reached.
//!
//! Infinite domains are mapped onto `(0, 1]` with
//! ```text
//! x = a + (1 - t) / t,    dx = -dt / t²
//! ```
//! and for the full real line both tails are folded onto the same `t`
//! interval, `f(x) + f(-x)`. Kronrod nodes are interior, so the singular end
//! `t = 0` is never evaluated.
//!
//! The final error estimate is always reported; if it exceeds the configured
//! ceiling the result is rejected with [`QuadError::DidNotConverge`] rather
//! than returned.
//!
//! ```
//! use hermfn::quad::{ integrate, Domain, QuadConfig };
//!
//! let cfg = QuadConfig::default();
//! let est = integrate(|x| (-x * x).exp(), Domain::Full, &cfg).unwrap();
//! assert!((est.value - std::f64::consts::PI.sqrt()).abs() < 1e-9);
//! assert!(est.abserr <= cfg.epsabs.max(cfg.epsrel * est.value.abs()));
//! ```

use log::{ debug, warn };
use crate::{
    error::QuadError,
    DEF_EPSABS,
    DEF_EPSREL,
    DEF_ERR_CEILING,
    DEF_LIMIT,
};

pub type QResult<T> = Result<T, QuadError>;

// Kronrod abscissae; odd indices are also the Gauss abscissae
const XGK: [f64; 8] = [
    0.991455371120812639206854697526329,
    0.949107912342758524526189684047851,
    0.864864423359769072789712788640926,
    0.741531185599394439863864773280788,
    0.586087235467691130294144845693013,
    0.405845151377397166906606412076961,
    0.207784955007898467600689403773245,
    0.000000000000000000000000000000000,
];

// Kronrod weights
const WGK: [f64; 8] = [
    0.022935322010529224963732008058970,
    0.063092092629978553290700663189204,
    0.104790010322250183839876322541518,
    0.140653259715525918745189590510238,
    0.169004726639267902826583426598550,
    0.190350578064785409913256402421014,
    0.204432940075298892414161999234649,
    0.209482141084727828012999174891714,
];

// Gauss weights for XGK[1], XGK[3], XGK[5] and the center
const WG: [f64; 4] = [
    0.129484966168869693270611432679082,
    0.279705391489276667901467771423780,
    0.381830050505118944950369775488975,
    0.417959183673469387755102040816327,
];

/// Integration domain.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Domain {
    /// `[a, b]`; reversed bounds flip the sign of the result.
    Finite(f64, f64),
    /// `[a, +∞)`.
    Upper(f64),
    /// `(-∞, b]`.
    Lower(f64),
    /// `(-∞, +∞)`.
    Full,
}

impl Domain {
    /// Return `true` if `self` is unbounded on either side.
    pub fn is_infinite(&self) -> bool { !matches!(self, Self::Finite(..)) }

    fn check(&self) -> QResult<()> {
        match *self {
            Self::Finite(a, b) if !(a.is_finite() && b.is_finite())
                => Err(QuadError::BadDomain(a, b)),
            Self::Upper(a) if !a.is_finite()
                => Err(QuadError::BadDomain(a, f64::INFINITY)),
            Self::Lower(b) if !b.is_finite()
                => Err(QuadError::BadDomain(f64::NEG_INFINITY, b)),
            _ => Ok(()),
        }
    }
}

/// Tolerances and limits for [`integrate`].
///
/// Integration stops once the summed error estimate is below
/// `max(epsabs, epsrel * |value|)`; the result is then accepted only if the
/// estimate is also below `err_ceiling`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadConfig {
    /// Absolute tolerance (default: `1.49e-8`).
    pub epsabs: f64,
    /// Relative tolerance (default: `1.49e-8`).
    pub epsrel: f64,
    /// Maximum number of subintervals (default: `200`).
    pub limit: usize,
    /// Largest acceptable final error estimate (default: `1e-6`).
    pub err_ceiling: f64,
}

impl Default for QuadConfig {
    fn default() -> Self {
        Self {
            epsabs: DEF_EPSABS,
            epsrel: DEF_EPSREL,
            limit: DEF_LIMIT,
            err_ceiling: DEF_ERR_CEILING,
        }
    }
}

impl QuadConfig {
    /// Create a new `QuadConfig`, using defaults for any `None` values.
    pub fn new(
        epsabs: Option<f64>,
        epsrel: Option<f64>,
        limit: Option<usize>,
        err_ceiling: Option<f64>,
    ) -> QResult<Self>
    {
        let cfg = Self {
            epsabs: epsabs.unwrap_or(DEF_EPSABS),
            epsrel: epsrel.unwrap_or(DEF_EPSREL),
            limit: limit.unwrap_or(DEF_LIMIT),
            err_ceiling: err_ceiling.unwrap_or(DEF_ERR_CEILING),
        };
        cfg.check()?;
        Ok(cfg)
    }

    /// Check that all values are usable.
    pub fn check(&self) -> QResult<()> {
        QuadError::check_epsilon(self.epsabs, self.epsrel)?;
        QuadError::check_limit(self.limit)?;
        QuadError::check_ceiling(self.err_ceiling)?;
        Ok(())
    }

    fn tolerance(&self, value: f64) -> f64 {
        self.epsabs.max(self.epsrel * value.abs())
    }
}

/// Result of an integration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Estimate {
    /// Approximate value of the integral.
    pub value: f64,
    /// Estimated absolute error of `value`.
    pub abserr: f64,
    /// Number of integrand evaluations.
    pub neval: usize,
    /// Number of subintervals in the final partition.
    pub intervals: usize,
}

// a single subinterval of the (possibly transformed) domain
#[derive(Copy, Clone, Debug)]
struct Segment {
    a: f64,
    b: f64,
    value: f64,
    abserr: f64,
}

// apply the 15-point Gauss-Kronrod rule to `g` over [a, b]
fn gk15<G>(g: &mut G, a: f64, b: f64) -> QResult<Segment>
where G: FnMut(f64) -> QResult<f64>
{
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);
    let dhalf = half.abs();

    let mut fv1 = [0.0_f64; 7];
    let mut fv2 = [0.0_f64; 7];
    let fc = g(center)?;
    let mut resg = fc * WG[3];
    let mut resk = fc * WGK[7];
    let mut resabs = resk.abs();
    for j in 0..3 {
        let jtw = 2 * j + 1;
        let absc = half * XGK[jtw];
        let f1 = g(center - absc)?;
        let f2 = g(center + absc)?;
        fv1[jtw] = f1;
        fv2[jtw] = f2;
        resg += WG[j] * (f1 + f2);
        resk += WGK[jtw] * (f1 + f2);
        resabs += WGK[jtw] * (f1.abs() + f2.abs());
    }
    for j in 0..4 {
        let jtwm1 = 2 * j;
        let absc = half * XGK[jtwm1];
        let f1 = g(center - absc)?;
        let f2 = g(center + absc)?;
        fv1[jtwm1] = f1;
        fv2[jtwm1] = f2;
        resk += WGK[jtwm1] * (f1 + f2);
        resabs += WGK[jtwm1] * (f1.abs() + f2.abs());
    }
    let reskh = 0.5 * resk;
    let resasc
        = (WGK[7] * (fc - reskh).abs()
            + fv1.iter().zip(&fv2).zip(&WGK)
            .map(|((f1, f2), w)| w * ((f1 - reskh).abs() + (f2 - reskh).abs()))
            .sum::<f64>())
        * dhalf;
    let resabs = resabs * dhalf;
    let mut abserr = ((resk - resg) * half).abs();
    if resasc != 0.0 && abserr != 0.0 {
        abserr = resasc * (200.0 * abserr / resasc).powf(1.5).min(1.0);
    }
    if resabs > f64::MIN_POSITIVE / (50.0 * f64::EPSILON) {
        abserr = abserr.max(50.0 * f64::EPSILON * resabs);
    }
    Ok(Segment { a, b, value: resk * half, abserr })
}

const EVALS_PER_SEGMENT: usize = 15;

// bisect the worst segment until converged or out of room
fn adapt<G>(g: &mut G, a: f64, b: f64, cfg: &QuadConfig) -> QResult<Estimate>
where G: FnMut(f64) -> QResult<f64>
{
    let mut segments: Vec<Segment> = vec![gk15(g, a, b)?];
    let mut neval = EVALS_PER_SEGMENT;
    let mut value: f64 = segments[0].value;
    let mut abserr: f64 = segments[0].abserr;
    while abserr > cfg.tolerance(value) && segments.len() < cfg.limit {
        let Some((worst, _))
            = segments.iter().enumerate()
            .max_by(|(_, l), (_, r)| {
                match l.abserr.partial_cmp(&r.abserr) {
                    Some(ord) => ord,
                    None => std::cmp::Ordering::Less,
                }
            })
            else { break; };
        let seg = segments.swap_remove(worst);
        let mid = 0.5 * (seg.a + seg.b);
        if mid <= seg.a || mid >= seg.b {
            warn!(
                "quad::integrate: subinterval [{:e}, {:e}] cannot \
                be bisected further; accuracy may be limited by roundoff",
                seg.a, seg.b,
            );
            segments.push(seg);
            break;
        }
        segments.push(gk15(g, seg.a, mid)?);
        segments.push(gk15(g, mid, seg.b)?);
        neval += 2 * EVALS_PER_SEGMENT;
        value = segments.iter().map(|s| s.value).sum();
        abserr = segments.iter().map(|s| s.abserr).sum();
    }
    if abserr > cfg.tolerance(value) {
        warn!(
            "quad::integrate: stopped at {} subintervals with error \
            estimate {:.3e}",
            segments.len(), abserr,
        );
    }
    debug!(
        "quad::integrate: value = {:.12e}, abserr = {:.3e}, {} intervals, {} \
        evaluations",
        value, abserr, segments.len(), neval,
    );
    if abserr > cfg.err_ceiling {
        return Err(QuadError::DidNotConverge {
            abserr,
            ceiling: cfg.err_ceiling,
        });
    }
    Ok(Estimate { value, abserr, neval, intervals: segments.len() })
}

// evaluate the user integrand, rejecting non-finite values
fn checked<F>(f: &mut F, x: f64) -> QResult<f64>
where F: FnMut(f64) -> f64
{
    let y = f(x);
    y.is_finite().then_some(y).ok_or(QuadError::NonFinite(x))
}

/// Integrate `f` over `domain`.
///
/// Fails with [`QuadError::DidNotConverge`] if the final error estimate
/// exceeds `cfg.err_ceiling`, and with [`QuadError::NonFinite`] if `f` returns
/// NaN or an infinity anywhere it is sampled.
pub fn integrate<F>(mut f: F, domain: Domain, cfg: &QuadConfig)
    -> QResult<Estimate>
where F: FnMut(f64) -> f64
{
    cfg.check()?;
    domain.check()?;
    match domain {
        Domain::Finite(a, b) => {
            if a == b {
                return Ok(Estimate {
                    value: 0.0, abserr: 0.0, neval: 0, intervals: 0 });
            }
            let (lo, hi, sign) = if a < b { (a, b, 1.0) } else { (b, a, -1.0) };
            let mut g = |x: f64| checked(&mut f, x);
            let mut est = adapt(&mut g, lo, hi, cfg)?;
            est.value *= sign;
            Ok(est)
        },
        Domain::Upper(a) => {
            let mut g = |t: f64| -> QResult<f64> {
                let x = a + (1.0 - t) / t;
                Ok(checked(&mut f, x)? / (t * t))
            };
            adapt(&mut g, 0.0, 1.0, cfg)
        },
        Domain::Lower(b) => {
            let mut g = |t: f64| -> QResult<f64> {
                let x = b - (1.0 - t) / t;
                Ok(checked(&mut f, x)? / (t * t))
            };
            adapt(&mut g, 0.0, 1.0, cfg)
        },
        Domain::Full => {
            let mut g = |t: f64| -> QResult<f64> {
                let x = (1.0 - t) / t;
                Ok((checked(&mut f, x)? + checked(&mut f, -x)?) / (t * t))
            };
            adapt(&mut g, 0.0, 1.0, cfg)
                .map(|est| Estimate { neval: 2 * est.neval, ..est })
        },
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;
    use approx::assert_abs_diff_eq;
    use super::*;

    #[test]
    fn polynomial_is_exact_on_one_segment() {
        let cfg = QuadConfig::default();
        let est = integrate(|x| 3.0 * x * x, Domain::Finite(0.0, 2.0), &cfg)
            .unwrap();
        assert_abs_diff_eq!(est.value, 8.0, epsilon = 1e-13);
        assert_eq!(est.intervals, 1);
        assert_eq!(est.neval, 15);
    }

    #[test]
    fn error_estimate_within_requested_tolerance() {
        let cfg = QuadConfig::default();
        let est = integrate(|x| (-x * x).exp(), Domain::Full, &cfg).unwrap();
        assert_abs_diff_eq!(est.value, PI.sqrt(), epsilon = 1e-9);
        assert!(est.abserr <= cfg.tolerance(est.value), "{}", est.abserr);
    }

    #[test]
    fn reversed_and_empty_bounds() {
        let cfg = QuadConfig::default();
        let est = integrate(|x| x.cos(), Domain::Finite(PI / 2.0, 0.0), &cfg)
            .unwrap();
        assert_abs_diff_eq!(est.value, -1.0, epsilon = 1e-12);
        let est = integrate(|x| x, Domain::Finite(1.0, 1.0), &cfg).unwrap();
        assert_eq!(est.value, 0.0);
    }

    #[test]
    fn half_infinite_domains() {
        let cfg = QuadConfig::default();
        let up = integrate(|x| (-x).exp(), Domain::Upper(0.0), &cfg).unwrap();
        assert_abs_diff_eq!(up.value, 1.0, epsilon = 1e-8);
        let lo = integrate(|x| x.exp(), Domain::Lower(1.0), &cfg).unwrap();
        assert_abs_diff_eq!(lo.value, 1.0_f64.exp(), epsilon = 1e-7);
    }

    #[test]
    fn full_line_algebraic_decay() {
        let cfg = QuadConfig::default();
        let est = integrate(|x| 1.0 / (1.0 + x * x), Domain::Full, &cfg)
            .unwrap();
        assert_abs_diff_eq!(est.value, PI, epsilon = 1e-7);
        assert!(est.abserr <= cfg.err_ceiling);
    }

    #[test]
    fn error_ceiling_is_enforced() {
        // a single Kronrod panel cannot resolve eighty oscillations
        let cfg = QuadConfig::new(None, None, Some(1), Some(1e-12)).unwrap();
        let err = integrate(
            |x| (50.0 * x).sin(),
            Domain::Finite(0.0, 10.0),
            &cfg,
        ).unwrap_err();
        assert!(err.is_did_not_converge());
    }

    #[test]
    fn non_finite_integrand() {
        let cfg = QuadConfig::default();
        let err = integrate(|_| f64::NAN, Domain::Full, &cfg).unwrap_err();
        assert!(matches!(err, QuadError::NonFinite(_)));
    }

    #[test]
    fn bad_configuration() {
        assert!(QuadConfig::new(Some(0.0), Some(0.0), None, None).is_err());
        assert!(QuadConfig::new(None, None, Some(0), None).is_err());
        assert!(QuadConfig::new(None, None, None, Some(-1.0)).is_err());
        let cfg = QuadConfig::default();
        assert!(integrate(|x| x, Domain::Finite(0.0, f64::INFINITY), &cfg).is_err());
        assert!(integrate(|x| x, Domain::Upper(f64::NAN), &cfg).is_err());
    }
}
