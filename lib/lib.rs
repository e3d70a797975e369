//! Provides evaluation of the quantum harmonic oscillator eigenfunctions
//! (normalized Hermite functions) and numerical verification of their
//! orthonormality over the real line.
//!
//! Provides implementations for the following:
//! - Physicists' Hermite polynomials by recurrence, with overflow-free scaling
//! - Log-domain normalization constants
//! - Eigenfunctions and probability densities, for scalars and arrays
//! - Adaptive Gauss-Kronrod quadrature on finite and infinite domains, with
//!   explicit non-convergence errors
//! - Orthonormality checks and sweeps for tabular reports
//! - Uniform-grid sampling for plotting, node location, and a Fourier
//!   eigenfunction check
//!
//! ```
//! use hermfn::{ psi::psi, quad::QuadConfig, verify::overlap };
//!
//! let p = psi(0, 0.0).unwrap();
//! assert!((p - 0.7511255444649425).abs() < 1e-9);
//! assert!(overlap(1, 1, &QuadConfig::default()).unwrap().matches());
//! ```
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod order;
pub mod hermite;
pub mod norm;
pub mod psi;
pub mod quad;
pub mod verify;
pub mod sample;
pub mod spectral;
pub mod units;
pub mod utils;

pub mod docs;

pub(crate) const DEF_EPSABS: f64 = 1.49e-8;
pub(crate) const DEF_EPSREL: f64 = 1.49e-8;
pub(crate) const DEF_LIMIT: usize = 200;
pub(crate) const DEF_ERR_CEILING: f64 = 1e-6;
pub(crate) const DEF_MAXITERS: usize = 1000;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;

pub type HResult<T> = Result<T, error::HermError>;
