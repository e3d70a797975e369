//! Momentum-space representation of sampled eigenfunctions.
//!
//! With the unitary convention
//! ```text
//!            1     ∞
//! φ(k) = ------- ∫ ψ(x) exp(-i k x) dx
//!         √(2π)  -∞
//! ```
//! the Hermite functions are eigenfunctions of the Fourier transform,
//! `φₙ(k) = (-i)ⁿ ψₙ(k)`. [`fourier_residual`] measures how far a sampled,
//! FFT-transformed ψₙ is from this identity, giving a check on the
//! eigenfunction evaluator that is independent of the quadrature used in
//! [`verify`][crate::verify].

use std::f64::consts::TAU;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    HResult,
    error::{ GridError, LengthError },
    order::{ IntoOrder, Order },
    psi::Eigenfunction,
    sample::Grid,
    utils::{ fft, fft_freq, fft_shift },
};

/// Return `(-i)ⁿ`.
pub fn eigenvalue(n: Order) -> C64 {
    match n.get() % 4 {
        0 => C64::new(1.0, 0.0),
        1 => C64::new(0.0, -1.0),
        2 => C64::new(-1.0, 0.0),
        _ => C64::new(0.0, 1.0),
    }
}

/// Compute the continuous Fourier transform of a function sampled on a
/// uniform grid, returning `(k, φ(k))` with `k` sorted in increasing order.
///
/// The function should be negligible at both ends of the grid.
pub fn fourier_transform<S, T>(x: &Arr1<S>, y: &Arr1<T>)
    -> HResult<(nd::Array1<f64>, nd::Array1<C64>)>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    LengthError::check(x, y)?;
    GridError::check_len(x.len())?;
    let n = x.len();
    let x0 = x[0];
    let dx = x[1] - x[0];
    let k: nd::Array1<f64> = fft_freq(n, dx) * TAU;
    let mut phi = fft(&y.mapv(C64::from));
    let pre = dx / TAU.sqrt();
    nd::Zip::from(&mut phi).and(&k)
        .for_each(|phik, kk| {
            *phik *= pre * C64::from_polar(1.0, -kk * x0);
        });
    Ok((fft_shift(&k), fft_shift(&phi)))
}

/// Return the largest deviation `|φₙ(k) - (-i)ⁿ ψₙ(k)|` over the momentum
/// grid conjugate to `grid`.
pub fn fourier_residual<N>(n: N, grid: &Grid) -> HResult<f64>
where N: IntoOrder
{
    let psi = Eigenfunction::new(n)?;
    let lambda = eigenvalue(psi.order());
    let y = psi.eval_arr(grid.get_x());
    let (k, phi) = fourier_transform(grid.get_x(), &y)?;
    let res
        = k.iter().zip(&phi)
        .map(|(kk, phik)| (phik - lambda * psi.eval(*kk)).norm())
        .fold(0.0, f64::max);
    Ok(res)
}
