#![allow(non_upper_case_globals)]

//! Conversion between the dimensionless eigenfunctions used everywhere else in
//! this crate and a physical harmonic oscillator of given mass and angular
//! frequency.
//!
//! Concrete physical constants are taken from NIST.
//!
//! ```
//! use hermfn::units::{ self, Oscillator };
//!
//! let osc = Oscillator::from_mks(171.0 * units::mu, 2.0 * std::f64::consts::PI * 30e3).unwrap();
//! // ground state energy is ħω/2
//! assert!((osc.energy(0).unwrap() / osc.e - 0.5).abs() < 1e-15);
//! ```

use std::f64::consts::{ PI, TAU };
use ndarray as nd;
use crate::{
    Arr1,
    HResult,
    error::HermError,
    order::IntoOrder,
    psi::Eigenfunction,
};

/// Planck constant (kg m^2 s^-1)
pub const h: f64 = 6.62607015e-34;
//             +/- 0 (exact)

/// reduced Planck constant (kg m^2 s^-1)
pub const hbar: f64 = h / 2.0 / PI;
//                +/- 0 (exact)

/// Boltzmann's constant (J K^-1)
pub const kB: f64 = 1.380649e-23;
//              +/- 0 (exact)

/// electron mass (kg)
pub const me: f64 = 9.1093837015e-31;
//              +/- 0.0000000028e-31

/// unified atomic mass unit (kg)
pub const mu: f64 = 1.66053906660e-27;
//              +/- 0.00000000050e-27

/// A one-dimensional harmonic oscillator `V(x) = m ω² x² / 2` in MKS units.
///
/// The eigenfunctions of the physical system are the dimensionless ψₙ
/// rescaled by the oscillator length `a = √(ħ / m ω)`:
/// ```text
/// ψₙ(x; a) = a^(-1/2) ψₙ(x / a)
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Oscillator {
    /// Particle mass (kg).
    pub m: f64,
    /// Angular frequency (s^-1).
    pub omega: f64,
    /// Oscillator length (m).
    pub a: f64,
    /// Energy quantum ħω (J).
    pub e: f64,
}

impl Oscillator {
    /// Construct from a mass (kg) and angular frequency (s^-1).
    ///
    /// Fails with [`HermError::NonPositive`] if either is not a finite,
    /// positive number.
    pub fn from_mks(mass: f64, omega: f64) -> HResult<Self> {
        HermError::check_positive("mass", mass)?;
        HermError::check_positive("omega", omega)?;
        let a = (hbar / mass / omega).sqrt();
        Ok(Self { m: mass, omega, a, e: hbar * omega })
    }

    /// Construct from a mass (kg) and ordinary trap frequency (Hz).
    pub fn from_frequency(mass: f64, freq: f64) -> HResult<Self> {
        Self::from_mks(mass, TAU * freq)
    }

    /// Oscillation period (s).
    pub fn period(&self) -> f64 { TAU / self.omega }

    /// Energy of the `n`-th state (J).
    pub fn energy<N>(&self, n: N) -> HResult<f64>
    where N: IntoOrder
    {
        Eigenfunction::new(n).map(|f| f.energy() * self.e)
    }

    /// Temperature equivalent of the energy quantum, ħω / k_B (K).
    pub fn temperature(&self) -> f64 { self.e / kB }

    /// Potential energy at position `x` (J).
    pub fn potential(&self, x: f64) -> f64 {
        0.5 * self.m * (self.omega * x).powi(2)
    }

    /// Convert a quantity with dimensions of length to oscillator units.
    pub fn to_nat_length<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.a.recip()
    }

    /// Convert a dimensionless length to meters.
    pub fn from_nat_length<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.a
    }

    /// Evaluate the physical eigenfunction (m^-1/2) at position `x` (m).
    pub fn psi<N>(&self, n: N, x: f64) -> HResult<f64>
    where N: IntoOrder
    {
        let f = Eigenfunction::new(n)?;
        Ok(f.eval(x / self.a) / self.a.sqrt())
    }

    /// Evaluate the physical eigenfunction element-wise over positions (m).
    pub fn psi_arr<N, S>(&self, n: N, x: &Arr1<S>) -> HResult<nd::Array1<f64>>
    where
        N: IntoOrder,
        S: nd::Data<Elem = f64>,
    {
        let f = Eigenfunction::new(n)?;
        let norm = self.a.sqrt().recip();
        Ok(x.mapv(|xk| f.eval(xk / self.a) * norm))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use crate::{ quad::{ integrate, Domain, QuadConfig }, utils::wf_norm };
    use super::*;

    fn yb171() -> Oscillator {
        Oscillator::from_frequency(2.8384644058191703e-25, 30e3).unwrap()
    }

    #[test]
    fn scales() {
        let osc = yb171();
        assert_relative_eq!(osc.a, (hbar / osc.m / osc.omega).sqrt());
        assert_relative_eq!(osc.period(), 1.0 / 30e3, max_relative = 1e-14);
        assert_relative_eq!(osc.energy(2).unwrap(), 2.5 * hbar * osc.omega);
        assert_relative_eq!(osc.from_nat_length(osc.to_nat_length(1e-7)), 1e-7);
    }

    #[test]
    fn virial_turning_point() {
        // the classical turning point of state n sits at a √(2n + 1)
        let osc = yb171();
        let n = 3;
        let xt = osc.a * (2.0 * n as f64 + 1.0).sqrt();
        assert_relative_eq!(
            osc.potential(xt), osc.energy(n).unwrap(), max_relative = 1e-12);
    }

    #[test]
    fn physical_states_are_normalized() {
        let osc = yb171();
        let cfg = QuadConfig::default();
        // integrate in oscillator units, where dx = a dξ
        let est = integrate(
            |xi| osc.psi(4, xi * osc.a).unwrap().powi(2) * osc.a,
            Domain::Full,
            &cfg,
        ).unwrap();
        assert!((est.value - 1.0).abs() < 1e-5);

        let x: nd::Array1<f64> = nd::Array1::linspace(-10.0 * osc.a, 10.0 * osc.a, 2001);
        let q = osc.psi_arr(4, &x).unwrap();
        assert_relative_eq!(wf_norm(&q, x[1] - x[0]), 1.0, max_relative = 1e-6);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(Oscillator::from_mks(-1.0, 1.0).is_err());
        assert!(Oscillator::from_mks(1.0, 0.0).is_err());
        assert!(Oscillator::from_frequency(1.0, f64::NAN).is_err());
    }
}
