//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Evaluation](#evaluation)
//! - [Normalization](#normalization)
//! - [Orthonormality](#orthonormality)
//! - [Fourier transform](#fourier-transform)
//! - [Units](#units)
//!
//! # Background
//! In units where ħ = *m* = *ω* = 1, the time-independent Schrödinger equation
//! for the harmonic oscillator reads
//! ```text
//!   1 ∂²ψ   1
//! - - --- + - x² ψ = E ψ
//!   2 ∂x²   2
//! ```
//! Its square-integrable solutions are the Hermite functions
//! ```text
//! ψₙ(x) = N(n) Hₙ(x) exp(-x²/2),    Eₙ = n + 1/2
//! ```
//! where *H*ₙ is the *n*-th physicists' Hermite polynomial, a degree-*n*
//! polynomial with parity (−1)ⁿ and exactly *n* real zeros, all inside the
//! classically allowed region |*x*| < √(2*n* + 1).
//!
//! # Evaluation
//! The polynomials obey
//! ```text
//! H₀(x) = 1
//! H₁(x) = 2 x
//! Hₖ₊₁(x) = 2 x Hₖ(x) - 2 k Hₖ₋₁(x)
//! ```
//! Running the recurrence is *O*(*n*) per point and avoids summing the
//! explicit coefficients, which alternate in sign and grow like 2ⁿ so that the
//! sum cancels catastrophically for moderate *n*. The magnitude of *H*ₙ still
//! grows quickly (roughly (2*n*/e)^(*n*/2) inside the allowed region), so
//! [`hermite_scaled`][crate::hermite::hermite_scaled] rescales the two
//! running terms by an exact power of two whenever they exceed 2¹²⁸ and keeps
//! the accumulated exponent separately.
//!
//! The normalized functions satisfy their own recurrence,
//! ```text
//! ψₖ₊₁(x) = √(2/(k+1)) x ψₖ(x) - √(k/(k+1)) ψₖ₋₁(x)
//! ```
//! which is available as [`Method::Recurrence`][crate::psi::Method::Recurrence]
//! and serves as an independent check on the default composition.
//!
//! # Normalization
//! ```text
//!                  1
//! N(n) = ------------------
//!        √(2ⁿ n! √π)
//! ```
//! Computing `2ⁿ n!` directly in double precision overflows at *n* = 171 and
//! loses the exactness of `n!` well before that. Instead,
//! ```text
//! ln N(n) = -(n ln 2 + Σₖ₌₂ⁿ ln k + (ln π)/2) / 2
//! ```
//! is finite for every *n*. The product `N(n) Hₙ(x) exp(-x²/2)` is formed by
//! adding logarithms and exponentiating once, so ψₙ is representable whenever
//! its true value is. Only the bare constant *N*(*n*) has a ceiling: it falls
//! below the smallest normal `f64` (about 2.2 × 10⁻³⁰⁸) at *n* = 268.
//!
//! # Orthonormality
//! ```text
//!  ∞
//!  ∫ ψₙ(x) ψₘ(x) dx = δ(n, m)
//! -∞
//! ```
//! The integrand is a polynomial of degree *n* + *m* times exp(−*x*²), which
//! oscillates inside the allowed region and decays like a Gaussian outside it.
//! Truncating the domain to a fixed window such as [−4, 4] discards
//! contributions of order exp(−16) · 4ⁿ⁺ᵐ, which exceeds 10⁻⁵ already for
//! small orders. The verifier therefore integrates over the full line using
//! ```text
//! x = (1 - t) / t,   t ∊ (0, 1]
//! ```
//! and the folded integrand `(f(x) + f(-x)) / t²`, with adaptive
//! Gauss-Kronrod subdivision in *t*. For odd *n* + *m* the folded integrand
//! vanishes identically, so those overlaps come out as exactly zero.
//!
//! Every integration reports an error estimate; an estimate above the
//! configured ceiling is an error, not a value.
//!
//! # Fourier transform
//! With the unitary convention
//! ```text
//!            1     ∞
//! φ(k) = ------- ∫ ψ(x) exp(-i k x) dx
//!         √(2π)  -∞
//! ```
//! each Hermite function is an eigenfunction, `φₙ(k) = (−i)ⁿ ψₙ(k)`. For a
//! function sampled at `x[j] = x₀ + j δx`, `j ∊ {0, ..., N - 1}`,
//! ```text
//!           δx
//! φ(k[m]) ≈ ----- exp(-i k[m] x₀) FFT[ψ][m],   k[m] = 2π m / (N δx)
//!           √(2π)
//! ```
//! which is exact up to aliasing and truncation, both exponentially small for
//! a grid that covers the decaying tails.
//!
//! # Units
//! For a particle of mass *m* in a trap of angular frequency *ω*, lengths are
//! measured in the oscillator length *a* = √(ħ / *m ω*) and energies in ħ*ω*.
//! Physical eigenfunctions are `a^(-1/2) ψₙ(x / a)`, which keeps them
//! normalized with respect to *dx* in meters. See
//! [`Oscillator`][crate::units::Oscillator].
