//! # op-math
//!
//! Mathematical building blocks for the pricers: the standard normal
//! distribution, seedable Gaussian random sources, statistics accumulators
//! and a monotone bisection search.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Probability distributions.
pub mod distributions;

/// Random number generators.
pub mod random_numbers;

/// 1D root search.
pub mod solvers1d;

/// Statistics accumulators.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{normal_cdf, normal_cdf_inverse, normal_pdf};
pub use random_numbers::{derive_seed, GaussianRng, MersenneTwisterUniformRng, NormalMethod};
pub use solvers1d::{bisection_search, BisectionOutcome, BisectionSettings};
pub use statistics::{PairedStatistics, Statistics};
