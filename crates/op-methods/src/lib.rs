//! # op-methods
//!
//! Numerical methods: the recombining binomial lattice with backward
//! induction, and the Monte Carlo simulation framework.
//!
//! # Modules
//!
//! * [`lattice`] — Cox-Ross-Rubinstein tree and European/American rollback
//! * [`monte_carlo`] — path generation, chunked (optionally parallel)
//!   simulation, estimators with confidence intervals, control variates

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: binomial trees, backward induction.
pub mod lattice;

/// Monte Carlo simulation: path generation, simulation, estimators.
pub mod monte_carlo;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{price_american, BinomialTree};
pub use monte_carlo::{
    control_variate_estimate, simulate, Accumulator, MonteCarloEstimate, PathGenerator,
    SimulationSettings, CONFIDENCE_Z,
};
