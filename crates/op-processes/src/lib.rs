//! # op-processes
//!
//! Risk-neutral stochastic processes: the Black-Scholes geometric Brownian
//! motion and a correlated pair of such processes for two-asset payoffs.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod black_scholes_process;
pub mod two_asset_process;

pub use black_scholes_process::BlackScholesProcess;
pub use two_asset_process::CorrelatedBlackScholesPair;
