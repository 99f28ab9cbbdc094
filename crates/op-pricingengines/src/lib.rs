//! # op-pricingengines
//!
//! Pricing engines for every instrument family, plus the implied-volatility
//! solver and the Greeks estimators built on top of them.
//!
//! ## Engines
//!
//! - [`black_scholes`] — Black-Scholes-Merton closed form for European options
//! - [`geometric_asian`] — closed form for discrete geometric-average Asians
//! - [`geometric_basket`] — closed form for two-asset geometric baskets
//! - [`binomial_american`] — CRR lattice with early exercise
//! - [`mc_arithmetic_asian`] / [`mc_arithmetic_basket`] — Monte Carlo with
//!   optional geometric control variate
//! - [`mc_barrier`] — Monte Carlo knock-in/knock-out put with bumped delta
//! - [`implied_volatility`] — bisection inversion of Black-Scholes
//! - [`finite_difference_greeks`] — bump-and-reprice sensitivities

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_asian_engine;
pub mod analytic_basket_engine;
pub mod analytic_european_engine;
pub mod binomial_engine;
pub mod greeks;
pub mod implied_volatility;
pub mod mc_asian_engine;
pub mod mc_barrier_engine;
pub mod mc_basket_engine;

pub use analytic_asian_engine::geometric_asian;
pub use analytic_basket_engine::geometric_basket;
pub use analytic_european_engine::{black_scholes, black_scholes_greeks};
pub use binomial_engine::binomial_american;
pub use greeks::{
    finite_difference_greeks, greeks_profile, spot_grid, BumpSizes, Greeks, ProfilePoint,
};
pub use implied_volatility::{implied_volatility, price_bounds, ImpliedVolatility};
pub use mc_asian_engine::mc_arithmetic_asian;
pub use mc_barrier_engine::{mc_barrier, BarrierDeltaMode, BarrierEstimate, BarrierMonitor, KikoPut};
pub use mc_basket_engine::mc_arithmetic_basket;
