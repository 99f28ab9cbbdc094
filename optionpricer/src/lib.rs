//! # optionpricer
//!
//! Option pricing under Black-Scholes dynamics: closed forms for European,
//! geometric Asian and geometric basket options, a binomial lattice for
//! American options, Monte Carlo for arithmetic Asian, arithmetic basket and
//! knock-in/knock-out barrier options, implied volatility and Greeks.
//!
//! This crate is a **façade** over the `op-*` workspace crates. It adds the
//! flat function API ([`api`]), the single [`price`] entry point dispatching
//! on [`InstrumentSpec`], and [`PricingConfig`].
//!
//! All rates, volatilities, dividend yields and correlations are decimal
//! fractions. Use [`MarketParameters::from_units`] to convert percentages.
//!
//! ```rust
//! use optionpricer::{api, OptionDirection};
//!
//! let call = api::price_european(OptionDirection::Call, 100.0, 100.0, 1.0, 0.05, 0.2, 0.0)?;
//! assert!((call - 10.4506).abs() < 1e-4);
//! # Ok::<(), optionpricer::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use op_core as core;

/// Normal distribution, random sources, statistics, root search.
pub use op_math as math;

/// Stochastic process definitions.
pub use op_processes as processes;

/// Numerical methods (lattice, Monte Carlo).
pub use op_methods as methods;

/// Option contracts, market parameters and validation.
pub use op_instruments as instruments;

/// Pricing engines.
pub use op_pricingengines as pricingengines;

pub mod api;
pub mod config;
pub mod pricing;

pub use config::PricingConfig;
pub use op_core::{Error, Result, Violation};
pub use op_instruments::{InstrumentSpec, MarketParameters, OptionDirection, SecondAsset, Units};
pub use op_methods::MonteCarloEstimate;
pub use op_pricingengines::{BarrierDeltaMode, BarrierEstimate, Greeks, ImpliedVolatility};
pub use pricing::{price, sensitivities, sensitivity_profile, PriceBreakdown, PriceResult};
