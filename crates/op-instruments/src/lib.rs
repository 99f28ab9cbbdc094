//! # op-instruments
//!
//! Option contracts and their inputs: call/put direction, the vanilla payoff,
//! market parameters with explicit unit conversion, the closed set of
//! instrument variants, and the validation layer that checks all of them
//! before any pricer runs.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod instrument;
pub mod market;
pub mod payoff;
pub mod validation;

pub use instrument::{InstrumentSpec, SecondAsset};
pub use market::{MarketParameters, Units};
pub use payoff::{OptionDirection, PlainVanillaPayoff};
pub use validation::{validate, validate_implied_volatility, violations, Bounds};
