//! CLI command implementations
//!
//! Each submodule implements one subcommand.

pub mod greeks;
pub mod implied_vol;
pub mod price;

use anyhow::{Context, Result};
use optionpricer::PricingConfig;
use std::path::Path;

/// Load the pricing configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<PricingConfig> {
    let config = match path {
        Some(path) => PricingConfig::from_file(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => PricingConfig::default(),
    };
    config.validate().context("invalid configuration")?;
    Ok(config)
}
