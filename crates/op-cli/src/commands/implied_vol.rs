//! `implied-vol` command

use crate::report::{emit, ImpliedVolReport};
use crate::request::PricingRequest;
use crate::OutputFormat;
use anyhow::{ensure, Context, Result};
use optionpricer::instruments::validate_implied_volatility;
use optionpricer::{pricingengines, InstrumentSpec, PricingConfig};
use std::path::Path;

/// Run the implied-vol command
pub fn run(request: &Path, config: &PricingConfig, format: OutputFormat) -> Result<()> {
    let request = PricingRequest::from_file(request)?;
    let report = solve_request(&request, config)?;
    emit(&report, format)
}

pub fn solve_request(request: &PricingRequest, config: &PricingConfig) -> Result<ImpliedVolReport> {
    ensure!(
        request.instrument == InstrumentSpec::European,
        "implied volatility is defined for european requests, got {}",
        request.instrument.name()
    );
    let market_price = request
        .market_price
        .context("the request has no market_price")?;
    let market = request.market_with_volatility(0.0);
    validate_implied_volatility(market_price, &market)?;
    config.validate()?;

    let outcome = pricingengines::implied_volatility(
        request.direction,
        market_price,
        &market,
        &config.implied_vol,
    )
    .with_context(|| format!("implied volatility of {} at {market_price}", request.direction))?;

    Ok(ImpliedVolReport {
        direction: request.direction,
        market_price,
        units: request.units,
        volatility_in_units: outcome.volatility().map(|v| request.display_units(v)),
        outcome,
    })
}
