//! `price` command

use crate::report::{emit, PriceReport};
use crate::request::PricingRequest;
use crate::OutputFormat;
use anyhow::{Context, Result};
use optionpricer::PricingConfig;
use std::path::Path;
use tracing::info;

/// Run the price command
pub fn run(request: &Path, config: &PricingConfig, format: OutputFormat) -> Result<()> {
    let request = PricingRequest::from_file(request)?;
    let report = price_request(&request, config)?;
    info!(instrument = report.instrument, price = report.price, "pricing complete");
    emit(&report, format)
}

pub fn price_request(request: &PricingRequest, config: &PricingConfig) -> Result<PriceReport> {
    let market = request.market()?;
    let spec = request.instrument();
    let result = optionpricer::price(request.direction, &spec, &market, config)
        .with_context(|| format!("pricing {} {}", request.direction, spec.name()))?;
    Ok(PriceReport::new(request.direction, &spec, &market, &result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn percent_request_prices_the_reference_call() {
        let request = PricingRequest::from_toml_str(
            r#"
            units = "percent"
            direction = "call"
            market = { spot = 100.0, strike = 100.0, maturity = 1.0, rate = 5.0, volatility = 20.0 }
            "#,
        )
        .unwrap();
        let report = price_request(&request, &PricingConfig::default()).unwrap();
        assert_abs_diff_eq!(report.price, 10.4506, epsilon = 1e-4);
    }

    #[test]
    fn validation_failures_carry_context() {
        let request = PricingRequest::from_toml_str(
            r#"
            direction = "call"
            market = { spot = 100.0, strike = 100.0, maturity = 1.0, rate = 0.05, volatility = 20.0 }

            [instrument]
            kind = "american"
            steps = 5
            "#,
        )
        .unwrap();
        let err = price_request(&request, &PricingConfig::default()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("pricing call american"), "{message}");
        assert!(message.contains("volatility"), "{message}");
        assert!(message.contains("steps"), "{message}");
    }
}
