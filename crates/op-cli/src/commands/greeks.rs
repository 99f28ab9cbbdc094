//! `greeks` command

use crate::report::{emit, GreeksReport, ProfileReport};
use crate::request::PricingRequest;
use crate::OutputFormat;
use anyhow::{Context, Result};
use optionpricer::{sensitivities, sensitivity_profile, PricingConfig};
use std::path::Path;

/// Run the greeks command; `profile` holds the spot-grid intervals.
pub fn run(
    request: &Path,
    config: &PricingConfig,
    profile: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let request = PricingRequest::from_file(request)?;
    match profile {
        Some(steps) => emit(&profile_request(&request, config, steps)?, format),
        None => emit(&greeks_request(&request, config)?, format),
    }
}

pub fn greeks_request(request: &PricingRequest, config: &PricingConfig) -> Result<GreeksReport> {
    let market = request.market()?;
    let spec = request.instrument();
    let greeks = sensitivities(request.direction, &spec, &market, config)
        .with_context(|| format!("greeks of {} {}", request.direction, spec.name()))?;
    Ok(GreeksReport {
        instrument: spec.name(),
        direction: request.direction,
        greeks,
    })
}

pub fn profile_request(
    request: &PricingRequest,
    config: &PricingConfig,
    steps: usize,
) -> Result<ProfileReport> {
    let market = request.market()?;
    let spec = request.instrument();
    let points = sensitivity_profile(request.direction, &spec, &market, config, steps)
        .with_context(|| format!("greeks profile of {} {}", request.direction, spec.name()))?;
    Ok(ProfileReport {
        instrument: spec.name(),
        direction: request.direction,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Render;
    use approx::assert_abs_diff_eq;

    fn request() -> PricingRequest {
        PricingRequest::from_toml_str(
            r#"
            direction = "put"
            market = { spot = 100.0, strike = 100.0, maturity = 1.0, rate = 0.05, volatility = 0.2 }
            "#,
        )
        .unwrap()
    }

    #[test]
    fn european_put_delta() {
        let report = greeks_request(&request(), &PricingConfig::default()).unwrap();
        // N(d1) − 1 with d1 = 0.35
        assert_abs_diff_eq!(report.greeks.delta, -0.3632, epsilon = 1e-3);
    }

    #[test]
    fn profile_spans_the_grid() {
        let report = profile_request(&request(), &PricingConfig::default(), 50).unwrap();
        assert_eq!(report.points.len(), 51);
        assert_abs_diff_eq!(report.points[0].spot, 70.0, epsilon = 1e-9);
        assert_eq!(report.table().lines().count(), 53);
    }
}
