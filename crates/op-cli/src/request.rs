//! TOML pricing requests.

use anyhow::{Context, Result};
use optionpricer::{InstrumentSpec, MarketParameters, OptionDirection, Units};
use serde::Deserialize;
use std::path::Path;

/// Market inputs as written in a request, in the request's units.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarketInput {
    pub spot: f64,
    pub strike: f64,
    pub maturity: f64,
    pub rate: f64,
    /// Not needed by `implied-vol`.
    pub volatility: Option<f64>,
    #[serde(default)]
    pub dividend_yield: f64,
}

/// One pricing request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingRequest {
    #[serde(default)]
    pub units: Units,
    pub direction: OptionDirection,
    pub market: MarketInput,
    #[serde(default = "european")]
    pub instrument: InstrumentSpec,
    /// Observed option price, for `implied-vol`.
    pub market_price: Option<f64>,
}

fn european() -> InstrumentSpec {
    InstrumentSpec::European
}

impl PricingRequest {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("malformed pricing request")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read request {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Market parameters in fractions. Requires a volatility.
    pub fn market(&self) -> Result<MarketParameters> {
        let volatility = self
            .market
            .volatility
            .context("the request has no market.volatility")?;
        Ok(self.market_with_volatility(volatility))
    }

    /// Market parameters in fractions, with `volatility` given in the
    /// request's units.
    pub fn market_with_volatility(&self, volatility: f64) -> MarketParameters {
        let m = &self.market;
        MarketParameters::from_units(
            m.spot,
            m.strike,
            m.maturity,
            m.rate,
            volatility,
            m.dividend_yield,
            self.units,
        )
    }

    /// The instrument with its unit-bearing fields in fractions.
    pub fn instrument(&self) -> InstrumentSpec {
        self.instrument.in_fractions(self.units)
    }

    /// Convert a fraction back to the request's units for display.
    pub fn display_units(&self, fraction: f64) -> f64 {
        match self.units {
            Units::Fraction => fraction,
            Units::Percent => fraction * 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const ASIAN: &str = r#"
        units = "percent"
        direction = "call"

        [market]
        spot = 100.0
        strike = 100.0
        maturity = 1.0
        rate = 5.0
        volatility = 20.0
        dividend_yield = 1.0

        [instrument]
        kind = "arithmetic_asian"
        observations = 12
        paths = 50000
        use_control_variate = true
    "#;

    #[test]
    fn percent_request_converts_to_fractions() {
        let request = PricingRequest::from_toml_str(ASIAN).unwrap();
        let market = request.market().unwrap();
        assert_abs_diff_eq!(market.rate, 0.05, epsilon = 1e-15);
        assert_abs_diff_eq!(market.volatility, 0.2, epsilon = 1e-15);
        assert_abs_diff_eq!(market.dividend_yield, 0.01, epsilon = 1e-15);
        assert_eq!(request.instrument().name(), "arithmetic_asian");
        assert_abs_diff_eq!(request.display_units(0.2), 20.0, epsilon = 1e-12);
    }

    #[test]
    fn basket_second_asset_is_converted() {
        let request = PricingRequest::from_toml_str(
            r#"
            units = "percent"
            direction = "put"

            [market]
            spot = 100.0
            strike = 95.0
            maturity = 0.5
            rate = 3.0
            volatility = 25.0

            [instrument]
            kind = "geometric_basket"
            second = { spot = 90.0, volatility = 30.0, correlation = 0.4 }
            "#,
        )
        .unwrap();
        match request.instrument() {
            InstrumentSpec::GeometricBasket { second } => {
                assert_abs_diff_eq!(second.volatility, 0.3, epsilon = 1e-15);
                assert_eq!(second.correlation, 0.4);
            }
            other => panic!("unexpected instrument {other:?}"),
        }
    }

    #[test]
    fn defaults_to_fractions_and_a_european() {
        let request = PricingRequest::from_toml_str(
            r#"
            direction = "put"
            market_price = 5.57
            market = { spot = 100.0, strike = 100.0, maturity = 1.0, rate = 0.05 }
            "#,
        )
        .unwrap();
        assert_eq!(request.units, Units::Fraction);
        assert_eq!(request.instrument, InstrumentSpec::European);
        assert_eq!(request.market_price, Some(5.57));
        assert!(request.market().is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = PricingRequest::from_toml_str(
            r#"
            direction = "call"
            sigma = 0.2
            market = { spot = 100.0, strike = 100.0, maturity = 1.0, rate = 0.05 }
            "#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("sigma"), "{err:#}");
    }

    #[test]
    fn bundled_requests_parse() {
        for (name, text) in [
            ("european", include_str!("../requests/european.toml")),
            ("asian_percent", include_str!("../requests/asian_percent.toml")),
            ("basket", include_str!("../requests/basket.toml")),
            ("barrier", include_str!("../requests/barrier.toml")),
            ("implied_vol", include_str!("../requests/implied_vol.toml")),
        ] {
            let request = PricingRequest::from_toml_str(text)
                .unwrap_or_else(|e| panic!("{name}: {e:#}"));
            let simulated = !matches!(name, "european" | "implied_vol");
            assert_eq!(request.instrument().is_simulated(), simulated, "{name}");
        }
    }
}
