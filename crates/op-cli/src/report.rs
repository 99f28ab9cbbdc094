//! Command results and their table/JSON rendering.

use crate::OutputFormat;
use anyhow::{Context, Result};
use optionpricer::pricingengines::ProfilePoint;
use optionpricer::{
    Greeks, ImpliedVolatility, InstrumentSpec, MarketParameters, OptionDirection, PriceResult,
    Units,
};
use serde::Serialize;
use std::fmt::Write;

/// Plain-text rendering of a report.
pub trait Render {
    fn table(&self) -> String;
}

/// Print `report` to stdout in `format`.
pub fn emit<R: Render + Serialize>(report: &R, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print!("{}", report.table()),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report).context("cannot encode report")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn row(out: &mut String, label: &str, value: f64) {
    let _ = writeln!(out, "{label:<16}{value:>14.6}");
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    pub instrument: &'static str,
    pub direction: OptionDirection,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_error: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
    pub intrinsic: f64,
    pub time_value: f64,
}

impl PriceReport {
    pub fn new(
        direction: OptionDirection,
        spec: &InstrumentSpec,
        market: &MarketParameters,
        result: &PriceResult,
    ) -> Self {
        let estimate = match result {
            PriceResult::Scalar(_) => None,
            PriceResult::Estimate(e) => Some(*e),
            PriceResult::Barrier(b) => Some(b.estimate),
        };
        let breakdown = result.breakdown(direction, market);
        Self {
            instrument: spec.name(),
            direction,
            price: result.price(),
            confidence: estimate.map(|e| e.confidence),
            std_error: estimate.map(|e| e.std_error),
            paths: estimate.map(|e| e.paths),
            delta: result.delta(),
            intrinsic: breakdown.intrinsic,
            time_value: breakdown.time_value,
        }
    }
}

impl Render for PriceReport {
    fn table(&self) -> String {
        let mut out = format!("{} {}\n", self.direction, self.instrument);
        row(&mut out, "price", self.price);
        if let Some(c) = self.confidence {
            row(&mut out, "95% half-width", c);
        }
        if let Some(s) = self.std_error {
            row(&mut out, "std error", s);
        }
        if let Some(p) = self.paths {
            let _ = writeln!(out, "{:<16}{:>14}", "paths", p);
        }
        if let Some(d) = self.delta {
            row(&mut out, "delta", d);
        }
        row(&mut out, "intrinsic", self.intrinsic);
        row(&mut out, "time value", self.time_value);
        out
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImpliedVolReport {
    pub direction: OptionDirection,
    pub market_price: f64,
    pub units: Units,
    #[serde(flatten)]
    pub outcome: ImpliedVolatility,
    /// The volatility in the request's units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volatility_in_units: Option<f64>,
}

impl Render for ImpliedVolReport {
    fn table(&self) -> String {
        let mut out = format!("{} implied volatility\n", self.direction);
        row(&mut out, "market price", self.market_price);
        match self.outcome {
            ImpliedVolatility::Found {
                volatility,
                iterations,
            } => {
                row(&mut out, "volatility", volatility);
                if self.units == Units::Percent {
                    let _ = writeln!(out, "{:<16}{:>13.4}%", "", volatility * 100.0);
                }
                let _ = writeln!(out, "{:<16}{:>14}", "iterations", iterations);
            }
            ImpliedVolatility::NotFound {
                iterations,
                last_estimate,
            } => {
                let _ = writeln!(out, "{:<16}{:>14}", "status", "not found");
                row(&mut out, "last estimate", last_estimate);
                let _ = writeln!(out, "{:<16}{:>14}", "iterations", iterations);
            }
        }
        out
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GreeksReport {
    pub instrument: &'static str,
    pub direction: OptionDirection,
    pub greeks: Greeks,
}

impl Render for GreeksReport {
    fn table(&self) -> String {
        let g = &self.greeks;
        let mut out = format!("{} {} greeks\n", self.direction, self.instrument);
        for (label, value) in [
            ("delta", g.delta),
            ("gamma", g.gamma),
            ("theta", g.theta),
            ("vega", g.vega),
            ("rho", g.rho),
        ] {
            row(&mut out, label, value);
        }
        out
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    pub instrument: &'static str,
    pub direction: OptionDirection,
    pub points: Vec<ProfilePoint>,
}

impl Render for ProfileReport {
    fn table(&self) -> String {
        let mut out = format!("{} {} greeks profile\n", self.direction, self.instrument);
        let _ = writeln!(
            out,
            "{:>10}{:>12}{:>10}{:>10}{:>10}{:>10}{:>10}",
            "spot", "price", "delta", "gamma", "theta", "vega", "rho"
        );
        for p in &self.points {
            let g = &p.greeks;
            let _ = writeln!(
                out,
                "{:>10.2}{:>12.4}{:>10.4}{:>10.4}{:>10.4}{:>10.3}{:>10.3}",
                p.spot, p.price, g.delta, g.gamma, g.theta, g.vega, g.rho
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use optionpricer::{MonteCarloEstimate, PricingConfig};

    fn market() -> MarketParameters {
        MarketParameters::new(110.0, 100.0, 1.0, 0.05, 0.2, 0.0)
    }

    #[test]
    fn scalar_report_omits_simulation_fields() {
        let spec = InstrumentSpec::European;
        let result =
            optionpricer::price(OptionDirection::Call, &spec, &market(), &PricingConfig::default())
                .unwrap();
        let report = PriceReport::new(OptionDirection::Call, &spec, &market(), &result);
        assert_eq!(report.intrinsic, 10.0);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["instrument"], "european");
        assert_eq!(json["direction"], "call");
        assert!(json.get("confidence").is_none());
        assert!(report.table().contains("time value"));
    }

    #[test]
    fn estimate_report_carries_the_interval() {
        let estimate = MonteCarloEstimate {
            price: 5.0,
            std_error: 0.01,
            confidence: 0.0196,
            paths: 10_000,
        };
        let spec = InstrumentSpec::ArithmeticAsian {
            observations: 12,
            paths: 10_000,
            use_control_variate: true,
        };
        let report = PriceReport::new(
            OptionDirection::Put,
            &spec,
            &market(),
            &PriceResult::Estimate(estimate),
        );
        assert_eq!(report.confidence, Some(0.0196));
        assert_eq!(report.paths, Some(10_000));
        let table = report.table();
        assert!(table.contains("95% half-width"), "{table}");
        assert!(table.contains("10000"), "{table}");
    }

    #[test]
    fn implied_vol_json_is_flat() {
        let report = ImpliedVolReport {
            direction: OptionDirection::Call,
            market_price: 10.45,
            units: Units::Fraction,
            outcome: ImpliedVolatility::Found {
                volatility: 0.2,
                iterations: 14,
            },
            volatility_in_units: Some(0.2),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "found");
        assert_eq!(json["volatility"], 0.2);
        assert_eq!(json["iterations"], 14);
    }

    #[test]
    fn not_found_is_rendered() {
        let report = ImpliedVolReport {
            direction: OptionDirection::Put,
            market_price: 3.0,
            units: Units::Fraction,
            outcome: ImpliedVolatility::NotFound {
                iterations: 1000,
                last_estimate: 0.31,
            },
            volatility_in_units: None,
        };
        assert!(report.table().contains("not found"));
    }
}
