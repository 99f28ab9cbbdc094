//! Parameter validation.
//!
//! Every check runs and every failure is collected, so the caller sees the
//! complete list of problems at once. Pricers assume inputs that passed
//! [`validate`] and only guard the conditions that would break their own
//! arithmetic.

use crate::instrument::{InstrumentSpec, SecondAsset};
use crate::market::MarketParameters;
use crate::payoff::OptionDirection;
use op_core::{Error, Real, Result, Size, Violation};
use std::ops::RangeInclusive;

/// Plausibility limits applied by the validation layer (fraction units).
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    /// Longest accepted time to expiry, in years.
    pub max_maturity: Real,
    /// Highest accepted volatility.
    pub max_volatility: Real,
    /// Accepted risk-free rates.
    pub rate: RangeInclusive<Real>,
    /// Highest accepted dividend yield.
    pub max_dividend_yield: Real,
    /// Accepted Asian averaging date counts.
    pub asian_observations: RangeInclusive<Size>,
    /// Accepted binomial step counts.
    pub lattice_steps: RangeInclusive<Size>,
    /// Accepted Monte Carlo path counts.
    pub paths: RangeInclusive<Size>,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            max_maturity: 100.0,
            max_volatility: 2.0,
            rate: -0.1..=0.5,
            max_dividend_yield: 1.0,
            asian_observations: 2..=52,
            lattice_steps: 10..=10_000,
            paths: 1_000..=1_000_000,
        }
    }
}

/// Validate a pricing request against the default [`Bounds`].
pub fn validate(
    direction: OptionDirection,
    spec: &InstrumentSpec,
    market: &MarketParameters,
) -> Result<()> {
    into_result(violations(direction, spec, market, &Bounds::default()))
}

/// Validate the inputs of an implied-volatility search.
///
/// The volatility field of `market` is ignored.
pub fn validate_implied_volatility(market_price: Real, market: &MarketParameters) -> Result<()> {
    let bounds = Bounds::default();
    let mut out = Vec::new();
    positive(&mut out, "market_price", market_price);
    positive(&mut out, "spot", market.spot);
    positive(&mut out, "strike", market.strike);
    check_maturity(market.maturity, &bounds, &mut out);
    check_rate(market.rate, &bounds, &mut out);
    check_dividend_yield("dividend_yield", market.dividend_yield, &bounds, &mut out);
    into_result(out)
}

/// All constraint violations of a pricing request.
pub fn violations(
    direction: OptionDirection,
    spec: &InstrumentSpec,
    market: &MarketParameters,
    bounds: &Bounds,
) -> Vec<Violation> {
    let mut out = Vec::new();
    check_market(market, bounds, &mut out);

    match *spec {
        InstrumentSpec::European => {}
        InstrumentSpec::American { steps } => {
            in_range(&mut out, "steps", steps, &bounds.lattice_steps);
        }
        InstrumentSpec::GeometricAsian { observations } => {
            in_range(&mut out, "observations", observations, &bounds.asian_observations);
        }
        InstrumentSpec::ArithmeticAsian {
            observations,
            paths,
            ..
        } => {
            in_range(&mut out, "observations", observations, &bounds.asian_observations);
            in_range(&mut out, "paths", paths, &bounds.paths);
        }
        InstrumentSpec::GeometricBasket { second } => check_second_asset(&second, bounds, &mut out),
        InstrumentSpec::ArithmeticBasket { second, paths, .. } => {
            check_second_asset(&second, bounds, &mut out);
            in_range(&mut out, "paths", paths, &bounds.paths);
        }
        InstrumentSpec::Barrier {
            lower,
            upper,
            observations,
            rebate,
        } => {
            if direction != OptionDirection::Put {
                out.push(Violation::new(
                    "direction",
                    "the knock-in/knock-out barrier pays a put",
                ));
            }
            positive(&mut out, "lower_barrier", lower);
            if !(upper > lower) {
                out.push(Violation::new(
                    "upper_barrier",
                    format!("must exceed the lower barrier {lower}, got {upper}"),
                ));
            }
            if observations < 1 {
                out.push(Violation::new("observations", "at least one monitoring date is required"));
            }
            if !(rebate >= 0.0) {
                out.push(Violation::new("rebate", format!("must be non-negative, got {rebate}")));
            }
        }
    }
    out
}

fn into_result(violations: Vec<Violation>) -> Result<()> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(violations))
    }
}

fn check_market(market: &MarketParameters, bounds: &Bounds, out: &mut Vec<Violation>) {
    positive(out, "spot", market.spot);
    positive(out, "strike", market.strike);
    check_maturity(market.maturity, bounds, out);
    check_volatility("volatility", market.volatility, bounds, out);
    check_rate(market.rate, bounds, out);
    check_dividend_yield("dividend_yield", market.dividend_yield, bounds, out);
}

fn check_second_asset(second: &SecondAsset, bounds: &Bounds, out: &mut Vec<Violation>) {
    positive(out, "second_spot", second.spot);
    check_volatility("second_volatility", second.volatility, bounds, out);
    check_dividend_yield("second_dividend_yield", second.dividend_yield, bounds, out);
    if !(-1.0..=1.0).contains(&second.correlation) {
        out.push(Violation::new(
            "correlation",
            format!("must lie in [-1, 1], got {}", second.correlation),
        ));
    }
}

fn check_maturity(maturity: Real, bounds: &Bounds, out: &mut Vec<Violation>) {
    positive(out, "maturity", maturity);
    if maturity > bounds.max_maturity {
        out.push(Violation::new(
            "maturity",
            format!("must not exceed {} years, got {maturity}", bounds.max_maturity),
        ));
    }
}

fn check_volatility(field: &'static str, sigma: Real, bounds: &Bounds, out: &mut Vec<Violation>) {
    positive(out, field, sigma);
    if sigma > bounds.max_volatility {
        out.push(Violation::new(
            field,
            format!("must not exceed {}, got {sigma}", bounds.max_volatility),
        ));
    }
}

fn check_rate(rate: Real, bounds: &Bounds, out: &mut Vec<Violation>) {
    if !bounds.rate.contains(&rate) {
        out.push(Violation::new(
            "rate",
            format!(
                "must lie in [{}, {}], got {rate}",
                bounds.rate.start(),
                bounds.rate.end()
            ),
        ));
    }
}

fn check_dividend_yield(field: &'static str, q: Real, bounds: &Bounds, out: &mut Vec<Violation>) {
    if !(0.0..=bounds.max_dividend_yield).contains(&q) {
        out.push(Violation::new(
            field,
            format!("must lie in [0, {}], got {q}", bounds.max_dividend_yield),
        ));
    }
}

// `!(x > 0)` also rejects NaN
fn positive(out: &mut Vec<Violation>, field: &'static str, x: Real) {
    if !(x > 0.0) || !x.is_finite() {
        out.push(Violation::new(field, format!("must be positive, got {x}")));
    }
}

fn in_range(out: &mut Vec<Violation>, field: &'static str, n: Size, range: &RangeInclusive<Size>) {
    if !range.contains(&n) {
        out.push(Violation::new(
            field,
            format!("must lie in [{}, {}], got {n}", range.start(), range.end()),
        ));
    }
}
