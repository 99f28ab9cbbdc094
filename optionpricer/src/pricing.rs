//! Single pricing entry point dispatching on [`InstrumentSpec`].

use crate::config::PricingConfig;
use op_core::{errors::Result, Real, Size};
use op_instruments::{validate, InstrumentSpec, MarketParameters, OptionDirection};
use op_methods::MonteCarloEstimate;
use op_pricingengines::{
    binomial_american, black_scholes, finite_difference_greeks, geometric_asian, geometric_basket,
    greeks_profile, mc_arithmetic_asian, mc_arithmetic_basket, mc_barrier, BarrierEstimate,
    BumpSizes, Greeks, KikoPut, ProfilePoint,
};
use serde::Serialize;
use tracing::{info, info_span};

/// Result of a pricing call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceResult {
    /// Closed-form or lattice price.
    Scalar(Real),
    /// Monte Carlo estimate with confidence interval.
    Estimate(MonteCarloEstimate),
    /// Barrier estimate with its bumped delta.
    Barrier(BarrierEstimate),
}

impl PriceResult {
    /// The price (or price estimate).
    pub fn price(&self) -> Real {
        match self {
            PriceResult::Scalar(p) => *p,
            PriceResult::Estimate(e) => e.price,
            PriceResult::Barrier(b) => b.estimate.price,
        }
    }

    /// Half-width of the 95 % confidence interval, for simulated prices.
    pub fn confidence(&self) -> Option<Real> {
        match self {
            PriceResult::Scalar(_) => None,
            PriceResult::Estimate(e) => Some(e.confidence),
            PriceResult::Barrier(b) => Some(b.estimate.confidence),
        }
    }

    /// Simulated delta, for barrier prices.
    pub fn delta(&self) -> Option<Real> {
        match self {
            PriceResult::Barrier(b) => Some(b.delta),
            _ => None,
        }
    }

    /// Intrinsic and time value split of the price.
    pub fn breakdown(&self, direction: OptionDirection, market: &MarketParameters) -> PriceBreakdown {
        PriceBreakdown::new(direction, market, self.price())
    }
}

/// A price split into intrinsic value `max(φ(S − K), 0)` and time value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBreakdown {
    /// The option price.
    pub price: Real,
    /// Value of immediate exercise.
    pub intrinsic: Real,
    /// `price − intrinsic`.
    pub time_value: Real,
}

impl PriceBreakdown {
    /// Split `price` for an option on `market`.
    pub fn new(direction: OptionDirection, market: &MarketParameters, price: Real) -> Self {
        let intrinsic = (direction.sign() * (market.spot - market.strike)).max(0.0);
        Self {
            price,
            intrinsic,
            time_value: price - intrinsic,
        }
    }
}

/// Validate and price `spec` on `market`.
///
/// Fails with [`Error::Validation`](op_core::Error::Validation) listing every
/// out-of-range input before any pricer runs.
pub fn price(
    direction: OptionDirection,
    spec: &InstrumentSpec,
    market: &MarketParameters,
    config: &PricingConfig,
) -> Result<PriceResult> {
    let span = info_span!("price", instrument = spec.name(), %direction);
    let _guard = span.enter();

    validate(direction, spec, market)?;
    config.validate()?;
    let result = dispatch(direction, spec, market, config)?;

    info!(price = result.price(), confidence = ?result.confidence(), "priced");
    Ok(result)
}

fn dispatch(
    direction: OptionDirection,
    spec: &InstrumentSpec,
    market: &MarketParameters,
    config: &PricingConfig,
) -> Result<PriceResult> {
    Ok(match *spec {
        InstrumentSpec::European => PriceResult::Scalar(black_scholes(direction, market)?),
        InstrumentSpec::American { steps } => {
            PriceResult::Scalar(binomial_american(direction, market, steps)?)
        }
        InstrumentSpec::GeometricAsian { observations } => {
            PriceResult::Scalar(geometric_asian(direction, market, observations)?)
        }
        InstrumentSpec::ArithmeticAsian {
            observations,
            paths,
            use_control_variate,
        } => PriceResult::Estimate(mc_arithmetic_asian(
            direction,
            market,
            observations,
            use_control_variate,
            &config.simulation(paths),
        )?),
        InstrumentSpec::GeometricBasket { second } => {
            PriceResult::Scalar(geometric_basket(direction, market, &second)?)
        }
        InstrumentSpec::ArithmeticBasket {
            second,
            paths,
            use_control_variate,
        } => PriceResult::Estimate(mc_arithmetic_basket(
            direction,
            market,
            &second,
            use_control_variate,
            &config.simulation(paths),
        )?),
        InstrumentSpec::Barrier {
            lower,
            upper,
            observations,
            rebate,
        } => {
            let contract = KikoPut::new(market.strike, lower, upper, observations, rebate)?;
            PriceResult::Barrier(mc_barrier(
                market,
                &contract,
                &config.simulation(config.barrier_paths),
                config.barrier_delta,
            )?)
        }
    })
}

/// Finite-difference Greeks of any instrument.
///
/// Simulated instruments are re-run with the configured seed at every bump,
/// so all bumps share the same random numbers.
pub fn sensitivities(
    direction: OptionDirection,
    spec: &InstrumentSpec,
    market: &MarketParameters,
    config: &PricingConfig,
) -> Result<Greeks> {
    validate(direction, spec, market)?;
    config.validate()?;
    finite_difference_greeks(market, &BumpSizes::default(), |m| {
        dispatch(direction, spec, m, config).map(|r| r.price())
    })
}

/// Price and Greeks over `steps + 1` spots from 70 % to 130 % of the
/// current spot.
pub fn sensitivity_profile(
    direction: OptionDirection,
    spec: &InstrumentSpec,
    market: &MarketParameters,
    config: &PricingConfig,
    steps: Size,
) -> Result<Vec<ProfilePoint>> {
    validate(direction, spec, market)?;
    config.validate()?;
    greeks_profile(market, &BumpSizes::default(), steps, |m| {
        dispatch(direction, spec, m, config).map(|r| r.price())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use op_core::Error;
    use op_instruments::SecondAsset;

    fn market() -> MarketParameters {
        MarketParameters::new(100.0, 100.0, 1.0, 0.05, 0.2, 0.0)
    }

    fn config() -> PricingConfig {
        PricingConfig {
            parallel: false,
            barrier_paths: 10_000,
            ..PricingConfig::default()
        }
    }

    #[test]
    fn european_dispatch_is_scalar() {
        let r = price(OptionDirection::Call, &InstrumentSpec::European, &market(), &config())
            .unwrap();
        assert!(matches!(r, PriceResult::Scalar(_)));
        assert_abs_diff_eq!(r.price(), 10.4506, epsilon = 1e-4);
        assert_eq!(r.confidence(), None);
    }

    #[test]
    fn every_variant_prices() {
        let second = SecondAsset::new(100.0, 0.25, 0.0, 0.5);
        let specs = [
            InstrumentSpec::European,
            InstrumentSpec::American { steps: 200 },
            InstrumentSpec::GeometricAsian { observations: 12 },
            InstrumentSpec::ArithmeticAsian {
                observations: 12,
                paths: 5_000,
                use_control_variate: true,
            },
            InstrumentSpec::GeometricBasket { second },
            InstrumentSpec::ArithmeticBasket {
                second,
                paths: 5_000,
                use_control_variate: false,
            },
            InstrumentSpec::Barrier {
                lower: 80.0,
                upper: 130.0,
                observations: 12,
                rebate: 1.0,
            },
        ];
        for spec in specs {
            let r = price(OptionDirection::Put, &spec, &market(), &config()).unwrap();
            assert!(r.price() >= 0.0, "{}: {}", spec.name(), r.price());
            assert_eq!(r.confidence().is_some(), spec.is_simulated(), "{}", spec.name());
        }
    }

    #[test]
    fn invalid_requests_never_reach_a_pricer() {
        let err = price(
            OptionDirection::Call,
            &InstrumentSpec::American { steps: 5 },
            &market().with_volatility(-0.2),
            &config(),
        )
        .unwrap_err();
        match err {
            Error::Validation(v) => assert_eq!(v.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn breakdown_splits_intrinsic_and_time_value() {
        let itm = market().with_spot(110.0);
        let r = price(OptionDirection::Call, &InstrumentSpec::European, &itm, &config()).unwrap();
        let b = r.breakdown(OptionDirection::Call, &itm);
        assert_eq!(b.intrinsic, 10.0);
        assert_abs_diff_eq!(b.time_value, r.price() - 10.0, epsilon = 1e-12);
        assert!(b.time_value > 0.0);
    }

    #[test]
    fn monte_carlo_greeks_use_common_random_numbers() {
        let spec = InstrumentSpec::ArithmeticAsian {
            observations: 12,
            paths: 20_000,
            use_control_variate: true,
        };
        let g = sensitivities(OptionDirection::Call, &spec, &market(), &config()).unwrap();
        // an Asian call's delta sits between zero and the European delta
        assert!(g.delta > 0.3 && g.delta < 0.64, "delta {}", g.delta);
        assert!(g.vega > 0.0, "vega {}", g.vega);
    }

    #[test]
    fn lattice_greeks_match_european_for_calls() {
        let american = sensitivities(
            OptionDirection::Call,
            &InstrumentSpec::American { steps: 1000 },
            &market(),
            &config(),
        )
        .unwrap();
        let european =
            sensitivities(OptionDirection::Call, &InstrumentSpec::European, &market(), &config())
                .unwrap();
        assert_abs_diff_eq!(american.delta, european.delta, epsilon = 0.03);
    }

    #[test]
    fn profile_has_one_point_per_grid_spot() {
        let profile = sensitivity_profile(
            OptionDirection::Put,
            &InstrumentSpec::European,
            &market(),
            &config(),
            50,
        )
        .unwrap();
        assert_eq!(profile.len(), 51);
        assert!(profile.first().unwrap().greeks.delta < profile.last().unwrap().greeks.delta);
    }
}
