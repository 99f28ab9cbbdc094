//! Monte Carlo engine for arithmetic-average Asian options.
//!
//! Each path is sampled at the `n` averaging dates `t_i = i·T/n`. The
//! geometric average of the same path is the control variate: its expectation
//! is known in closed form (see [`geometric_asian`]).

use crate::analytic_asian_engine::geometric_asian;
use op_core::{ensure, errors::Result, Real, Size};
use op_instruments::{MarketParameters, OptionDirection, PlainVanillaPayoff};
use op_math::{GaussianRng, PairedStatistics, Statistics};
use op_methods::{
    control_variate_estimate, simulate, MonteCarloEstimate, PathGenerator, SimulationSettings,
};
use op_processes::BlackScholesProcess;
use tracing::debug;

/// Monte Carlo price of an arithmetic-average Asian option.
///
/// Runs `settings.paths` paths. With `use_control_variate` the estimate is
/// adjusted by the geometric-average payoff against its analytic price.
pub fn mc_arithmetic_asian(
    direction: OptionDirection,
    market: &MarketParameters,
    observations: Size,
    use_control_variate: bool,
    settings: &SimulationSettings,
) -> Result<MonteCarloEstimate> {
    ensure!(observations > 0, "at least one averaging date is required");
    let process = BlackScholesProcess::new(
        market.spot,
        market.rate,
        market.dividend_yield,
        market.volatility,
    )?;
    ensure!(market.maturity > 0.0, "time to expiry must be positive, got {}", market.maturity);

    let generator = PathGenerator::new(&process, market.maturity, observations);
    let payoff = PlainVanillaPayoff::new(direction, market.strike);
    let discount = market.discount();
    let n = observations as Real;

    // (arithmetic, geometric) discounted payoffs of one path
    let sample = |rng: &mut GaussianRng| -> (Real, Real) {
        let (mut sum, mut log_sum) = (0.0, 0.0);
        generator.walk(rng, |_, s| {
            sum += s;
            log_sum += s.ln();
        });
        (
            discount * payoff.value(sum / n),
            discount * payoff.value((log_sum / n).exp()),
        )
    };

    let estimate = if use_control_variate {
        let control = geometric_asian(direction, market, observations)?;
        let stats: PairedStatistics = simulate(settings, |rng, acc: &mut PairedStatistics| {
            let (arithmetic, geometric) = sample(rng);
            acc.add(arithmetic, geometric);
        })?;
        control_variate_estimate(&stats, control)?
    } else {
        let stats: Statistics = simulate(settings, |rng, acc: &mut Statistics| {
            acc.add(sample(rng).0);
        })?;
        MonteCarloEstimate::from_statistics(&stats)?
    };

    debug!(
        %direction,
        observations,
        paths = estimate.paths,
        control_variate = use_control_variate,
        price = estimate.price,
        half_width = estimate.confidence,
        "arithmetic asian priced"
    );
    Ok(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market() -> MarketParameters {
        MarketParameters::new(100.0, 100.0, 1.0, 0.05, 0.3, 0.0)
    }

    fn settings(paths: Size) -> SimulationSettings {
        SimulationSettings {
            paths,
            parallel: false,
            ..SimulationSettings::default()
        }
    }

    #[test]
    fn arithmetic_call_exceeds_geometric_call() {
        let est = mc_arithmetic_asian(OptionDirection::Call, &market(), 12, true, &settings(20_000))
            .unwrap();
        let geo = geometric_asian(OptionDirection::Call, &market(), 12).unwrap();
        assert!(est.price > geo, "arithmetic {} vs geometric {geo}", est.price);
        assert!(est.price < geo + 1.5);
    }

    #[test]
    fn control_variate_narrows_the_interval() {
        let plain =
            mc_arithmetic_asian(OptionDirection::Call, &market(), 12, false, &settings(20_000))
                .unwrap();
        let cv = mc_arithmetic_asian(OptionDirection::Call, &market(), 12, true, &settings(20_000))
            .unwrap();
        assert!(
            cv.confidence < 0.2 * plain.confidence,
            "cv {} plain {}",
            cv.confidence,
            plain.confidence
        );
        assert!(cv.confidence >= 0.0);
    }

    #[test]
    fn same_seed_reproduces_the_estimate() {
        let a = mc_arithmetic_asian(OptionDirection::Put, &market(), 6, false, &settings(5_000))
            .unwrap();
        let b = mc_arithmetic_asian(OptionDirection::Put, &market(), 6, false, &settings(5_000))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn put_prices_are_non_negative() {
        let deep_otm = MarketParameters::new(200.0, 100.0, 0.5, 0.05, 0.1, 0.0);
        let est = mc_arithmetic_asian(OptionDirection::Put, &deep_otm, 4, false, &settings(2_000))
            .unwrap();
        assert_eq!(est.price, 0.0);
        assert_eq!(est.confidence, 0.0);
    }
}
