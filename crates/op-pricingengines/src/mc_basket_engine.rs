//! Monte Carlo engine for two-asset arithmetic basket options.
//!
//! The payoff depends on the terminal prices only, so each path is a single
//! exact step to `T`. The second asset's normal is `ρ·Z1 + √(1 − ρ²)·Z1'`.
//! The geometric basket `√(S1·S2)` on the same draw is the control variate.

use crate::analytic_basket_engine::geometric_basket;
use op_core::{errors::Result, Real};
use op_instruments::{MarketParameters, OptionDirection, PlainVanillaPayoff, SecondAsset};
use op_math::{GaussianRng, PairedStatistics, Statistics};
use op_methods::{control_variate_estimate, simulate, MonteCarloEstimate, SimulationSettings};
use op_processes::{BlackScholesProcess, CorrelatedBlackScholesPair};
use tracing::debug;

/// Monte Carlo price of an option on the arithmetic average `(S1 + S2)/2`.
pub fn mc_arithmetic_basket(
    direction: OptionDirection,
    market: &MarketParameters,
    second: &SecondAsset,
    use_control_variate: bool,
    settings: &SimulationSettings,
) -> Result<MonteCarloEstimate> {
    let pair = CorrelatedBlackScholesPair::new(
        BlackScholesProcess::new(
            market.spot,
            market.rate,
            market.dividend_yield,
            market.volatility,
        )?,
        BlackScholesProcess::new(
            second.spot,
            market.rate,
            second.dividend_yield,
            second.volatility,
        )?,
        second.correlation,
    )?;
    let maturity = market.maturity;
    let rho = pair.correlation();
    let payoff = PlainVanillaPayoff::new(direction, market.strike);
    let discount = market.discount();

    let sample = |rng: &mut GaussianRng| -> (Real, Real) {
        let (z1, z2) = rng.next_correlated_pair(rho);
        let (s1, s2) = pair.evolve_pair(maturity, z1, z2);
        (
            discount * payoff.value(0.5 * (s1 + s2)),
            discount * payoff.value((s1 * s2).sqrt()),
        )
    };

    let estimate = if use_control_variate {
        let control = geometric_basket(direction, market, second)?;
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
        rho = second.correlation,
        paths = estimate.paths,
        control_variate = use_control_variate,
        price = estimate.price,
        half_width = estimate.confidence,
        "arithmetic basket priced"
    );
    Ok(estimate)
}
