//! Binomial lattice engine.
//!
//! Builds a Cox-Ross-Rubinstein tree for the option's Black-Scholes process
//! and rolls the vanilla payoff back to the root with early exercise.

use op_core::{errors::Result, Real, Size};
use op_instruments::{MarketParameters, OptionDirection, PlainVanillaPayoff};
use op_methods::{price_american, BinomialTree};
use op_processes::BlackScholesProcess;
use tracing::warn;

fn build_tree(market: &MarketParameters, steps: Size) -> Result<BinomialTree> {
    let process = BlackScholesProcess::new(
        market.spot,
        market.rate,
        market.dividend_yield,
        market.volatility,
    )?;
    BinomialTree::cox_ross_rubinstein(&process, market.maturity, steps).map_err(|e| {
        warn!(steps, sigma = market.volatility, error = %e, "binomial tree rejected");
        e
    })
}

/// American option price on an `N`-step CRR tree.
///
/// Fails with a domain error for non-positive spot, volatility or expiry, and
/// with a numerical-instability error if the risk-neutral probability leaves
/// `(0, 1)`.
pub fn binomial_american(
    direction: OptionDirection,
    market: &MarketParameters,
    steps: Size,
) -> Result<Real> {
    let tree = build_tree(market, steps)?;
    let payoff = PlainVanillaPayoff::new(direction, market.strike);
    Ok(price_american(&tree, &|s| payoff.value(s)))
}
