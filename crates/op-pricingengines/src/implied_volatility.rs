//! Implied volatility by bisection on the Black-Scholes price.

use crate::analytic_european_engine::black_scholes_unchecked;
use op_core::{ensure, errors::Error, errors::Result, Real, Size, Volatility};
use op_instruments::{MarketParameters, OptionDirection};
use op_math::{bisection_search, BisectionOutcome, BisectionSettings};
use serde::Serialize;
use tracing::{debug, warn};

/// Outcome of an implied-volatility search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImpliedVolatility {
    /// A volatility reproducing the market price within tolerance.
    Found {
        /// The implied volatility (fraction).
        volatility: Volatility,
        /// Black-Scholes evaluations used.
        iterations: Size,
    },
    /// The iteration budget ran out.
    NotFound {
        /// Black-Scholes evaluations used.
        iterations: Size,
        /// The last volatility tried.
        last_estimate: Volatility,
    },
}

impl ImpliedVolatility {
    /// The volatility, if one was found.
    pub fn volatility(&self) -> Option<Volatility> {
        match *self {
            ImpliedVolatility::Found { volatility, .. } => Some(volatility),
            ImpliedVolatility::NotFound { .. } => None,
        }
    }
}

/// No-arbitrage bounds `(lower, upper)` of a European option price.
///
/// The lower bound is the zero-volatility price
/// `max(φ(S e^{−qT} − K e^{−rT}), 0)`; the upper bound is `S e^{−qT}` for a
/// call and `K e^{−rT}` for a put.
pub fn price_bounds(direction: OptionDirection, market: &MarketParameters) -> (Real, Real) {
    let spot = market.spot * market.dividend_discount();
    let strike = market.strike * market.discount();
    let lower = (direction.sign() * (spot - strike)).max(0.0);
    let upper = match direction {
        OptionDirection::Call => spot,
        OptionDirection::Put => strike,
    };
    (lower, upper)
}

/// Volatility at which the Black-Scholes price equals `market_price`.
///
/// The volatility field of `market` is ignored. Fails with
/// [`Error::PriceOutOfBounds`] when the price lies outside
/// [`price_bounds`]; running out of iterations is reported as
/// [`ImpliedVolatility::NotFound`].
pub fn implied_volatility(
    direction: OptionDirection,
    market_price: Real,
    market: &MarketParameters,
    settings: &BisectionSettings,
) -> Result<ImpliedVolatility> {
    ensure!(market.spot > 0.0, "spot must be positive, got {}", market.spot);
    ensure!(market.strike > 0.0, "strike must be positive, got {}", market.strike);
    ensure!(market.maturity > 0.0, "time to expiry must be positive, got {}", market.maturity);

    let (lower, upper) = price_bounds(direction, market);
    if !(lower..=upper).contains(&market_price) {
        return Err(Error::PriceOutOfBounds {
            price: market_price,
            lower,
            upper,
        });
    }

    let outcome = bisection_search(
        |sigma| black_scholes_unchecked(direction, market, sigma),
        market_price,
        settings,
    );
    Ok(match outcome {
        BisectionOutcome::Converged { x, iterations } => {
            debug!(%direction, market_price, volatility = x, iterations, "implied volatility found");
            ImpliedVolatility::Found {
                volatility: x,
                iterations,
            }
        }
        BisectionOutcome::NotConverged { last, iterations } => {
            warn!(%direction, market_price, last, iterations, "implied volatility not found");
            ImpliedVolatility::NotFound {
                iterations,
                last_estimate: last,
            }
        }
    })
}
