//! Closed form for discretely monitored geometric-average Asian options.
//!
//! With `n` equally spaced averaging dates `t_i = i·T/n`, `i = 1..n`, the
//! geometric average of a GBM is log-normal with
//!
//! ```text
//! σ_adj = σ·√[(n+1)(2n+1) / (6n²)]
//! μ_adj = (r − q − σ²/2)·(n+1)/(2n) + σ_adj²/2
//! ```
//!
//! so the option is priced by Black's formula on `S·e^{μ_adj·T}`.

use crate::analytic_european_engine::black_formula;
use op_core::{ensure, errors::Result, Real, Size};
use op_instruments::{MarketParameters, OptionDirection};

/// Volatility and growth rate of the discrete geometric average.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricAverageMoments {
    /// `σ_adj`.
    pub volatility: Real,
    /// `μ_adj`, the continuously compounded growth rate of `E[G]`.
    pub growth: Real,
}

impl GeometricAverageMoments {
    /// Moments for `observations` averaging dates.
    pub fn new(market: &MarketParameters, observations: Size) -> Self {
        let n = observations as Real;
        let sigma = market.volatility;
        let volatility = sigma * ((n + 1.0) * (2.0 * n + 1.0) / (6.0 * n * n)).sqrt();
        let growth = (market.rate - market.dividend_yield - 0.5 * sigma * sigma) * (n + 1.0)
            / (2.0 * n)
            + 0.5 * volatility * volatility;
        Self { volatility, growth }
    }
}

/// Price of a geometric-average Asian option with `observations` dates.
///
/// Fails with a domain error for non-positive `S`, `K`, `T`, `σ` or zero
/// observations.
pub fn geometric_asian(
    direction: OptionDirection,
    market: &MarketParameters,
    observations: Size,
) -> Result<Real> {
    ensure!(observations > 0, "at least one averaging date is required");
    ensure!(market.spot > 0.0, "spot must be positive, got {}", market.spot);
    ensure!(market.strike > 0.0, "strike must be positive, got {}", market.strike);
    ensure!(market.maturity > 0.0, "time to expiry must be positive, got {}", market.maturity);
    ensure!(market.volatility > 0.0, "volatility must be positive, got {}", market.volatility);

    let moments = GeometricAverageMoments::new(market, observations);
    let t = market.maturity;
    Ok(black_formula(
        direction,
        market.spot * (moments.growth * t).exp(),
        market.strike,
        moments.volatility * t.sqrt(),
        market.discount(),
    ))
}
