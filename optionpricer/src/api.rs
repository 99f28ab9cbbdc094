//! Flat function API.
//!
//! One function per pricing task, taking plain numbers. Rates,
//! volatilities, dividend yields and correlations are decimal fractions.
//! Every function validates its inputs first and reports all violations
//! together as [`Error::Validation`](op_core::Error::Validation).
//!
//! Simulated prices use [`PricingConfig::default`]; call
//! [`price`](crate::price) with a custom [`PricingConfig`] to choose the
//! seed or path budget.

use crate::config::PricingConfig;
use op_core::{errors::Result, Rate, Real, Size, Time, Volatility};
use op_instruments::{
    validate, validate_implied_volatility, InstrumentSpec, MarketParameters, OptionDirection,
    SecondAsset,
};
use op_methods::MonteCarloEstimate;
use op_pricingengines::{
    binomial_american, black_scholes, finite_difference_greeks, geometric_asian, geometric_basket,
    mc_arithmetic_asian, mc_arithmetic_basket, mc_barrier, BarrierEstimate, BumpSizes, Greeks,
    ImpliedVolatility, KikoPut,
};

/// Black-Scholes price of a European option.
pub fn price_european(
    direction: OptionDirection,
    s: Real,
    k: Real,
    t: Time,
    r: Rate,
    sigma: Volatility,
    q: Rate,
) -> Result<Real> {
    let market = MarketParameters::new(s, k, t, r, sigma, q);
    validate(direction, &InstrumentSpec::European, &market)?;
    black_scholes(direction, &market)
}

/// Cox-Ross-Rubinstein price of an American option.
#[allow(clippy::too_many_arguments)]
pub fn price_american(
    direction: OptionDirection,
    s: Real,
    k: Real,
    t: Time,
    r: Rate,
    sigma: Volatility,
    steps: Size,
    q: Rate,
) -> Result<Real> {
    let market = MarketParameters::new(s, k, t, r, sigma, q);
    validate(direction, &InstrumentSpec::American { steps }, &market)?;
    binomial_american(direction, &market, steps)
}

/// Closed-form price of a discretely monitored geometric Asian option
/// with `n` equally spaced averaging dates.
#[allow(clippy::too_many_arguments)]
pub fn price_geometric_asian(
    direction: OptionDirection,
    s: Real,
    k: Real,
    t: Time,
    r: Rate,
    sigma: Volatility,
    n: Size,
    q: Rate,
) -> Result<Real> {
    let market = MarketParameters::new(s, k, t, r, sigma, q);
    validate(direction, &InstrumentSpec::GeometricAsian { observations: n }, &market)?;
    geometric_asian(direction, &market, n)
}

/// Monte Carlo price of an arithmetic Asian option, optionally using the
/// geometric Asian as control variate.
#[allow(clippy::too_many_arguments)]
pub fn price_arithmetic_asian(
    direction: OptionDirection,
    s: Real,
    k: Real,
    t: Time,
    r: Rate,
    sigma: Volatility,
    n: Size,
    paths: Size,
    use_control_variate: bool,
    q: Rate,
) -> Result<MonteCarloEstimate> {
    let market = MarketParameters::new(s, k, t, r, sigma, q);
    let spec = InstrumentSpec::ArithmeticAsian {
        observations: n,
        paths,
        use_control_variate,
    };
    validate(direction, &spec, &market)?;
    let settings = PricingConfig::default().simulation(paths);
    mc_arithmetic_asian(direction, &market, n, use_control_variate, &settings)
}

/// Closed-form price of an option on the geometric mean of two assets.
///
/// Both assets pay the dividend yield `q`.
#[allow(clippy::too_many_arguments)]
pub fn price_geometric_basket(
    direction: OptionDirection,
    s1: Real,
    s2: Real,
    k: Real,
    t: Time,
    r: Rate,
    sigma1: Volatility,
    sigma2: Volatility,
    rho: Real,
    q: Rate,
) -> Result<Real> {
    let market = MarketParameters::new(s1, k, t, r, sigma1, q);
    let second = SecondAsset::new(s2, sigma2, q, rho);
    validate(direction, &InstrumentSpec::GeometricBasket { second }, &market)?;
    geometric_basket(direction, &market, &second)
}

/// Monte Carlo price of an option on the arithmetic mean of two assets,
/// optionally using the geometric basket as control variate.
///
/// Both assets pay the dividend yield `q`.
#[allow(clippy::too_many_arguments)]
pub fn price_arithmetic_basket(
    direction: OptionDirection,
    s1: Real,
    s2: Real,
    k: Real,
    t: Time,
    r: Rate,
    sigma1: Volatility,
    sigma2: Volatility,
    rho: Real,
    paths: Size,
    use_control_variate: bool,
    q: Rate,
) -> Result<MonteCarloEstimate> {
    let market = MarketParameters::new(s1, k, t, r, sigma1, q);
    let second = SecondAsset::new(s2, sigma2, q, rho);
    let spec = InstrumentSpec::ArithmeticBasket {
        second,
        paths,
        use_control_variate,
    };
    validate(direction, &spec, &market)?;
    let settings = PricingConfig::default().simulation(paths);
    mc_arithmetic_basket(direction, &market, &second, use_control_variate, &settings)
}

/// Monte Carlo price and delta of a knock-in/knock-out put with lower
/// barrier `l`, upper barrier `u` and `n` monitoring dates.
#[allow(clippy::too_many_arguments)]
pub fn price_barrier(
    s: Real,
    k: Real,
    t: Time,
    r: Rate,
    sigma: Volatility,
    l: Real,
    u: Real,
    n: Size,
    rebate: Real,
    q: Rate,
) -> Result<BarrierEstimate> {
    let market = MarketParameters::new(s, k, t, r, sigma, q);
    let spec = InstrumentSpec::Barrier {
        lower: l,
        upper: u,
        observations: n,
        rebate,
    };
    validate(OptionDirection::Put, &spec, &market)?;
    let contract = KikoPut::new(k, l, u, n, rebate)?;
    let config = PricingConfig::default();
    mc_barrier(
        &market,
        &contract,
        &config.simulation(config.barrier_paths),
        config.barrier_delta,
    )
}

/// Black-Scholes volatility reproducing `market_price`.
///
/// Returns [`ImpliedVolatility::NotFound`] when the bisection runs out of
/// iterations, and fails with
/// [`Error::PriceOutOfBounds`](op_core::Error::PriceOutOfBounds) when the
/// price violates the no-arbitrage bounds.
pub fn implied_volatility(
    direction: OptionDirection,
    market_price: Real,
    s: Real,
    k: Real,
    t: Time,
    r: Rate,
    q: Rate,
) -> Result<ImpliedVolatility> {
    let market = MarketParameters::new(s, k, t, r, 0.0, q);
    validate_implied_volatility(market_price, &market)?;
    op_pricingengines::implied_volatility(
        direction,
        market_price,
        &market,
        &PricingConfig::default().implied_vol,
    )
}

/// Finite-difference Greeks of a European option.
pub fn greeks(
    direction: OptionDirection,
    s: Real,
    k: Real,
    t: Time,
    r: Rate,
    sigma: Volatility,
    q: Rate,
) -> Result<Greeks> {
    let market = MarketParameters::new(s, k, t, r, sigma, q);
    validate(direction, &InstrumentSpec::European, &market)?;
    finite_difference_greeks(&market, &BumpSizes::default(), |m| black_scholes(direction, m))
}
