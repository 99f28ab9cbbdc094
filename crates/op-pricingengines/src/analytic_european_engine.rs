//! Analytic European option engine (Black-Scholes-Merton).
//!
//! Prices European vanilla options with the closed-form Black-Scholes-Merton
//! formula and computes the closed-form Greeks.

use crate::greeks::Greeks;
use op_core::{ensure, errors::Result, Real};
use op_instruments::{MarketParameters, OptionDirection};
use op_math::distributions::{normal_cdf, normal_pdf};

const DAYS_PER_YEAR: Real = 365.0;

/// Black-Scholes-Merton price of a European option.
///
/// $$C = S e^{-qT} N(d_1) - K e^{-rT} N(d_2)$$
/// $$P = K e^{-rT} N(-d_2) - S e^{-qT} N(-d_1)$$
///
/// where $d_{1,2} = \frac{\ln(S/K) + (r - q \pm \sigma^2/2)T}{\sigma\sqrt{T}}$.
///
/// Fails with a domain error when `S`, `K`, `T` or `σ` is not positive.
pub fn black_scholes(direction: OptionDirection, market: &MarketParameters) -> Result<Real> {
    check_domain(market)?;
    Ok(black_scholes_unchecked(direction, market, market.volatility))
}

/// Closed-form Black-Scholes Greeks.
///
/// Vega and rho are per unit change (1.0 = 100 %); theta is the value lost
/// over one calendar day, the scale of
/// [`finite_difference_greeks`](crate::greeks::finite_difference_greeks).
pub fn black_scholes_greeks(direction: OptionDirection, market: &MarketParameters) -> Result<Greeks> {
    check_domain(market)?;
    let MarketParameters {
        spot,
        strike,
        maturity: t,
        rate: r,
        volatility: sigma,
        dividend_yield: q,
    } = *market;
    let phi = direction.sign();
    let sqrt_t = t.sqrt();
    let std_dev = sigma * sqrt_t;
    let df_r = (-r * t).exp();
    let df_q = (-q * t).exp();

    let d1 = ((spot / strike).ln() + (r - q + 0.5 * sigma * sigma) * t) / std_dev;
    let d2 = d1 - std_dev;
    let nd1 = normal_cdf(phi * d1);
    let nd2 = normal_cdf(phi * d2);
    let npd1 = normal_pdf(d1);

    let theta_per_year = -(spot * df_q * npd1 * sigma) / (2.0 * sqrt_t)
        - phi * r * strike * df_r * nd2
        + phi * q * spot * df_q * nd1;

    Ok(Greeks {
        delta: phi * df_q * nd1,
        gamma: df_q * npd1 / (spot * std_dev),
        theta: theta_per_year / DAYS_PER_YEAR,
        vega: spot * df_q * npd1 * sqrt_t,
        rho: phi * strike * t * df_r * nd2,
    })
}

fn check_domain(market: &MarketParameters) -> Result<()> {
    ensure!(market.spot > 0.0, "spot must be positive, got {}", market.spot);
    ensure!(market.strike > 0.0, "strike must be positive, got {}", market.strike);
    ensure!(market.maturity > 0.0, "time to expiry must be positive, got {}", market.maturity);
    ensure!(market.volatility > 0.0, "volatility must be positive, got {}", market.volatility);
    Ok(())
}

/// Black-Scholes price at volatility `sigma` without input checks.
///
/// A non-positive `sigma` gives the zero-volatility price
/// `max(φ(S e^{−qT} − K e^{−rT}), 0)`.
pub(crate) fn black_scholes_unchecked(
    direction: OptionDirection,
    market: &MarketParameters,
    sigma: Real,
) -> Real {
    let forward = market.spot * ((market.rate - market.dividend_yield) * market.maturity).exp();
    black_formula(
        direction,
        forward,
        market.strike,
        sigma.max(0.0) * market.maturity.sqrt(),
        market.discount(),
    )
}

/// Black's formula on a log-normal underlying with mean `forward`.
///
/// `discount · φ[F·N(φd1) − K·N(φd2)]` with
/// `d1 = (ln(F/K) + ½v²) / v`, `d2 = d1 − v` and `v = std_dev`. A vanishing
/// `std_dev` collapses to the discounted intrinsic value of the forward.
pub(crate) fn black_formula(
    direction: OptionDirection,
    forward: Real,
    strike: Real,
    std_dev: Real,
    discount: Real,
) -> Real {
    let phi = direction.sign();
    if std_dev <= 1e-15 {
        return discount * (phi * (forward - strike)).max(0.0);
    }
    let d1 = ((forward / strike).ln() + 0.5 * std_dev * std_dev) / std_dev;
    let d2 = d1 - std_dev;
    let value = discount * phi * (forward * normal_cdf(phi * d1) - strike * normal_cdf(phi * d2));
    value.max(0.0)
}
