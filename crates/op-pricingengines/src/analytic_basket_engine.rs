//! Closed form for two-asset geometric basket options.
//!
//! The basket level `B = √(S1·S2)` of two correlated GBMs is log-normal:
//!
//! ```text
//! σ_B = ½·√(σ1² + 2ρσ1σ2 + σ2²)
//! ν   = r − (q1 + q2)/2 − (σ1² + σ2²)/4      (drift of ln B)
//! μ_B = ν + σ_B²/2                            (growth of E[B])
//! ```
//!
//! and the option is priced by Black's formula on `B0·e^{μ_B·T}`. With
//! `S1 = S2`, `σ1 = σ2`, `q1 = q2` and `ρ = 1` this is Black-Scholes.

use crate::analytic_european_engine::black_formula;
use op_core::{ensure, errors::Result, Real};
use op_instruments::{MarketParameters, OptionDirection, SecondAsset};

/// Volatility, growth rate and initial level of the geometric basket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricBasketMoments {
    /// `B0 = √(S1·S2)`.
    pub level: Real,
    /// `σ_B`.
    pub volatility: Real,
    /// `μ_B`.
    pub growth: Real,
}

impl GeometricBasketMoments {
    /// Moments for the basket of the `market` asset and `second`.
    pub fn new(market: &MarketParameters, second: &SecondAsset) -> Self {
        let (s1, v1) = (market.volatility, market.volatility * market.volatility);
        let (s2, v2) = (second.volatility, second.volatility * second.volatility);
        let volatility = 0.5 * (v1 + 2.0 * second.correlation * s1 * s2 + v2).max(0.0).sqrt();
        let log_drift = market.rate
            - 0.5 * (market.dividend_yield + second.dividend_yield)
            - 0.25 * (v1 + v2);
        Self {
            level: (market.spot * second.spot).sqrt(),
            volatility,
            growth: log_drift + 0.5 * volatility * volatility,
        }
    }
}

/// Price of a geometric-average basket option on two assets.
///
/// Fails with a domain error for non-positive prices, strike, expiry or
/// volatilities, or a correlation outside `[−1, 1]`.
pub fn geometric_basket(
    direction: OptionDirection,
    market: &MarketParameters,
    second: &SecondAsset,
) -> Result<Real> {
    ensure!(market.spot > 0.0 && second.spot > 0.0, "spot prices must be positive");
    ensure!(market.strike > 0.0, "strike must be positive, got {}", market.strike);
    ensure!(market.maturity > 0.0, "time to expiry must be positive, got {}", market.maturity);
    ensure!(
        market.volatility > 0.0 && second.volatility > 0.0,
        "volatilities must be positive"
    );
    ensure!(
        (-1.0..=1.0).contains(&second.correlation),
        "correlation must lie in [-1, 1], got {}",
        second.correlation
    );

    let moments = GeometricBasketMoments::new(market, second);
    let t = market.maturity;
    Ok(black_formula(
        direction,
        moments.level * (moments.growth * t).exp(),
        market.strike,
        moments.volatility * t.sqrt(),
        market.discount(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytic_european_engine::black_scholes;
    use approx::assert_abs_diff_eq;

    fn market() -> MarketParameters {
        MarketParameters::new(100.0, 100.0, 1.0, 0.05, 0.3, 0.01)
    }

    #[test]
    fn identical_perfectly_correlated_assets_reduce_to_black_scholes() {
        let second = SecondAsset::new(100.0, 0.3, 0.01, 1.0);
        for direction in [OptionDirection::Call, OptionDirection::Put] {
            let basket = geometric_basket(direction, &market(), &second).unwrap();
            let single = black_scholes(direction, &market()).unwrap();
            assert_abs_diff_eq!(basket, single, epsilon = 1e-10);
        }
    }

    #[test]
    fn diversification_lowers_the_call_price() {
        let hi = geometric_basket(
            OptionDirection::Call,
            &market(),
            &SecondAsset::new(100.0, 0.3, 0.01, 0.9),
        )
        .unwrap();
        let lo = geometric_basket(
            OptionDirection::Call,
            &market(),
            &SecondAsset::new(100.0, 0.3, 0.01, -0.5),
        )
        .unwrap();
        assert!(lo < hi, "ρ=-0.5 → {lo}, ρ=0.9 → {hi}");
    }

    #[test]
    fn put_call_parity_on_the_basket() {
        let second = SecondAsset::new(90.0, 0.25, 0.02, 0.4);
        let m = GeometricBasketMoments::new(&market(), &second);
        let call = geometric_basket(OptionDirection::Call, &market(), &second).unwrap();
        let put = geometric_basket(OptionDirection::Put, &market(), &second).unwrap();
        let parity = (-0.05_f64).exp() * (m.level * m.growth.exp() - 100.0);
        assert_abs_diff_eq!(call - put, parity, epsilon = 1e-10);
    }

    #[test]
    fn perfectly_hedged_basket_is_deterministic() {
        // σ1 = σ2, ρ = −1 ⇒ σ_B = 0
        let second = SecondAsset::new(100.0, 0.3, 0.01, -1.0);
        let m = GeometricBasketMoments::new(&market(), &second);
        assert_abs_diff_eq!(m.volatility, 0.0, epsilon = 1e-12);
        let call = geometric_basket(OptionDirection::Call, &market(), &second).unwrap();
        let expected = ((-0.05_f64).exp() * (100.0 * m.growth.exp() - 100.0)).max(0.0);
        assert_abs_diff_eq!(call, expected, epsilon = 1e-12);
    }

    #[test]
    fn bad_correlation_is_a_domain_error() {
        let second = SecondAsset::new(100.0, 0.3, 0.0, 1.5);
        assert!(geometric_basket(OptionDirection::Call, &market(), &second).is_err());
    }
}
