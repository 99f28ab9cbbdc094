//! Finite-difference Greeks.
//!
//! Any pricer `MarketParameters → price` can be bumped. Monte Carlo pricers
//! should be passed with a fixed seed so every bump reuses the same random
//! numbers.

use op_core::{ensure, errors::Result, instability, Real, Size};
use op_instruments::MarketParameters;
use serde::Serialize;

/// First- and second-order sensitivities of an option price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Greeks {
    /// `∂V/∂S`.
    pub delta: Real,
    /// `∂²V/∂S²`.
    pub gamma: Real,
    /// Value lost as `bumps.time` of calendar time passes, one day by
    /// default.
    pub theta: Real,
    /// `∂V/∂σ` per unit volatility.
    pub vega: Real,
    /// `∂V/∂r` per unit rate.
    pub rho: Real,
}

impl Greeks {
    fn ensure_finite(self) -> Result<Self> {
        for (name, value) in [
            ("delta", self.delta),
            ("gamma", self.gamma),
            ("theta", self.theta),
            ("vega", self.vega),
            ("rho", self.rho),
        ] {
            instability!(value.is_finite(), "{name} is not finite ({value})");
        }
        Ok(self)
    }
}

/// Bump sizes for [`finite_difference_greeks`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BumpSizes {
    /// Spot bump as a fraction of spot.
    pub spot_fraction: Real,
    /// Absolute volatility bump.
    pub volatility: Real,
    /// Absolute rate bump.
    pub rate: Real,
    /// Time bump in years.
    pub time: Real,
}

impl Default for BumpSizes {
    fn default() -> Self {
        Self {
            spot_fraction: 0.001,
            volatility: 0.01,
            rate: 0.01,
            time: 1.0 / 365.0,
        }
    }
}

/// Bump-and-reprice Greeks.
///
/// ```text
/// delta = (V(S+h) − V(S−h)) / 2h
/// gamma = (V(S+h) − 2V(S) + V(S−h)) / h²
/// vega  = (V(σ+dσ) − V(σ)) / dσ
/// rho   = (V(r+dr) − V(r)) / dr
/// theta = −(V(T) − V(T−dt))
/// ```
///
/// Fails with a domain error if `T − dt ≤ 0` and with a
/// numerical-instability error if any result is not finite.
pub fn finite_difference_greeks<F>(
    market: &MarketParameters,
    bumps: &BumpSizes,
    pricer: F,
) -> Result<Greeks>
where
    F: Fn(&MarketParameters) -> Result<Real>,
{
    let t = market.maturity;
    ensure!(
        t - bumps.time > 0.0,
        "time to expiry {t} too short for a theta bump of {}",
        bumps.time
    );
    let h = bumps.spot_fraction * market.spot;
    ensure!(h > 0.0, "spot bump must be positive, got {h}");

    let v = pricer(market)?;
    let up = pricer(&market.with_spot(market.spot + h))?;
    let down = pricer(&market.with_spot(market.spot - h))?;
    let vol_up = pricer(&market.with_volatility(market.volatility + bumps.volatility))?;
    let rate_up = pricer(&market.with_rate(market.rate + bumps.rate))?;
    let earlier = pricer(&market.with_maturity(t - bumps.time))?;

    Greeks {
        delta: (up - down) / (2.0 * h),
        gamma: (up - 2.0 * v + down) / (h * h),
        theta: earlier - v,
        vega: (vol_up - v) / bumps.volatility,
        rho: (rate_up - v) / bumps.rate,
    }
    .ensure_finite()
}

/// One point of a Greeks profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfilePoint {
    /// Spot level.
    pub spot: Real,
    /// Price at that spot.
    pub price: Real,
    /// Greeks at that spot.
    pub greeks: Greeks,
}

/// `steps + 1` equally spaced spots from 70 % to 130 % of `spot`.
pub fn spot_grid(spot: Real, steps: Size) -> Vec<Real> {
    let (lo, hi) = (0.7 * spot, 1.3 * spot);
    let step = (hi - lo) / steps.max(1) as Real;
    (0..=steps).map(|i| lo + i as Real * step).collect()
}

/// Price and Greeks over [`spot_grid`].
pub fn greeks_profile<F>(
    market: &MarketParameters,
    bumps: &BumpSizes,
    steps: Size,
    pricer: F,
) -> Result<Vec<ProfilePoint>>
where
    F: Fn(&MarketParameters) -> Result<Real>,
{
    spot_grid(market.spot, steps)
        .into_iter()
        .map(|spot| {
            let shifted = market.with_spot(spot);
            Ok(ProfilePoint {
                spot,
                price: pricer(&shifted)?,
                greeks: finite_difference_greeks(&shifted, bumps, &pricer)?,
            })
        })
        .collect()
}
