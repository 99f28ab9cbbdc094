//! Market and contract parameters shared by every pricer.
//!
//! Inside the workspace rates, volatilities and dividend yields are always
//! decimal fractions. Callers that hold percentages convert once, here, with
//! [`MarketParameters::from_units`] and [`Units::to_fraction`].

use op_core::{Rate, Real, Time, Volatility};
use serde::{Deserialize, Serialize};

/// Unit convention of rate, volatility, dividend yield and correlation inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Decimal fractions (0.05 = 5 %).
    #[default]
    Fraction,
    /// Percentages (5.0 = 5 %).
    Percent,
}

impl Units {
    /// Convert `value` expressed in these units to a decimal fraction.
    #[inline]
    pub fn to_fraction(self, value: Real) -> Real {
        match self {
            Units::Fraction => value,
            Units::Percent => value / 100.0,
        }
    }
}

/// Spot, strike, expiry and the continuously-compounded market inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketParameters {
    /// Spot price `S`.
    pub spot: Real,
    /// Strike `K`.
    pub strike: Real,
    /// Time to expiry `T` in years.
    pub maturity: Time,
    /// Risk-free rate `r` (fraction).
    pub rate: Rate,
    /// Volatility `σ` (fraction).
    pub volatility: Volatility,
    /// Dividend yield `q` (fraction).
    #[serde(default)]
    pub dividend_yield: Rate,
}

impl MarketParameters {
    /// Parameters with `r`, `σ`, `q` given as fractions.
    pub fn new(
        spot: Real,
        strike: Real,
        maturity: Time,
        rate: Rate,
        volatility: Volatility,
        dividend_yield: Rate,
    ) -> Self {
        Self {
            spot,
            strike,
            maturity,
            rate,
            volatility,
            dividend_yield,
        }
    }

    /// Parameters with `r`, `σ`, `q` given in `units`.
    pub fn from_units(
        spot: Real,
        strike: Real,
        maturity: Time,
        rate: Rate,
        volatility: Volatility,
        dividend_yield: Rate,
        units: Units,
    ) -> Self {
        Self::new(
            spot,
            strike,
            maturity,
            units.to_fraction(rate),
            units.to_fraction(volatility),
            units.to_fraction(dividend_yield),
        )
    }

    /// Copy with a different spot.
    pub fn with_spot(self, spot: Real) -> Self {
        Self { spot, ..self }
    }

    /// Copy with a different volatility.
    pub fn with_volatility(self, volatility: Volatility) -> Self {
        Self { volatility, ..self }
    }

    /// Copy with a different rate.
    pub fn with_rate(self, rate: Rate) -> Self {
        Self { rate, ..self }
    }

    /// Copy with a different time to expiry.
    pub fn with_maturity(self, maturity: Time) -> Self {
        Self { maturity, ..self }
    }

    /// Discount factor `e^{−rT}`.
    pub fn discount(&self) -> Real {
        (-self.rate * self.maturity).exp()
    }

    /// Dividend discount factor `e^{−qT}`.
    pub fn dividend_discount(&self) -> Real {
        (-self.dividend_yield * self.maturity).exp()
    }
}
