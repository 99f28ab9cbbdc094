//! The closed set of priceable instruments.

use crate::market::Units;
use op_core::{Rate, Real, Size, Volatility};
use serde::{Deserialize, Serialize};

/// The second underlying of a two-asset basket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SecondAsset {
    /// Spot price `S2`.
    pub spot: Real,
    /// Volatility `σ2` (fraction).
    pub volatility: Volatility,
    /// Dividend yield `q2` (fraction).
    #[serde(default)]
    pub dividend_yield: Rate,
    /// Correlation `ρ` with the first asset.
    pub correlation: Real,
}

impl SecondAsset {
    /// Second asset with `σ2` and `q2` given as fractions.
    pub fn new(spot: Real, volatility: Volatility, dividend_yield: Rate, correlation: Real) -> Self {
        Self {
            spot,
            volatility,
            dividend_yield,
            correlation,
        }
    }

    /// Copy with `σ2` and `q2` converted from `units` to fractions.
    /// Correlation is unitless and left unchanged.
    pub fn in_fractions(self, units: Units) -> Self {
        Self {
            volatility: units.to_fraction(self.volatility),
            dividend_yield: units.to_fraction(self.dividend_yield),
            ..self
        }
    }
}

/// Instrument and pricing method, dispatched through a single entry point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InstrumentSpec {
    /// European option, Black-Scholes closed form.
    European,
    /// American option on a binomial lattice.
    American {
        /// Lattice time steps `N`.
        steps: Size,
    },
    /// Discretely monitored geometric-average Asian, closed form.
    GeometricAsian {
        /// Averaging dates `n`.
        observations: Size,
    },
    /// Discretely monitored arithmetic-average Asian, Monte Carlo.
    ArithmeticAsian {
        /// Averaging dates `n`.
        observations: Size,
        /// Simulated paths.
        paths: Size,
        /// Use the geometric Asian as control variate.
        #[serde(default)]
        use_control_variate: bool,
    },
    /// Two-asset geometric basket, closed form.
    GeometricBasket {
        /// The second underlying.
        second: SecondAsset,
    },
    /// Two-asset arithmetic basket, Monte Carlo.
    ArithmeticBasket {
        /// The second underlying.
        second: SecondAsset,
        /// Simulated paths.
        paths: Size,
        /// Use the geometric basket as control variate.
        #[serde(default)]
        use_control_variate: bool,
    },
    /// Knock-in/knock-out barrier put, Monte Carlo.
    Barrier {
        /// Knock-in barrier `L`.
        lower: Real,
        /// Knock-out barrier `U`.
        upper: Real,
        /// Monitoring dates `n`.
        observations: Size,
        /// Rebate `R` paid on knock-out.
        #[serde(default)]
        rebate: Real,
    },
}

impl InstrumentSpec {
    /// Short human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            InstrumentSpec::European => "european",
            InstrumentSpec::American { .. } => "american",
            InstrumentSpec::GeometricAsian { .. } => "geometric_asian",
            InstrumentSpec::ArithmeticAsian { .. } => "arithmetic_asian",
            InstrumentSpec::GeometricBasket { .. } => "geometric_basket",
            InstrumentSpec::ArithmeticBasket { .. } => "arithmetic_basket",
            InstrumentSpec::Barrier { .. } => "barrier",
        }
    }

    /// Whether the price is a Monte Carlo estimate.
    pub fn is_simulated(&self) -> bool {
        matches!(
            self,
            InstrumentSpec::ArithmeticAsian { .. }
                | InstrumentSpec::ArithmeticBasket { .. }
                | InstrumentSpec::Barrier { .. }
        )
    }

    /// Copy with every unit-bearing field converted from `units` to fractions.
    pub fn in_fractions(self, units: Units) -> Self {
        match self {
            InstrumentSpec::GeometricBasket { second } => InstrumentSpec::GeometricBasket {
                second: second.in_fractions(units),
            },
            InstrumentSpec::ArithmeticBasket {
                second,
                paths,
                use_control_variate,
            } => InstrumentSpec::ArithmeticBasket {
                second: second.in_fractions(units),
                paths,
                use_control_variate,
            },
            other => other,
        }
    }
}
