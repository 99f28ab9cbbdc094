//! Option direction and the plain vanilla payoff.

use op_core::Real;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Option direction (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionDirection {
    /// A call option (right to buy).
    Call,
    /// A put option (right to sell).
    Put,
}

impl OptionDirection {
    /// +1 for Call, −1 for Put.
    pub fn sign(self) -> Real {
        match self {
            OptionDirection::Call => 1.0,
            OptionDirection::Put => -1.0,
        }
    }

    /// The opposite direction.
    pub fn flip(self) -> Self {
        match self {
            OptionDirection::Call => OptionDirection::Put,
            OptionDirection::Put => OptionDirection::Call,
        }
    }
}

impl fmt::Display for OptionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionDirection::Call => write!(f, "Call"),
            OptionDirection::Put => write!(f, "Put"),
        }
    }
}

/// Standard vanilla payoff `max(φ(S − K), 0)` with `φ = ±1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlainVanillaPayoff {
    /// Call or put.
    pub direction: OptionDirection,
    /// Strike price.
    pub strike: Real,
}

impl PlainVanillaPayoff {
    /// Create a new plain vanilla payoff.
    pub fn new(direction: OptionDirection, strike: Real) -> Self {
        Self { direction, strike }
    }

    /// Payoff for an underlying (or average) level `price`.
    #[inline]
    pub fn value(&self, price: Real) -> Real {
        (self.direction.sign() * (price - self.strike)).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vanilla_payoff_is_floored_at_zero() {
        let call = PlainVanillaPayoff::new(OptionDirection::Call, 100.0);
        let put = PlainVanillaPayoff::new(OptionDirection::Put, 100.0);
        assert_eq!(call.value(110.0), 10.0);
        assert_eq!(call.value(90.0), 0.0);
        assert_eq!(put.value(90.0), 10.0);
        assert_eq!(put.value(110.0), 0.0);
    }

    #[test]
    fn direction_sign_and_flip() {
        assert_eq!(OptionDirection::Call.sign(), 1.0);
        assert_eq!(OptionDirection::Put.sign(), -1.0);
        assert_eq!(OptionDirection::Call.flip(), OptionDirection::Put);
        assert_eq!(OptionDirection::Put.to_string(), "Put");
    }

    #[test]
    fn direction_serialises_lowercase() {
        let json = serde_json::to_string(&OptionDirection::Call).unwrap();
        assert_eq!(json, "\"call\"");
        let back: OptionDirection = serde_json::from_str("\"put\"").unwrap();
        assert_eq!(back, OptionDirection::Put);
    }
}
