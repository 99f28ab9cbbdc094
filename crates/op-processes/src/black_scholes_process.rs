//! Black-Scholes geometric Brownian motion under the risk-neutral measure.
//!
//! ```text
//! dS/S = (r − q) dt + σ dW
//! ```

use op_core::{ensure, errors::Result, Rate, Real, Time, Volatility};

/// Risk-neutral GBM with constant rate, dividend yield and volatility.
///
/// Closed-form solution: `S(t) = S₀ exp((r − q − σ²/2)t + σW(t))`, which
/// [`log_step`](Self::log_step) applies exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesProcess {
    spot: Real,
    rate: Rate,
    dividend_yield: Rate,
    volatility: Volatility,
}

/// Pre-computed exact log-step of a [`BlackScholesProcess`] over a fixed `dt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogStep {
    drift: Real,
    vol: Real,
}

impl LogStep {
    /// `x · exp(drift + vol · z)`.
    #[inline]
    pub fn apply(&self, x: Real, z: Real) -> Real {
        x * (self.drift + self.vol * z).exp()
    }
}

impl BlackScholesProcess {
    /// Create a new process.
    ///
    /// Fails with a domain error unless `spot > 0` and `volatility > 0`.
    pub fn new(spot: Real, rate: Rate, dividend_yield: Rate, volatility: Volatility) -> Result<Self> {
        ensure!(spot > 0.0, "spot must be positive, got {spot}");
        ensure!(volatility > 0.0, "volatility must be positive, got {volatility}");
        Ok(Self {
            spot,
            rate,
            dividend_yield,
            volatility,
        })
    }

    /// Initial spot.
    pub fn spot(&self) -> Real {
        self.spot
    }

    /// Risk-free rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Continuous dividend yield.
    pub fn dividend_yield(&self) -> Rate {
        self.dividend_yield
    }

    /// Volatility.
    pub fn volatility(&self) -> Volatility {
        self.volatility
    }

    /// Drift of `ln S`: `r − q − σ²/2`.
    pub fn log_drift(&self) -> Real {
        self.rate - self.dividend_yield - 0.5 * self.volatility * self.volatility
    }

    /// Exact log-step over `dt`.
    pub fn log_step(&self, dt: Time) -> LogStep {
        LogStep {
            drift: self.log_drift() * dt,
            vol: self.volatility * dt.sqrt(),
        }
    }

    /// Discount factor `exp(−r·t)`.
    pub fn discount(&self, t: Time) -> Real {
        (-self.rate * t).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rejects_non_positive_inputs() {
        assert!(BlackScholesProcess::new(0.0, 0.05, 0.0, 0.2).is_err());
        assert!(BlackScholesProcess::new(100.0, 0.05, 0.0, 0.0).is_err());
    }

    #[test]
    fn zero_noise_step_follows_log_drift() {
        let p = BlackScholesProcess::new(100.0, 0.05, 0.0, 0.2).unwrap();
        let x = p.log_step(1.0).apply(100.0, 0.0);
        let expected = 100.0 * (0.05_f64 - 0.02).exp();
        assert_abs_diff_eq!(x, expected, epsilon = 1e-10);
    }

    #[test]
    fn steps_compose() {
        let p = BlackScholesProcess::new(100.0, 0.03, 0.01, 0.25).unwrap();
        let half = p.log_step(0.5);
        let whole = p.log_step(1.0);
        let z = 0.7;
        let two_halves = half.apply(half.apply(100.0, z), z);
        let one = whole.apply(100.0, z * 2.0_f64.sqrt());
        assert_abs_diff_eq!(two_halves, one, epsilon = 1e-9);
    }
}
