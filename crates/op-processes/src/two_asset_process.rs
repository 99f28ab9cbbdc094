//! Two correlated Black-Scholes assets driven by a shared Brownian factor.

use crate::black_scholes_process::BlackScholesProcess;
use op_core::{ensure, errors::Result, Real, Time};

/// Pair of GBM processes whose Brownian motions have correlation `ρ`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelatedBlackScholesPair {
    first: BlackScholesProcess,
    second: BlackScholesProcess,
    correlation: Real,
}

impl CorrelatedBlackScholesPair {
    /// Create a pair. Fails unless `−1 ≤ correlation ≤ 1`.
    pub fn new(
        first: BlackScholesProcess,
        second: BlackScholesProcess,
        correlation: Real,
    ) -> Result<Self> {
        ensure!(
            (-1.0..=1.0).contains(&correlation),
            "correlation must lie in [-1, 1], got {correlation}"
        );
        Ok(Self {
            first,
            second,
            correlation,
        })
    }

    /// The first asset.
    pub fn first(&self) -> &BlackScholesProcess {
        &self.first
    }

    /// The second asset.
    pub fn second(&self) -> &BlackScholesProcess {
        &self.second
    }

    /// Correlation of the driving Brownian motions.
    pub fn correlation(&self) -> Real {
        self.correlation
    }

    /// Values of both assets at `t` given standard normals `z1` and `z2`
    /// already correlated at [`correlation`](Self::correlation).
    pub fn evolve_pair(&self, t: Time, z1: Real, z2: Real) -> (Real, Real) {
        (
            self.first.log_step(t).apply(self.first.spot(), z1),
            self.second.log_step(t).apply(self.second.spot(), z2),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(spot: Real) -> BlackScholesProcess {
        BlackScholesProcess::new(spot, 0.05, 0.0, 0.3).unwrap()
    }

    #[test]
    fn rejects_correlation_outside_unit_interval() {
        assert!(CorrelatedBlackScholesPair::new(asset(100.0), asset(90.0), 1.2).is_err());
    }

    #[test]
    fn unit_correlation_moves_assets_together() {
        let pair = CorrelatedBlackScholesPair::new(asset(100.0), asset(100.0), 1.0).unwrap();
        let (a, b) = pair.evolve_pair(1.0, 0.8, 0.8);
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn log_returns_inherit_the_pair_correlation() {
        use op_math::{GaussianRng, NormalMethod};

        let pair = CorrelatedBlackScholesPair::new(asset(100.0), asset(80.0), -0.4).unwrap();
        let mut rng = GaussianRng::new(5, NormalMethod::InverseCumulative);
        let n = 40_000;
        let returns: Vec<(Real, Real)> = (0..n)
            .map(|_| {
                let (z1, z2) = rng.next_correlated_pair(pair.correlation());
                let (a, b) = pair.evolve_pair(0.5, z1, z2);
                ((a / 100.0).ln(), (b / 80.0).ln())
            })
            .collect();
        let mean = |f: fn(&(Real, Real)) -> Real| returns.iter().map(f).sum::<Real>() / n as Real;
        let (mx, my) = (mean(|r| r.0), mean(|r| r.1));
        let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
        for (x, y) in &returns {
            sxy += (x - mx) * (y - my);
            sxx += (x - mx).powi(2);
            syy += (y - my).powi(2);
        }
        let corr = sxy / (sxx * syy).sqrt();
        assert!((corr + 0.4).abs() < 0.02, "sample correlation {corr}");
    }
}
