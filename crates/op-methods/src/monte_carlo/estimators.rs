//! Price estimates with 95 % confidence intervals.

use op_core::{
    errors::{Error, Result},
    instability, Real, Size,
};
use op_math::{PairedStatistics, Statistics};

/// Two-sided 95 % normal quantile.
pub const CONFIDENCE_Z: Real = 1.96;

fn undefined_moment() -> Error {
    Error::NumericalInstability("sample moment undefined".into())
}

/// A Monte Carlo price estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonteCarloEstimate {
    /// Mean of the discounted payoffs.
    pub price: Real,
    /// Standard error of the mean, `s / √paths`.
    pub std_error: Real,
    /// Half-width of the 95 % confidence interval, `1.96 · std_error`.
    pub confidence: Real,
    /// Number of simulated paths.
    pub paths: Size,
}

impl MonteCarloEstimate {
    fn new(price: Real, variance: Real, paths: Size) -> Self {
        let std_error = (variance.max(0.0) / paths as Real).sqrt();
        Self {
            price,
            std_error,
            confidence: CONFIDENCE_Z * std_error,
            paths,
        }
    }

    /// Estimate from plain discounted-payoff samples.
    ///
    /// Fails with a numerical-instability error for fewer than two samples,
    /// where the unbiased variance is undefined.
    pub fn from_statistics(stats: &Statistics) -> Result<Self> {
        let n = stats.samples();
        instability!(n >= 2, "variance estimator needs at least 2 paths, got {n}");
        let mean = stats.mean().ok_or_else(undefined_moment)?;
        let variance = stats.variance().ok_or_else(undefined_moment)?;
        Ok(Self::new(mean, variance, n))
    }

    /// Whether `value` lies within the 95 % confidence interval.
    pub fn contains(&self, value: Real) -> bool {
        (self.price - value).abs() <= self.confidence
    }
}

/// Control-variate estimate from paired `(target, control)` samples.
///
/// With `θ = Cov(x, y) / Var(y)` estimated from the same sample, the
/// adjusted estimate is `mean(x) + θ·(control_expectation − mean(y))` and its
/// variance is that of `x − θ·y`. A degenerate control (zero variance)
/// leaves the plain estimate unchanged.
pub fn control_variate_estimate(
    stats: &PairedStatistics,
    control_expectation: Real,
) -> Result<MonteCarloEstimate> {
    let n = stats.samples();
    instability!(n >= 2, "variance estimator needs at least 2 paths, got {n}");
    let mean_x = stats.mean_x().ok_or_else(undefined_moment)?;
    let mean_y = stats.mean_y().ok_or_else(undefined_moment)?;
    let var_x = stats.variance_x().ok_or_else(undefined_moment)?;
    let var_y = stats.variance_y().ok_or_else(undefined_moment)?;
    let cov = stats.covariance().ok_or_else(undefined_moment)?;

    let theta = if var_y > 0.0 { cov / var_y } else { 0.0 };
    let price = mean_x + theta * (control_expectation - mean_y);
    let variance = var_x - 2.0 * theta * cov + theta * theta * var_y;
    Ok(MonteCarloEstimate::new(price, variance, n))
}
