//! Sample statistics accumulators.
//!
//! Both accumulators keep raw power sums only, so partial results from
//! independent workers can be merged in any order.

use op_core::Real;

/// Incremental statistics accumulator.
///
/// Accumulates samples and computes their count, mean and unbiased variance.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    count: usize,
    sum: Real,
    sum_sq: Real,
}

impl Statistics {
    /// Create a new empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single sample.
    pub fn add(&mut self, x: Real) {
        self.count += 1;
        self.sum += x;
        self.sum_sq += x * x;
    }

    /// Fold another accumulator into this one.
    pub fn merge(&mut self, other: &Statistics) {
        self.count += other.count;
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
    }

    /// Number of samples.
    pub fn samples(&self) -> usize {
        self.count
    }

    /// Sample mean.  Returns `None` if no samples have been added.
    pub fn mean(&self) -> Option<Real> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as Real)
        }
    }

    /// Unbiased (Bessel-corrected) variance.  Returns `None` for fewer than
    /// 2 samples.
    pub fn variance(&self) -> Option<Real> {
        if self.count < 2 {
            return None;
        }
        let n = self.count as Real;
        let m = self.sum / n;
        Some(((self.sum_sq - n * m * m) / (n - 1.0)).max(0.0))
    }
}

/// Accumulator for paired samples `(x, y)`.
///
/// Used by control-variate estimators, where `x` is the target payoff and
/// `y` the control payoff observed on the same path.
#[derive(Debug, Clone, Default)]
pub struct PairedStatistics {
    count: usize,
    sum_x: Real,
    sum_y: Real,
    sum_xx: Real,
    sum_yy: Real,
    sum_xy: Real,
}

impl PairedStatistics {
    /// Create a new empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one pair.
    pub fn add(&mut self, x: Real, y: Real) {
        self.count += 1;
        self.sum_x += x;
        self.sum_y += y;
        self.sum_xx += x * x;
        self.sum_yy += y * y;
        self.sum_xy += x * y;
    }

    /// Fold another accumulator into this one.
    pub fn merge(&mut self, other: &PairedStatistics) {
        self.count += other.count;
        self.sum_x += other.sum_x;
        self.sum_y += other.sum_y;
        self.sum_xx += other.sum_xx;
        self.sum_yy += other.sum_yy;
        self.sum_xy += other.sum_xy;
    }

    /// Number of pairs.
    pub fn samples(&self) -> usize {
        self.count
    }

    /// Mean of `x`.
    pub fn mean_x(&self) -> Option<Real> {
        (self.count > 0).then(|| self.sum_x / self.count as Real)
    }

    /// Mean of `y`.
    pub fn mean_y(&self) -> Option<Real> {
        (self.count > 0).then(|| self.sum_y / self.count as Real)
    }

    /// Unbiased variance of `x`.
    pub fn variance_x(&self) -> Option<Real> {
        self.co_moment(self.sum_xx, self.sum_x, self.sum_x)
            .map(|v| v.max(0.0))
    }

    /// Unbiased variance of `y`.
    pub fn variance_y(&self) -> Option<Real> {
        self.co_moment(self.sum_yy, self.sum_y, self.sum_y)
            .map(|v| v.max(0.0))
    }

    /// Unbiased covariance of `x` and `y`.
    pub fn covariance(&self) -> Option<Real> {
        self.co_moment(self.sum_xy, self.sum_x, self.sum_y)
    }

    fn co_moment(&self, sum_ab: Real, sum_a: Real, sum_b: Real) -> Option<Real> {
        if self.count < 2 {
            return None;
        }
        let n = self.count as Real;
        Some((sum_ab - sum_a * sum_b / n) / (n - 1.0))
    }
}
