//! 1D root search.

use op_core::Real;
use serde::{Deserialize, Serialize};

/// Settings for [`bisection_search`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BisectionSettings {
    /// Lower end of the initial bracket.
    pub lower: Real,
    /// Upper end of the initial bracket.
    pub upper: Real,
    /// First point evaluated.
    pub initial_guess: Real,
    /// Stop once `|f(x) − target| < tolerance`.
    pub tolerance: Real,
    /// Evaluation budget.
    pub max_iterations: usize,
}

impl Default for BisectionSettings {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: 1.0,
            initial_guess: 1.0,
            tolerance: 1.0e-4,
            max_iterations: 1000,
        }
    }
}

/// Result of a bisection search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BisectionOutcome {
    /// `|f(x) − target|` fell below the tolerance.
    Converged {
        /// The abscissa found.
        x: Real,
        /// Evaluations used.
        iterations: usize,
    },
    /// The evaluation budget ran out first.
    NotConverged {
        /// The last point evaluated.
        last: Real,
        /// Evaluations used.
        iterations: usize,
    },
}

/// Find `x` with `f(x) ≈ target` for a non-decreasing `f`.
///
/// Starts at `initial_guess`; whenever `f(x) < target` the lower end of the
/// bracket moves up to `x`, otherwise the upper end moves down, and the next
/// point is the bracket midpoint.
pub fn bisection_search<F>(f: F, target: Real, settings: &BisectionSettings) -> BisectionOutcome
where
    F: Fn(Real) -> Real,
{
    let mut low = settings.lower;
    let mut high = settings.upper;
    let mut x = settings.initial_guess;

    for i in 0..settings.max_iterations {
        let diff = target - f(x);
        if diff.abs() < settings.tolerance {
            return BisectionOutcome::Converged {
                x,
                iterations: i + 1,
            };
        }
        if diff > 0.0 {
            low = x;
        } else {
            high = x;
        }
        x = 0.5 * (low + high);
    }
    BisectionOutcome::NotConverged {
        last: x,
        iterations: settings.max_iterations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_square_root() {
        let settings = BisectionSettings {
            lower: 0.0,
            upper: 4.0,
            initial_guess: 4.0,
            tolerance: 1e-10,
            max_iterations: 200,
        };
        match bisection_search(|x| x * x, 2.0, &settings) {
            BisectionOutcome::Converged { x, .. } => {
                assert!((x - 2.0_f64.sqrt()).abs() < 1e-9, "x = {x}")
            }
            other => panic!("expected convergence, got {other:?}"),
        }
    }

    #[test]
    fn initial_guess_hit_returns_after_one_evaluation() {
        let settings = BisectionSettings::default();
        assert_eq!(
            bisection_search(|x| x, 1.0, &settings),
            BisectionOutcome::Converged {
                x: 1.0,
                iterations: 1
            }
        );
    }

    #[test]
    fn target_outside_range_does_not_converge() {
        let settings = BisectionSettings {
            max_iterations: 50,
            ..BisectionSettings::default()
        };
        match bisection_search(|x| x, 5.0, &settings) {
            BisectionOutcome::NotConverged { iterations, .. } => assert_eq!(iterations, 50),
            other => panic!("expected no convergence, got {other:?}"),
        }
    }
}
