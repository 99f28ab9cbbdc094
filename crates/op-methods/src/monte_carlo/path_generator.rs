//! Sample paths of a Black-Scholes process on an equally spaced grid.

use op_core::{Real, Size, Time};
use op_math::GaussianRng;
use op_processes::black_scholes_process::{BlackScholesProcess, LogStep};

/// Generates paths of a [`BlackScholesProcess`] at `steps` equally spaced
/// dates `t_i = i·T/steps`, `i = 1..=steps`, using the exact log-step
/// `S_{t+Δt} = S_t·exp[(r − q − σ²/2)Δt + σ√Δt·Z]`.
#[derive(Debug, Clone)]
pub struct PathGenerator {
    spot: Real,
    steps: Size,
    step: LogStep,
}

impl PathGenerator {
    /// Create a generator over `[0, maturity]` with `steps` steps.
    pub fn new(process: &BlackScholesProcess, maturity: Time, steps: Size) -> Self {
        Self {
            spot: process.spot(),
            steps,
            step: process.log_step(maturity / steps as Real),
        }
    }

    /// Stream one path into `visit(i, S_{t_i})` for `i = 1..=steps`
    /// without allocating. Returns the terminal value.
    pub fn walk(&self, rng: &mut GaussianRng, mut visit: impl FnMut(Size, Real)) -> Real {
        let mut s = self.spot;
        for i in 1..=self.steps {
            s = self.step.apply(s, rng.next_normal());
            visit(i, s);
        }
        s
    }
}
