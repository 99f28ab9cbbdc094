//! Recombining Cox-Ross-Rubinstein binomial tree.
//!
//! ```text
//! dt = T/N,  u = exp(σ√dt),  d = 1/u,  p = (exp((r − q)dt) − d) / (u − d)
//! ```
//!
//! Node `(i, j)` is the state after `j` up-moves and `i − j` down-moves,
//! with underlying value `S·u^j·d^(i−j)`.

use op_core::{ensure, errors::Result, instability, Real, Size, Time};
use op_processes::BlackScholesProcess;

/// A recombining binomial tree approximating a Black-Scholes process.
///
/// The tree has `steps + 1` time layers, with layer `i` having `i + 1` nodes.
#[derive(Debug, Clone)]
pub struct BinomialTree {
    x0: Real,
    dt: Time,
    steps: Size,
    up: Real,
    down: Real,
    pu: Real,
    discount: Real,
}

impl BinomialTree {
    /// Build a CRR tree with `steps` steps over `maturity` years.
    ///
    /// Fails with a numerical-instability error when the risk-neutral
    /// up-probability falls outside `(0, 1)`, which happens when `|r − q|·dt`
    /// is large relative to `σ√dt`.
    pub fn cox_ross_rubinstein(
        process: &BlackScholesProcess,
        maturity: Time,
        steps: Size,
    ) -> Result<Self> {
        ensure!(steps > 0, "binomial tree needs at least one step");
        ensure!(maturity > 0.0, "maturity must be positive, got {maturity}");

        let dt = maturity / steps as Real;
        let up = (process.volatility() * dt.sqrt()).exp();
        let down = 1.0 / up;
        let growth = ((process.rate() - process.dividend_yield()) * dt).exp();
        let pu = (growth - down) / (up - down);
        instability!(
            pu > 0.0 && pu < 1.0,
            "risk-neutral probability {pu} outside (0, 1) (dt = {dt}, σ = {})",
            process.volatility()
        );

        Ok(Self {
            x0: process.spot(),
            dt,
            steps,
            up,
            down,
            pu,
            discount: (-process.rate() * dt).exp(),
        })
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// Number of time steps.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Time increment per step.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Up factor `u`.
    pub fn up(&self) -> Real {
        self.up
    }

    /// Down factor `d = 1/u`.
    pub fn down(&self) -> Real {
        self.down
    }

    /// Per-step discount factor `exp(−r·dt)`.
    pub fn discount(&self) -> Real {
        self.discount
    }

    /// Number of nodes at time step `i`.
    pub fn size(&self, i: Size) -> Size {
        i + 1
    }

    /// Underlying value at node `(i, j)`.
    pub fn underlying(&self, i: Size, j: Size) -> Real {
        self.x0 * self.up.powi(j as i32) * self.down.powi((i - j) as i32)
    }

    /// Transition probability for `branch` (0 = down, 1 = up).
    pub fn probability(&self, branch: Size) -> Real {
        if branch == 1 {
            self.pu
        } else {
            1.0 - self.pu
        }
    }
}
