//! Monte Carlo engine for the knock-in/knock-out (KIKO) put.
//!
//! The underlying is observed at `n` equally spaced dates `t_1 … t_n`:
//!
//! * any observation `S ≥ U` knocks the option out and it pays the rebate
//!   `R`, even if the lower barrier was also touched on the same path;
//! * otherwise any observation `S ≤ L` knocks in a vanilla put paying
//!   `max(K − S_T, 0)`;
//! * otherwise the option expires worthless.
//!
//! Delta is a forward difference with a 1 % spot bump, re-simulated either
//! on the same random numbers or on an independent stream.

use op_core::{ensure, errors::Result, Real, Size};
use op_instruments::MarketParameters;
use op_math::{derive_seed, Statistics};
use op_methods::{simulate, MonteCarloEstimate, PathGenerator, SimulationSettings};
use op_processes::BlackScholesProcess;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Relative spot bump for the barrier delta.
pub const DELTA_BUMP: Real = 0.01;

/// Random numbers used for the bumped simulation of the barrier delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarrierDeltaMode {
    /// Re-use the base seed, so both runs see the same draws.
    #[default]
    CommonRandomNumbers,
    /// Draw the bumped run from an independent stream.
    Independent,
}

/// Contract terms of a knock-in/knock-out put.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KikoPut {
    strike: Real,
    lower: Real,
    upper: Real,
    observations: Size,
    rebate: Real,
}

impl KikoPut {
    /// Create the contract.
    ///
    /// Fails with a domain error unless `0 < lower < upper`, `strike > 0`,
    /// `observations ≥ 1` and `rebate ≥ 0`.
    pub fn new(
        strike: Real,
        lower: Real,
        upper: Real,
        observations: Size,
        rebate: Real,
    ) -> Result<Self> {
        ensure!(strike > 0.0, "strike must be positive, got {strike}");
        ensure!(
            lower > 0.0 && lower < upper,
            "barriers must satisfy 0 < L < U, got L = {lower}, U = {upper}"
        );
        ensure!(observations > 0, "at least one monitoring date is required");
        ensure!(rebate >= 0.0, "rebate must be non-negative, got {rebate}");
        Ok(Self {
            strike,
            lower,
            upper,
            observations,
            rebate,
        })
    }

    /// Number of monitoring dates.
    pub fn observations(&self) -> Size {
        self.observations
    }

    /// A fresh monitor for one path.
    pub fn monitor(&self) -> BarrierMonitor {
        BarrierMonitor {
            lower: self.lower,
            upper: self.upper,
            knocked_in: false,
            knocked_out: false,
        }
    }

    /// Undiscounted payoff of the path observed at `observations`
    /// (the last element is `S_T`). An empty path pays nothing.
    pub fn payoff(&self, observations: &[Real]) -> Real {
        let Some(&terminal) = observations.last() else {
            return 0.0;
        };
        let mut monitor = self.monitor();
        observations.iter().for_each(|&s| monitor.observe(s));
        monitor.settle(self.strike, terminal, self.rebate)
    }
}

/// Barrier state of a single path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarrierMonitor {
    lower: Real,
    upper: Real,
    knocked_in: bool,
    knocked_out: bool,
}

impl BarrierMonitor {
    /// Record one observation.
    #[inline]
    pub fn observe(&mut self, s: Real) {
        self.knocked_in |= s <= self.lower;
        self.knocked_out |= s >= self.upper;
    }

    /// Whether the lower barrier has been touched.
    pub fn knocked_in(&self) -> bool {
        self.knocked_in
    }

    /// Whether the upper barrier has been touched.
    pub fn knocked_out(&self) -> bool {
        self.knocked_out
    }

    /// Undiscounted payoff given the terminal price.
    pub fn settle(&self, strike: Real, terminal: Real, rebate: Real) -> Real {
        if self.knocked_out {
            rebate
        } else if self.knocked_in {
            (strike - terminal).max(0.0)
        } else {
            0.0
        }
    }
}

/// Barrier price estimate together with its bumped delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarrierEstimate {
    /// Price at the current spot.
    pub estimate: MonteCarloEstimate,
    /// `(V(1.01·S) − V(S)) / (0.01·S)`.
    pub delta: Real,
}

fn simulate_kiko(
    market: &MarketParameters,
    spot: Real,
    contract: &KikoPut,
    settings: &SimulationSettings,
) -> Result<MonteCarloEstimate> {
    let process = BlackScholesProcess::new(
        spot,
        market.rate,
        market.dividend_yield,
        market.volatility,
    )?;
    let generator = PathGenerator::new(&process, market.maturity, contract.observations);
    let discount = market.discount();

    let stats: Statistics = simulate(settings, |rng, acc: &mut Statistics| {
        let mut monitor = contract.monitor();
        let terminal = generator.walk(rng, |_, s| monitor.observe(s));
        acc.add(discount * monitor.settle(contract.strike, terminal, contract.rebate));
    })?;
    MonteCarloEstimate::from_statistics(&stats)
}

/// Monte Carlo price and delta of a knock-in/knock-out put.
pub fn mc_barrier(
    market: &MarketParameters,
    contract: &KikoPut,
    settings: &SimulationSettings,
    delta_mode: BarrierDeltaMode,
) -> Result<BarrierEstimate> {
    ensure!(market.maturity > 0.0, "time to expiry must be positive, got {}", market.maturity);
    let estimate = simulate_kiko(market, market.spot, contract, settings)?;

    let bump = DELTA_BUMP * market.spot;
    let bumped_settings = match delta_mode {
        BarrierDeltaMode::CommonRandomNumbers => settings.clone(),
        BarrierDeltaMode::Independent => settings.with_seed(derive_seed(settings.seed, u64::MAX)),
    };
    let bumped = simulate_kiko(market, market.spot + bump, contract, &bumped_settings)?;
    let delta = (bumped.price - estimate.price) / bump;

    debug!(
        paths = estimate.paths,
        price = estimate.price,
        half_width = estimate.confidence,
        delta,
        ?delta_mode,
        "kiko put priced"
    );
    Ok(BarrierEstimate { estimate, delta })
}
