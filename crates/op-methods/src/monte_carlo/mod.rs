//! Monte Carlo simulation framework.
//!
//! # Overview
//!
//! * [`PathGenerator`] — generates sample paths of a Black-Scholes process
//! * [`simulate`] — runs a per-path sampling closure over `paths` paths and
//!   gathers an [`Accumulator`]
//! * [`MonteCarloEstimate`] — mean, standard error and 95 % half-width
//! * [`control_variate_estimate`] — control-variate adjusted estimate
//!
//! Paths are split into chunks of `chunk_size`. Chunk `i` draws from its own
//! stream seeded with `derive_seed(seed, i)`, so the result depends on the
//! seed and chunk size but not on how many threads execute the chunks.

pub mod estimators;
pub mod path_generator;

pub use estimators::{control_variate_estimate, MonteCarloEstimate, CONFIDENCE_Z};
pub use path_generator::PathGenerator;

use op_core::{errors::Result, instability, CancellationToken, Size};
use op_math::{derive_seed, GaussianRng, NormalMethod, PairedStatistics, Statistics};
use rayon::prelude::*;
use tracing::debug;

/// Default number of paths per independently seeded chunk.
pub const DEFAULT_CHUNK_SIZE: Size = 4096;

/// Partial simulation results that can be merged in any order.
pub trait Accumulator: Default + Send {
    /// Fold `other` into `self`.
    fn merge(&mut self, other: Self);
}

impl Accumulator for Statistics {
    fn merge(&mut self, other: Self) {
        Statistics::merge(self, &other);
    }
}

impl Accumulator for PairedStatistics {
    fn merge(&mut self, other: Self) {
        PairedStatistics::merge(self, &other);
    }
}

/// How a simulation is run.
#[derive(Debug, Clone)]
pub struct SimulationSettings {
    /// Number of paths.
    pub paths: Size,
    /// Base seed of the random stream.
    pub seed: u64,
    /// Paths per independently seeded chunk.
    pub chunk_size: Size,
    /// Run chunks on the rayon thread pool.
    pub parallel: bool,
    /// Normal variate generation method.
    pub normal_method: NormalMethod,
    /// Checked before every chunk.
    pub cancellation: CancellationToken,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            paths: 10_000,
            seed: 42,
            chunk_size: DEFAULT_CHUNK_SIZE,
            parallel: true,
            normal_method: NormalMethod::default(),
            cancellation: CancellationToken::new(),
        }
    }
}

impl SimulationSettings {
    /// Copy of these settings with a different path count.
    pub fn with_paths(&self, paths: Size) -> Self {
        Self {
            paths,
            ..self.clone()
        }
    }

    /// Copy of these settings with a different base seed.
    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            seed,
            ..self.clone()
        }
    }
}

/// Run `settings.paths` independent paths through `sample`.
///
/// `sample` draws whatever normals it needs from the stream it is given and
/// records its payoff(s) in the accumulator. Fails with a
/// numerical-instability error for fewer than two paths and with
/// [`Error::Cancelled`](op_core::Error::Cancelled) if the token fires.
pub fn simulate<A, F>(settings: &SimulationSettings, sample: F) -> Result<A>
where
    A: Accumulator,
    F: Fn(&mut GaussianRng, &mut A) + Sync,
{
    let paths = settings.paths;
    instability!(paths >= 2, "variance estimator needs at least 2 paths, got {paths}");
    let chunk_size = settings.chunk_size.max(1);
    let chunks = paths.div_ceil(chunk_size);

    let run_chunk = |chunk: Size| -> Result<A> {
        settings.cancellation.check()?;
        let start = chunk * chunk_size;
        let n = chunk_size.min(paths - start);
        let mut rng = GaussianRng::new(
            derive_seed(settings.seed, chunk as u64),
            settings.normal_method,
        );
        let mut acc = A::default();
        for _ in 0..n {
            sample(&mut rng, &mut acc);
        }
        Ok(acc)
    };

    let result = if settings.parallel {
        (0..chunks)
            .into_par_iter()
            .map(run_chunk)
            .try_reduce(A::default, |mut a, b| {
                a.merge(b);
                Ok(a)
            })
    } else {
        (0..chunks).try_fold(A::default(), |mut acc, chunk| {
            acc.merge(run_chunk(chunk)?);
            Ok(acc)
        })
    }?;

    debug!(paths, chunks, parallel = settings.parallel, seed = settings.seed, "simulation finished");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use op_core::Error;
    use op_processes::BlackScholesProcess;

    fn settings(paths: Size, parallel: bool) -> SimulationSettings {
        SimulationSettings {
            paths,
            chunk_size: 1000,
            parallel,
            ..SimulationSettings::default()
        }
    }

    fn european_call(settings: &SimulationSettings) -> MonteCarloEstimate {
        let process = BlackScholesProcess::new(100.0, 0.05, 0.0, 0.2).unwrap();
        let gen = PathGenerator::new(&process, 1.0, 1);
        let discount = process.discount(1.0);
        let stats: Statistics = simulate(settings, |rng, acc: &mut Statistics| {
            let s_t = gen.walk(rng, |_, _| {});
            acc.add(discount * (s_t - 100.0).max(0.0));
        })
        .unwrap();
        MonteCarloEstimate::from_statistics(&stats).unwrap()
    }

    #[test]
    fn mc_european_call_converges_to_bs() {
        let est = european_call(&settings(100_000, true));
        assert_eq!(est.paths, 100_000);
        assert!(
            (est.price - 10.4506).abs() < 4.0 * est.std_error,
            "MC call = {:.4} ± {:.4}",
            est.price,
            est.confidence
        );
    }

    #[test]
    fn thread_count_does_not_change_the_result() {
        let parallel = european_call(&settings(20_500, true));
        let sequential = european_call(&settings(20_500, false));
        assert!((parallel.price - sequential.price).abs() < 1e-9);
        assert_eq!(parallel.paths, sequential.paths);
    }

    #[test]
    fn different_seeds_give_different_estimates() {
        let a = european_call(&settings(5_000, false));
        let b = european_call(&settings(5_000, false).with_seed(7));
        assert_ne!(a.price, b.price);
    }

    #[test]
    fn fewer_than_two_paths_is_unstable() {
        let result: Result<Statistics> = simulate(&settings(1, false), |_, acc: &mut Statistics| acc.add(1.0));
        assert!(matches!(result, Err(Error::NumericalInstability(_))));
    }

    #[test]
    fn cancelled_token_stops_simulation() {
        let s = settings(10_000, true);
        s.cancellation.cancel();
        let result: Result<Statistics> = simulate(&s, |_, acc: &mut Statistics| acc.add(1.0));
        assert_eq!(result.unwrap_err(), Error::Cancelled);
    }
}
