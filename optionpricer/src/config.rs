//! Pricing configuration.
//!
//! Every field has a default, so a TOML file only needs the keys it
//! overrides:
//!
//! ```toml
//! seed = 7
//! parallel = false
//! barrier_delta = "independent"
//!
//! [implied_vol]
//! tolerance = 1e-6
//! ```

use op_core::{CancellationToken, Error, Result, Size, Violation};
use op_instruments::validation::Bounds;
use op_math::{BisectionSettings, NormalMethod};
use op_methods::{monte_carlo::DEFAULT_CHUNK_SIZE, SimulationSettings};
use op_pricingengines::BarrierDeltaMode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Settings shared by all pricing calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingConfig {
    /// Base seed of the pseudorandom stream.
    pub seed: u64,
    /// Run Monte Carlo chunks on the rayon thread pool.
    pub parallel: bool,
    /// Paths per independently seeded chunk.
    pub chunk_size: Size,
    /// How standard normals are generated.
    pub normal_method: NormalMethod,
    /// Paths for the barrier pricer.
    pub barrier_paths: Size,
    /// Random numbers for the bumped barrier simulation.
    pub barrier_delta: BarrierDeltaMode,
    /// Wall-clock budget of one Monte Carlo run, in milliseconds.
    pub deadline_ms: Option<u64>,
    /// Implied-volatility bisection settings.
    pub implied_vol: BisectionSettings,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            parallel: true,
            chunk_size: DEFAULT_CHUNK_SIZE,
            normal_method: NormalMethod::default(),
            barrier_paths: 100_000,
            barrier_delta: BarrierDeltaMode::default(),
            deadline_ms: None,
            implied_vol: BisectionSettings::default(),
        }
    }
}

impl PricingConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Runtime(format!("invalid pricing config: {e}")))
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Runtime(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Copy with a different seed.
    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            seed,
            ..self.clone()
        }
    }

    /// Check the settings themselves.
    pub fn validate(&self) -> Result<()> {
        let mut violations = Vec::new();
        if self.chunk_size == 0 {
            violations.push(Violation::new("chunk_size", "must be at least 1"));
        }
        let paths = Bounds::default().paths;
        if !paths.contains(&self.barrier_paths) {
            violations.push(Violation::new(
                "barrier_paths",
                format!(
                    "must lie in [{}, {}], got {}",
                    paths.start(),
                    paths.end(),
                    self.barrier_paths
                ),
            ));
        }
        let iv = &self.implied_vol;
        if !(iv.lower >= 0.0 && iv.lower < iv.upper) {
            violations.push(Violation::new(
                "implied_vol",
                format!("bracket [{}, {}] must satisfy 0 ≤ lower < upper", iv.lower, iv.upper),
            ));
        }
        if !(iv.tolerance > 0.0) {
            violations.push(Violation::new("implied_vol.tolerance", "must be positive"));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(violations))
        }
    }

    /// Simulation settings for a run of `paths` paths.
    ///
    /// The deadline, if any, starts counting now.
    pub fn simulation(&self, paths: Size) -> SimulationSettings {
        let cancellation = match self.deadline_ms {
            Some(ms) => CancellationToken::with_deadline(Duration::from_millis(ms)),
            None => CancellationToken::new(),
        };
        SimulationSettings {
            paths,
            seed: self.seed,
            chunk_size: self.chunk_size,
            parallel: self.parallel,
            normal_method: self.normal_method,
            cancellation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = PricingConfig::default();
        assert_eq!(c.seed, 42);
        assert!(c.parallel);
        assert_eq!(c.barrier_paths, 100_000);
        assert_eq!(c.barrier_delta, BarrierDeltaMode::CommonRandomNumbers);
        assert_eq!(c.implied_vol.max_iterations, 1000);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let c = PricingConfig::from_toml_str(
            r#"
            seed = 7
            normal_method = "ziggurat"
            barrier_delta = "independent"

            [implied_vol]
            tolerance = 1e-6
            "#,
        )
        .unwrap();
        assert_eq!(c.seed, 7);
        assert_eq!(c.normal_method, NormalMethod::Ziggurat);
        assert_eq!(c.barrier_delta, BarrierDeltaMode::Independent);
        assert_eq!(c.implied_vol.tolerance, 1e-6);
        assert_eq!(c.implied_vol.max_iterations, 1000);
        assert_eq!(c.chunk_size, DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = PricingConfig::from_toml_str("sead = 1").unwrap_err();
        assert!(matches!(err, Error::Runtime(_)));
    }

    #[test]
    fn invalid_settings_are_reported() {
        let c = PricingConfig {
            chunk_size: 0,
            barrier_paths: 10,
            ..PricingConfig::default()
        };
        match c.validate() {
            Err(Error::Validation(v)) => {
                let fields: Vec<_> = v.iter().map(|v| v.field).collect();
                assert_eq!(fields, vec!["chunk_size", "barrier_paths"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn simulation_settings_carry_the_seed() {
        let s = PricingConfig::default().with_seed(9).simulation(5_000);
        assert_eq!(s.seed, 9);
        assert_eq!(s.paths, 5_000);
        assert!(!s.cancellation.is_cancelled());
    }
}
