//! Seedable random number generators.
//!
//! Every stream is a Mersenne Twister MT19937-64 seeded explicitly, so Monte
//! Carlo results are reproducible. Independent streams for parallel workers
//! are obtained with [`derive_seed`].

use op_core::Real;
use rand::Rng;
use rand_distr::StandardNormal;
use rand_mt::Mt19937GenRand64;
use serde::{Deserialize, Serialize};

/// A uniform pseudo-random number generator based on MT19937-64.
pub struct MersenneTwisterUniformRng {
    rng: Mt19937GenRand64,
}

impl MersenneTwisterUniformRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mt19937GenRand64::new(seed),
        }
    }

    /// Generate the next uniform deviate in `[0, 1)`.
    pub fn next_real(&mut self) -> Real {
        // top 53 bits → exact multiples of 2⁻⁵³
        (self.rng.next_u64() >> 11) as Real * (1.0 / (1u64 << 53) as Real)
    }

    /// Generate the next uniform deviate in the open interval `(0, 1)`.
    pub fn next_open_real(&mut self) -> Real {
        loop {
            let u = self.next_real();
            if u > 0.0 {
                return u;
            }
        }
    }

    fn engine(&mut self) -> &mut Mt19937GenRand64 {
        &mut self.rng
    }
}

/// How uniform deviates are turned into standard normals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalMethod {
    /// Inverse cumulative normal applied to one uniform per draw.
    #[default]
    InverseCumulative,
    /// Ziggurat sampling (`rand_distr::StandardNormal`) on the same engine.
    Ziggurat,
}

/// A standard-normal random source.
///
/// Produces independent `N(0, 1)` variates and correlated pairs for
/// two-asset models.
pub struct GaussianRng {
    uniform: MersenneTwisterUniformRng,
    method: NormalMethod,
}

impl GaussianRng {
    /// Create a source seeded with `seed`.
    pub fn new(seed: u64, method: NormalMethod) -> Self {
        Self {
            uniform: MersenneTwisterUniformRng::new(seed),
            method,
        }
    }

    /// Generate the next standard-normal deviate.
    pub fn next_normal(&mut self) -> Real {
        match self.method {
            NormalMethod::InverseCumulative => {
                let u = self.uniform.next_open_real();
                crate::distributions::normal_cdf_inverse(u)
            }
            NormalMethod::Ziggurat => self.uniform.engine().sample(StandardNormal),
        }
    }

    /// Draw a pair `(z1, z2)` of standard normals with correlation `rho`.
    ///
    /// `z2 = ρ·z1 + √(1 − ρ²)·z1'` with `z1'` independent of `z1`.
    pub fn next_correlated_pair(&mut self, rho: Real) -> (Real, Real) {
        let z1 = self.next_normal();
        let independent = self.next_normal();
        (z1, correlate(z1, independent, rho))
    }
}

/// Combine two independent normals into one correlated with `z1` at `rho`.
#[inline]
pub fn correlate(z1: Real, independent: Real, rho: Real) -> Real {
    rho * z1 + (1.0 - rho * rho).max(0.0).sqrt() * independent
}

/// SplitMix64 mix of a base seed and a stream index.
///
/// Gives well-separated seeds for parallel chunks, so chunk `i` always sees
/// the same stream regardless of how many threads run.
pub fn derive_seed(base: u64, stream: u64) -> u64 {
    let mut z = base
        .wrapping_add(stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
