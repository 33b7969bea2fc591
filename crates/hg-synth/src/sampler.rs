//! Weighted zone sampler.
//!
//! Two methods with the same per-draw probabilities `w_z / Σw`:
//!
//! | Method       | Build            | Draw       | Memory        |
//! |--------------|------------------|------------|---------------|
//! | `Cumulative` | O(zones)         | O(log z)   | O(zones)      |
//! | `Expanded`   | O(Σw) + shuffle  | O(1)       | O(Σw)         |
//!
//! `Expanded` repeats each zone `w_z` times in a pool shuffled by a generator
//! seeded with the run seed, then draws a uniform pool index.  It reproduces
//! the sequence of the original tool and requires integral weights.  The two
//! methods consume the generator differently, so a seed reproduces a run only
//! within one method.

use hg_core::{SimRng, ZoneId};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{SynthError, SynthResult};

/// Upper bound on `Σw` for the expanded pool.
const MAX_EXPANDED_POOL: f64 = (1u64 << 28) as f64;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMethod {
    #[default]
    Cumulative,
    Expanded,
}

#[derive(Clone, Debug)]
enum Pool {
    Cumulative(WeightedIndex<f64>),
    Expanded(Vec<ZoneId>),
}

/// Discrete distribution over zones, proportional to their weights.
///
/// Read-only after construction; share it freely across workers.
#[derive(Clone, Debug)]
pub struct WeightedZonePool {
    pool: Pool,
}

impl WeightedZonePool {
    /// Build a pool over zones `0..weights.len()`.
    ///
    /// `seed` is only consumed by [`SamplingMethod::Expanded`].
    pub fn build(weights: &[f64], method: SamplingMethod, seed: u64) -> SynthResult<Self> {
        if weights.is_empty() {
            return Err(SynthError::Config("no zones to sample from".into()));
        }
        if let Some((z, w)) = weights.iter().enumerate().find(|(_, w)| !(w.is_finite() && **w >= 0.0)) {
            return Err(SynthError::Config(format!("zone {z} has invalid weight {w}")));
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(SynthError::Config(format!("total zone weight must be positive, got {total}")));
        }

        let pool = match method {
            SamplingMethod::Cumulative => {
                let dist = WeightedIndex::new(weights)
                    .map_err(|e| SynthError::Config(format!("zone weights: {e}")))?;
                Pool::Cumulative(dist)
            }
            SamplingMethod::Expanded => {
                if let Some(z) = weights.iter().position(|w| w.fract() != 0.0) {
                    return Err(SynthError::Config(format!(
                        "expanded sampling needs integral weights; zone {z} has {}",
                        weights[z]
                    )));
                }
                if total > MAX_EXPANDED_POOL {
                    return Err(SynthError::Config(format!(
                        "total weight {total} is too large for expanded sampling"
                    )));
                }
                let mut pool = Vec::with_capacity(total as usize);
                for (z, &w) in weights.iter().enumerate() {
                    pool.extend(std::iter::repeat(ZoneId(z as u32)).take(w as usize));
                }
                SimRng::new(seed).shuffle(&mut pool);
                Pool::Expanded(pool)
            }
        };
        log::debug!("zone pool over {} zones, total weight {total} ({method:?})", weights.len());
        Ok(Self { pool })
    }

    /// Draw one zone.
    #[inline]
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> ZoneId {
        match &self.pool {
            Pool::Cumulative(dist) => ZoneId(dist.sample(rng) as u32),
            Pool::Expanded(pool) => pool[rng.gen_range(0..pool.len())],
        }
    }

    pub fn method(&self) -> SamplingMethod {
        match self.pool {
            Pool::Cumulative(_) => SamplingMethod::Cumulative,
            Pool::Expanded(_) => SamplingMethod::Expanded,
        }
    }
}
