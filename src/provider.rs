//! Weather providers
//!
//! Where readings come from. The server only needs a value per attribute,
//! so the source sits behind a small trait and can be swapped (fixed values
//! in tests, a real feed later).

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::protocol::WeatherKind;

/// Source of weather readings
pub trait WeatherProvider: Send + Sync {
    /// Reading for `kind`, within `kind.range()`
    fn value_for(&self, kind: WeatherKind) -> f32;
}

/// Uniformly random readings inside each attribute's range
///
/// The RNG sits behind a lock so one provider can serve every worker.
pub struct RandomProvider {
    rng: Mutex<StdRng>,
}

impl RandomProvider {
    /// Provider seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Provider with a fixed seed, for reproducible sequences
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherProvider for RandomProvider {
    fn value_for(&self, kind: WeatherKind) -> f32 {
        let (min, max) = kind.range();
        self.rng.lock().gen_range(min..max)
    }
}

impl std::fmt::Debug for RandomProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomProvider").finish_non_exhaustive()
    }
}
