//! Random per-call delay for in-memory adapters.

use std::sync::Mutex;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Sleeps for a uniformly random duration in `0..=max` milliseconds.
///
/// A `None` or zero maximum disables the delay entirely.
#[derive(Debug)]
pub struct SimulatedLatency {
    max_ms: u64,
    rng: Mutex<SmallRng>,
}

impl SimulatedLatency {
    /// Create a delay source bounded by `max_ms`, seeded from OS entropy.
    pub fn new(max_ms: Option<u64>) -> Self {
        Self {
            max_ms: max_ms.unwrap_or(0),
            rng: Mutex::new(SmallRng::from_entropy()),
        }
    }

    /// Upper bound of a single delay.
    pub fn max(&self) -> Duration {
        Duration::from_millis(self.max_ms)
    }

    fn sample(&self) -> Duration {
        if self.max_ms == 0 {
            return Duration::ZERO;
        }
        let millis = match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(0..=self.max_ms),
            // A poisoned generator still yields usable numbers.
            Err(poisoned) => poisoned.into_inner().gen_range(0..=self.max_ms),
        };
        Duration::from_millis(millis)
    }

    /// Sleep for one sampled delay; returns at once when disabled.
    pub async fn pause(&self) {
        let delay = self.sample();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
