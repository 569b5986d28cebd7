//! Read-after-write visibility polling.
//!
//! Replaces a blind sleep with a bounded retry-until-condition loop.

use std::time::{Duration, Instant};

use crate::errors::{Result, StorageError};
use crate::storage::ObjectLocation;

pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(200);
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(2);
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(30);

/// Backoff and deadline for the visibility wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsistencyConfig {
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    /// Total time allowed before giving up
    pub max_wait: Duration,
}

impl Default for ConsistencyConfig {
    fn default() -> Self {
        Self {
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
            max_backoff: DEFAULT_MAX_BACKOFF,
            max_wait: DEFAULT_MAX_WAIT,
        }
    }
}

impl ConsistencyConfig {
    /// Backoff before the probe following `attempt` (zero-based), capped at `max_backoff`
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

/// Poll `probe` until it reports the object as visible.
///
/// Returns the number of probes made. Probe errors are returned immediately;
/// only a negative answer is retried. Fails with `NotVisible` once
/// `max_wait` has elapsed without a positive answer.
pub fn wait_until_visible<F>(
    config: &ConsistencyConfig,
    location: &ObjectLocation,
    probe: F,
) -> Result<u32>
where
    F: FnMut() -> Result<bool>,
{
    wait_until_visible_with_sleep(config, location, probe, std::thread::sleep)
}

pub(crate) fn wait_until_visible_with_sleep<F, S>(
    config: &ConsistencyConfig,
    location: &ObjectLocation,
    mut probe: F,
    mut sleep: S,
) -> Result<u32>
where
    F: FnMut() -> Result<bool>,
    S: FnMut(Duration),
{
    let started = Instant::now();
    let mut waited = Duration::ZERO;
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        if probe()? {
            return Ok(attempt);
        }

        // Count both the real elapsed time and the requested sleeps, so an
        // injected sleep that returns immediately still reaches the deadline.
        let elapsed = started.elapsed().max(waited);
        if elapsed >= config.max_wait {
            return Err(StorageError::NotVisible {
                location: location.clone(),
                waited: elapsed,
            });
        }

        let remaining = config.max_wait - elapsed;
        let pause = config.backoff_for(attempt - 1).min(remaining);
        sleep(pause);
        waited += pause;
    }
}
