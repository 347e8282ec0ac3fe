//! Minimum-interval pacing for free-tier models.
//!
//! A wall-clock approximation of a tokens-per-minute budget: each paced
//! model gets at most one call per `min_interval_ms`. The read-then-write of
//! the last-call timestamp is not atomic, so two callers racing the same key
//! may both pass. The pipeline issues one call per cycle.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::ModelDescriptor;
use crate::port::outbound::clock::Clock;
use crate::port::outbound::store::TimestampStore;

/// Enforces the per-model minimum call interval.
pub struct RateLimiter {
    store: Arc<dyn TimestampStore>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn TimestampStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Wait until `model` may be called, then record the call time.
    ///
    /// Returns how long the caller was suspended. Models without a minimum
    /// interval return immediately and are not recorded.
    pub async fn acquire(&self, model: &ModelDescriptor) -> Duration {
        let Some(min_interval_ms) = model.min_interval_ms() else {
            return Duration::ZERO;
        };
        let key = model.rate_key();

        let mut waited = Duration::ZERO;
        if let Some(last) = self.store.get(&key) {
            let elapsed = self.clock.now_ms().saturating_sub(last).max(0) as u64;
            if elapsed < min_interval_ms {
                waited = Duration::from_millis(min_interval_ms - elapsed);
                info!(
                    key = %key,
                    wait_ms = waited.as_millis() as u64,
                    "Pacing free-tier model"
                );
                self.clock.sleep(waited).await;
            }
        }

        let now = self.clock.now_ms();
        if let Err(e) = self.store.set(&key, now) {
            warn!(key = %key, error = %e, "Failed to persist rate-limit timestamp");
        }
        debug!(key = %key, ts = now, "Recorded call time");
        waited
    }
}
