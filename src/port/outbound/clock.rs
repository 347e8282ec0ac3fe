//! Wall-clock port used for rate-limit pacing.

use std::time::Duration;

use async_trait::async_trait;

/// Source of wall-clock time that can also suspend the caller.
///
/// Implementations must keep `now_ms` and `sleep` consistent: after
/// `sleep(d)` returns, `now_ms` has advanced by at least `d`.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;

    /// Suspend the caller for `duration`.
    async fn sleep(&self, duration: Duration);
}
