//! Persistence port for rate-limit timestamps.

use crate::error::Result;

/// Last-call timestamps keyed by `"provider:model"`.
///
/// Writes are synchronous: when `set` returns `Ok`, the value survives a
/// restart for durable implementations.
pub trait TimestampStore: Send + Sync {
    /// Last recorded epoch-millisecond timestamp for `key`.
    fn get(&self, key: &str) -> Option<i64>;

    /// Record `ts` for `key`, replacing any previous value.
    fn set(&self, key: &str, ts: i64) -> Result<()>;
}
