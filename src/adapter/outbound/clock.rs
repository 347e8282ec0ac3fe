//! System wall clock.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::port::outbound::clock::Clock;

/// Real time, suspended with `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
