//! Rate limiter pacing and persistence.

use std::sync::Arc;
use std::time::Duration;

use edgeseer::adapter::outbound::store::{JsonFileStore, MemoryStore};
use edgeseer::application::catalog::get_model;
use edgeseer::application::rate_limit::RateLimiter;
use edgeseer::domain::ProviderId;
use edgeseer::error::{Error, Result};
use edgeseer::port::outbound::store::TimestampStore;
use edgeseer::testkit::clock::ManualClock;

#[tokio::test]
async fn five_second_model_is_spaced_five_seconds_apart() {
    let clock = Arc::new(ManualClock::new(10_000));
    let limiter = RateLimiter::new(Arc::new(MemoryStore::new()), clock.clone());
    let model = get_model(ProviderId::Groq, "llama-3.3-70b-versatile").unwrap();
    assert_eq!(model.min_interval_ms(), Some(5_000));

    limiter.acquire(model).await;
    let first = clock.now_ms();

    clock.advance(2_000);
    limiter.acquire(model).await;
    let second = clock.now_ms();
    assert!(second >= first + 5_000, "second={second} first={first}");

    clock.advance(5_001);
    assert_eq!(limiter.acquire(model).await, Duration::ZERO);
}

#[tokio::test]
async fn pacing_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rate_limits.json");
    let model = get_model(ProviderId::Gemini, "gemini-2.5-pro").unwrap();
    let clock = Arc::new(ManualClock::new(1_000_000));

    {
        let limiter = RateLimiter::new(Arc::new(JsonFileStore::open(&path)), clock.clone());
        limiter.acquire(model).await;
    }

    clock.advance(2_000);
    let limiter = RateLimiter::new(Arc::new(JsonFileStore::open(&path)), clock.clone());
    let waited = limiter.acquire(model).await;
    assert_eq!(waited, Duration::from_millis(10_000));
}

struct FailingStore;

impl TimestampStore for FailingStore {
    fn get(&self, _key: &str) -> Option<i64> {
        None
    }

    fn set(&self, _key: &str, _ts: i64) -> Result<()> {
        Err(Error::Store("disk full".into()))
    }
}

#[tokio::test]
async fn store_failure_does_not_abort_the_call() {
    let clock = Arc::new(ManualClock::new(0));
    let limiter = RateLimiter::new(Arc::new(FailingStore), clock);
    let model = get_model(ProviderId::Gemini, "gemini-2.0-flash").unwrap();
    assert_eq!(limiter.acquire(model).await, Duration::ZERO);
}
