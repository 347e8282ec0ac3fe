//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! The analysis pipeline reaches the outside world through three driven
//! ports, each injected so tests can substitute fakes:
//!
//! - [`HttpTransport`](outbound::transport::HttpTransport) - outbound HTTP
//! - [`TimestampStore`](outbound::store::TimestampStore) - durable last-call times
//! - [`Clock`](outbound::clock::Clock) - wall clock and sleeping

pub mod outbound;
