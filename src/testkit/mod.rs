//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`transport`] - `ScriptedTransport`, a queue-driven [`HttpTransport`](crate::port::outbound::transport::HttpTransport).
//! - [`clock`] - `ManualClock`, whose `sleep` advances time instantly.
//! - [`fixtures`] - Markets, requests and canned provider reply bodies.

pub mod clock;
pub mod fixtures;
pub mod transport;
