//! Outbound adapters (driven side).

pub mod clock;
pub mod http;
pub mod llm;
pub mod store;
