//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod clock;
pub mod store;
pub mod transport;
