//! Infrastructure: configuration loading and dependency wiring.

pub mod bootstrap;
pub mod config;
