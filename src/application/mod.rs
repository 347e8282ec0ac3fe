//! Application services.
//!
//! - [`catalog`] - static model metadata and cost formula
//! - [`rate_limit`] - free-tier pacing
//! - [`prompt`] - canonical prompt and capability adaptation
//! - [`extract`] / [`correct`] - reply decoding and consistency repair
//! - [`cost`] - per-call usage accounting
//! - [`analyzer`] - orchestration of a single analysis call

pub mod analyzer;
pub mod catalog;
pub mod correct;
pub mod cost;
pub mod extract;
pub mod prompt;
pub mod rate_limit;

pub use analyzer::{Analyzer, AnalyzerSettings, ProxySettings};
