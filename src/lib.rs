//! Edgeseer - LLM probability estimates for prediction markets.
//!
//! Turns a batch of binary markets plus the caller's portfolio into
//! per-market probability estimates, edges and YES/NO/SKIP recommendations
//! from any of several text-generation providers.
//!
//! # Architecture
//!
//! One analysis call flows through:
//!
//! - **Catalog** - static model metadata, prices and free-tier pacing
//! - **Rate limiter** - minimum spacing between calls to paced models
//! - **Prompt builder** - one canonical prompt, rewritten for models without
//!   web search
//! - **Codec** - per wire format request encoder and response normalizer
//! - **Extractor / corrector** - JSON recovery from free text, then
//!   orientation and side repairs
//! - **Cost accountant** - tokens and USD per call
//!
//! # Modules
//!
//! - [`domain`] - Provider-agnostic types: markets, requests, analyses, usage
//! - [`application`] - Catalog, pacing, prompt, extraction and the [`Analyzer`](application::Analyzer)
//! - [`port`] - Outbound traits: HTTP transport, clock, timestamp store
//! - [`adapter`] - reqwest transport, file/memory stores, provider codecs, CLI
//! - [`infrastructure`] - Configuration loading and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use edgeseer::domain::{AnalysisRequest, ProviderId};
//! use edgeseer::infrastructure::bootstrap::build_analyzer;
//! use edgeseer::infrastructure::config::settings::Config;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load("config.toml")?;
//! let analyzer = build_analyzer(&config)?;
//! let request = AnalysisRequest::new(vec![], 1_000.0);
//! let result = analyzer
//!     .analyze_markets(ProviderId::Gemini, "gemini-2.5-flash", &request)
//!     .await?;
//! println!("{}", result.summary);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
