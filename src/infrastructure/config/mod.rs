//! Infrastructure configuration modules.

pub mod analysis;
pub mod llm;
pub mod logging;
pub mod proxy;
pub mod settings;
