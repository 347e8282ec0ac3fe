//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::ProviderId;

/// LLM probability estimates for prediction markets
#[derive(Parser, Debug)]
#[command(name = "edgeseer")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults apply when it does not exist)
    #[arg(long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyse a batch of markets with one model and print the result JSON
    Analyze(AnalyzeArgs),

    /// Check that a provider API key is accepted
    CheckKey(CheckKeyArgs),

    /// List catalog models with pricing and capabilities
    Models(ModelsArgs),
}

/// Arguments for `edgeseer analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Provider (defaults to `[llm] provider`)
    #[arg(long)]
    pub provider: Option<ProviderId>,

    /// Model id (defaults to `[llm] model`)
    #[arg(long)]
    pub model: Option<String>,

    /// Analysis request JSON file, or `-` for stdin
    #[arg(long, short)]
    pub input: PathBuf,

    /// Write the result here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Environment variable holding the user's provider key, used when the
    /// request carries none
    #[arg(long)]
    pub key_env: Option<String>,
}

/// Arguments for `edgeseer check-key`.
#[derive(Args, Debug)]
pub struct CheckKeyArgs {
    /// Provider (defaults to `[llm] provider`)
    #[arg(long)]
    pub provider: Option<ProviderId>,

    /// Environment variable holding the key (defaults to e.g. `OPENAI_API_KEY`)
    #[arg(long)]
    pub key_env: Option<String>,

    /// Print the verdict as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `edgeseer models`.
#[derive(Args, Debug)]
pub struct ModelsArgs {
    /// Only list this provider's models
    #[arg(long)]
    pub provider: Option<ProviderId>,

    /// Print the catalog as JSON
    #[arg(long)]
    pub json: bool,
}
