//! Command-line interface.

pub mod analyze;
pub mod check;
pub mod command;
pub mod models;

use anyhow::Context;

use self::command::{Cli, Commands};
use crate::domain::ProviderId;
use crate::infrastructure::config::settings::Config;

/// Load configuration, start logging and dispatch the subcommand.
///
/// # Errors
///
/// Returns any configuration, I/O or provider error with context attached.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load_or_default(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    config.init_logging();

    match cli.command {
        Commands::Analyze(args) => analyze::execute(args, &config).await,
        Commands::CheckKey(args) => check::execute(args, &config).await,
        Commands::Models(args) => models::execute(&args),
    }
}

/// Conventional environment variable for a provider's user key.
#[must_use]
pub const fn default_key_env(provider: ProviderId) -> &'static str {
    match provider {
        ProviderId::Anthropic => "ANTHROPIC_API_KEY",
        ProviderId::OpenAi => "OPENAI_API_KEY",
        ProviderId::Gemini => "GEMINI_API_KEY",
        ProviderId::Xai => "XAI_API_KEY",
        ProviderId::Groq => "GROQ_API_KEY",
        ProviderId::DeepSeek => "DEEPSEEK_API_KEY",
    }
}
