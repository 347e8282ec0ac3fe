//! `edgeseer check-key`.

use anyhow::bail;
use owo_colors::OwoColorize;

use super::command::CheckKeyArgs;
use super::default_key_env;
use crate::infrastructure::bootstrap::build_analyzer;
use crate::infrastructure::config::settings::Config;

pub async fn execute(args: CheckKeyArgs, config: &Config) -> anyhow::Result<()> {
    let provider = args.provider.unwrap_or(config.llm.provider);
    let var = args
        .key_env
        .unwrap_or_else(|| default_key_env(provider).to_string());
    let Some(key) = std::env::var(&var).ok().filter(|k| !k.trim().is_empty()) else {
        bail!("environment variable {var} is not set");
    };

    let check = build_analyzer(config)?.test_api_key(provider, &key).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&check)?);
    } else if check.valid {
        println!(
            "  {} {} {}",
            "✓".green(),
            check.message,
            format!("({provider}, {}ms)", check.latency_ms).dimmed()
        );
    } else {
        println!(
            "  {} {} {}",
            "×".red(),
            check.message,
            format!("({provider}, {}ms)", check.latency_ms).dimmed()
        );
    }

    if !check.valid {
        bail!("{provider} key from {var} is not valid");
    }
    Ok(())
}
