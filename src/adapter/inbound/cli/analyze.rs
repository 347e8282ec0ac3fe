//! `edgeseer analyze`.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use super::command::AnalyzeArgs;
use super::default_key_env;
use crate::domain::AnalysisRequest;
use crate::infrastructure::bootstrap::build_analyzer;
use crate::infrastructure::config::settings::Config;

pub async fn execute(args: AnalyzeArgs, config: &Config) -> anyhow::Result<()> {
    let provider = args.provider.unwrap_or(config.llm.provider);
    let model = args.model.unwrap_or_else(|| config.llm.model.clone());

    let mut request = read_request(&args.input)?;
    if request.api_key.is_none() {
        let var = args
            .key_env
            .unwrap_or_else(|| default_key_env(provider).to_string());
        request.api_key = std::env::var(&var).ok().filter(|k| !k.trim().is_empty());
        debug!(env = %var, found = request.api_key.is_some(), "Resolved provider key");
    }

    let analyzer = build_analyzer(config)?;
    let result = analyzer
        .analyze_markets(provider, &model, &request)
        .await
        .with_context(|| format!("analysing with {provider}/{model}"))?;

    let json = serde_json::to_string_pretty(&result)?;
    match &args.output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("writing result to {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

fn read_request(path: &Path) -> anyhow::Result<AnalysisRequest> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading request from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading request from {}", path.display()))?
    };
    serde_json::from_str(&content).context("parsing analysis request JSON")
}
