//! `edgeseer models`.

use owo_colors::OwoColorize;

use super::command::ModelsArgs;
use crate::application::catalog::{all_models, models_for};
use crate::domain::ModelDescriptor;

pub fn execute(args: &ModelsArgs) -> anyhow::Result<()> {
    let models: Vec<&ModelDescriptor> = match args.provider {
        Some(provider) => models_for(provider).collect(),
        None => all_models().iter().collect(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&models)?);
        return Ok(());
    }

    println!(
        "{:<10} {:<26} {:>8} {:>8} {:>8}  {}",
        "PROVIDER".bold(),
        "MODEL".bold(),
        "IN $/M".bold(),
        "OUT $/M".bold(),
        "MAX OUT".bold(),
        "FEATURES".bold()
    );
    for model in models {
        println!(
            "{:<10} {:<26} {:>8.2} {:>8.2} {:>8}  {}",
            model.provider.as_str().cyan(),
            model.id,
            model.input_price,
            model.output_price,
            model.max_output_tokens,
            features(model).dimmed()
        );
    }
    Ok(())
}

fn features(model: &ModelDescriptor) -> String {
    let mut tags = Vec::new();
    if model.has_web_search {
        tags.push("search".to_string());
    }
    if model.reasoning {
        tags.push("reasoning".to_string());
    }
    if let Some(tier) = model.free_tier {
        tags.push(format!("free-tier {}ms", tier.min_interval_ms));
    }
    tags.join(", ")
}
