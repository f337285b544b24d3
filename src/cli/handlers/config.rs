use crate::cli::commands::{ConfigArgs, OutputFormat};
use crate::llm::{LlmConfig, ModelSize};
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use tracing::{debug, info};

/// Build a configuration from defaults, YAML file, environment and flags, in that order
pub fn resolve_config(args: &ConfigArgs) -> Result<LlmConfig> {
    let config = match &args.file {
        Some(path) => LlmConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => match LlmConfig::default_config_path() {
            Some(path) if path.exists() => {
                info!("Using configuration file {}", path.display());
                LlmConfig::from_yaml_file(&path).with_context(|| {
                    format!("Failed to load configuration from {}", path.display())
                })?
            }
            _ => LlmConfig::default(),
        },
    };

    let mut config = config.with_env_overrides();

    if let Some(api_key) = &args.api_key {
        config = config.with_api_key(api_key);
    }
    if let Some(model) = &args.model {
        config = config.with_model(model);
    }
    if let Some(small_model) = &args.small_model {
        config = config.with_small_model(small_model);
    }
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(temperature) = args.temperature {
        config = config.with_temperature(temperature);
    }
    if let Some(max_tokens) = args.max_tokens {
        config = config.with_max_tokens(max_tokens);
    }

    debug!("Resolved {:?}", config);
    Ok(config)
}

pub fn render_text(config: &LlmConfig) -> String {
    fn optional(value: Option<&str>) -> String {
        match value {
            Some(v) => v.to_string(),
            None => "(provider default)".dimmed().to_string(),
        }
    }

    let api_key = match config.redacted_api_key() {
        Some(masked) => format!("{} {}", "✅".green(), masked),
        None => format!("{}", "❌ Not set".red()),
    };

    let mut out = String::new();
    out.push_str("🔧 LLM Configuration\n");
    out.push_str("═══════════════════════════════════════\n");
    out.push_str(&format!("  • API key:     {}\n", api_key));
    out.push_str(&format!("  • Model:       {}\n", optional(config.model.as_deref())));
    out.push_str(&format!("  • Small model: {}\n", optional(config.small_model.as_deref())));
    out.push_str(&format!("  • Base URL:    {}\n", optional(config.base_url.as_deref())));
    out.push_str(&format!("  • Temperature: {}\n", config.temperature));
    out.push_str(&format!("  • Max tokens:  {}\n", config.max_tokens));
    out
}

#[derive(Serialize)]
struct RedactedConfig<'a> {
    api_key: Option<String>,
    #[serde(flatten)]
    config: &'a LlmConfig,
}

pub fn render_json(config: &LlmConfig) -> Result<String> {
    let view = RedactedConfig {
        api_key: config.redacted_api_key(),
        config,
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

pub fn handle_show_command(args: &ConfigArgs, format: OutputFormat) -> Result<()> {
    if dotenv::dotenv().is_ok() {
        debug!("Loaded .env file");
    }

    let config = resolve_config(args)?;
    match format {
        OutputFormat::Text => print!("{}", render_text(&config)),
        OutputFormat::Json => println!("{}", render_json(&config)?),
    }
    Ok(())
}

pub fn handle_validate_command(args: &ConfigArgs) -> Result<()> {
    if dotenv::dotenv().is_ok() {
        debug!("Loaded .env file");
    }

    let config = resolve_config(args)?;
    config.validate().context("Configuration is not usable")?;

    println!("{} Configuration is valid", "✅".green());
    if config.api_key.is_none() {
        println!("  • {}", "No API key set; requests will rely on the client's own defaults".yellow());
    }
    Ok(())
}

pub fn handle_sizes_command() {
    for size in ModelSize::ALL {
        println!("{}", size);
    }
}
