use crate::llm::redact_secret;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fmt;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "llm-config",
    about = "Inspect and check language-model API connection settings",
    version,
    author
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for logs
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the configuration and print it (API key redacted)
    Show {
        #[command(flatten)]
        config: ConfigArgs,

        /// Output format
        #[arg(short = 'o', long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Resolve the configuration and check it is usable
    Validate {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// List the supported model sizes
    Sizes,

    /// Show information about llm-config
    Info,
}

/// Sources and overrides for a configuration.
///
/// Precedence, lowest first: defaults, YAML file, environment, these flags.
#[derive(Args, Clone, Default)]
pub struct ConfigArgs {
    /// YAML file to load. Defaults to <config dir>/llm-config/config.yaml when it exists
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Provider API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Primary model
    #[arg(long)]
    pub model: Option<String>,

    /// Model for simpler prompts
    #[arg(long)]
    pub small_model: Option<String>,

    /// API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Sampling temperature
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[arg(long)]
    pub max_tokens: Option<u32>,
}

impl fmt::Debug for ConfigArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigArgs")
            .field("file", &self.file)
            .field("api_key", &self.api_key.as_deref().map(redact_secret))
            .field("model", &self.model)
            .field("small_model", &self.small_model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show_with_overrides() {
        let cli = Cli::try_parse_from([
            "llm-config",
            "show",
            "--model",
            "gpt-4.1-mini",
            "--temperature",
            "-1.5",
            "--max-tokens",
            "100",
            "-o",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Show { config, format } => {
                assert_eq!(config.model.as_deref(), Some("gpt-4.1-mini"));
                assert_eq!(config.temperature, Some(-1.5));
                assert_eq!(config.max_tokens, Some(100));
                assert_eq!(config.file, None);
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["llm-config", "sizes", "-v", "--log-format", "json"]).unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(matches!(cli.command, Commands::Sizes));
    }

    #[test]
    fn test_debug_hides_api_key_flag() {
        let cli = Cli::try_parse_from([
            "llm-config",
            "validate",
            "--api-key",
            "sk-flag-secret-2468",
        ])
        .unwrap();
        let rendered = format!("{:?}", cli);

        assert!(!rendered.contains("sk-flag-secret"));
        assert!(rendered.contains("****2468"));
    }

    #[test]
    fn test_rejects_negative_max_tokens() {
        assert!(Cli::try_parse_from(["llm-config", "validate", "--max-tokens", "-1"]).is_err());
    }
}
