use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or checking an [`LlmConfig`](super::LlmConfig)
#[derive(Debug, Error)]
pub enum LlmConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Unknown model size '{0}', expected 'small' or 'medium'")]
    UnknownModelSize(String),

    #[error("Temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("Max tokens must be greater than 0, got {0}")]
    InvalidMaxTokens(u32),

    #[error("{0} is set but empty")]
    EmptyField(&'static str),
}
