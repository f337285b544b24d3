pub mod config;
pub mod error;

pub use config::{redact_secret, LlmConfig, ModelSize, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
pub use error::LlmConfigError;
