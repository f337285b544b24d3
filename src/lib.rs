pub mod cli;
pub mod llm;

pub use llm::{LlmConfig, LlmConfigError, ModelSize, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
