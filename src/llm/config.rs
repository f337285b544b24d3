use crate::llm::error::LlmConfigError;
use async_openai::config::OpenAIConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

pub const DEFAULT_MAX_TOKENS: u32 = 8192;
pub const DEFAULT_TEMPERATURE: f32 = 0.0;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const MODEL_ENV: &str = "OPENAI_MODEL";
pub const SMALL_MODEL_ENV: &str = "OPENAI_SMALL_MODEL";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const TEMPERATURE_ENV: &str = "LLM_TEMPERATURE";
pub const MAX_TOKENS_ENV: &str = "LLM_MAX_TOKENS";

/// Which of the configured models a request should go to.
///
/// Callers decide how a size maps onto [`LlmConfig::model`] and
/// [`LlmConfig::small_model`]; nothing here ties the two together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSize {
    Small,
    Medium,
}

impl ModelSize {
    pub const ALL: [ModelSize; 2] = [ModelSize::Small, ModelSize::Medium];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelSize::Small => "small",
            ModelSize::Medium => "medium",
        }
    }
}

impl fmt::Display for ModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelSize {
    type Err = LlmConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(ModelSize::Small),
            "medium" => Ok(ModelSize::Medium),
            other => Err(LlmConfigError::UnknownModelSize(other.to_string())),
        }
    }
}

/// Connection settings for a language-model API
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider credential. Never written out when serializing.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Primary model (e.g., "gpt-4.1-mini"); `None` leaves the choice to the provider
    pub model: Option<String>,

    /// Lighter model for simpler prompts (e.g., "gpt-4.1-nano")
    pub small_model: Option<String>,

    /// API root for custom endpoints; `None` means the provider default
    pub base_url: Option<String>,

    /// Sampling temperature passed through to the model
    pub temperature: f32,

    /// Upper bound on generated tokens
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: None,
            small_model: None,
            base_url: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.redacted_api_key())
            .field("model", &self.model)
            .field("small_model", &self.small_model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl LlmConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_small_model(mut self, small_model: impl Into<String>) -> Self {
        self.small_model = Some(small_model.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Load configuration from environment variables, reading `.env` first if present
    pub fn from_env() -> Self {
        if dotenv::dotenv().is_ok() {
            debug!("Loaded .env file");
        }
        Self::default().with_env_overrides()
    }

    /// Override fields from any non-empty environment variables.
    ///
    /// Numeric values that fail to parse are skipped and the current value is kept.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(api_key) = env_value(API_KEY_ENV) {
            debug!("Using API key from {}", API_KEY_ENV);
            self.api_key = Some(api_key);
        }

        if let Some(model) = env_value(MODEL_ENV) {
            debug!("Using model '{}' from {}", model, MODEL_ENV);
            self.model = Some(model);
        }

        if let Some(small_model) = env_value(SMALL_MODEL_ENV) {
            debug!("Using small model '{}' from {}", small_model, SMALL_MODEL_ENV);
            self.small_model = Some(small_model);
        }

        if let Some(base_url) = env_value(BASE_URL_ENV) {
            debug!("Using base URL '{}' from {}", base_url, BASE_URL_ENV);
            self.base_url = Some(base_url);
        }

        if let Some(raw) = env_value(TEMPERATURE_ENV) {
            match raw.parse::<f32>() {
                Ok(temperature) => self.temperature = temperature,
                Err(_) => warn!("Ignoring {}='{}': not a number", TEMPERATURE_ENV, raw),
            }
        }

        if let Some(raw) = env_value(MAX_TOKENS_ENV) {
            match raw.parse::<u32>() {
                Ok(max_tokens) => self.max_tokens = max_tokens,
                Err(_) => warn!("Ignoring {}='{}': not a token count", MAX_TOKENS_ENV, raw),
            }
        }

        self
    }

    /// Parse a YAML document. Keys that are missing take their defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self, LlmConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, LlmConfigError> {
        let content = fs::read_to_string(path).map_err(|source| LlmConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_yaml_str(&content)?;
        debug!("Loaded LLM configuration from {}", path.display());
        Ok(config)
    }

    /// `<config dir>/llm-config/config.yaml`, if the platform has a config dir
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("llm-config").join("config.yaml"))
    }

    /// API key masked down to its last four characters
    pub fn redacted_api_key(&self) -> Option<String> {
        self.api_key.as_deref().map(redact_secret)
    }

    /// Check the values are usable for a real request.
    ///
    /// Construction and loading accept anything; call this explicitly when
    /// bad values should be rejected up front.
    pub fn validate(&self) -> Result<(), LlmConfigError> {
        if !self.temperature.is_finite() || !(0.0..=2.0).contains(&self.temperature) {
            return Err(LlmConfigError::InvalidTemperature(self.temperature));
        }

        if self.max_tokens == 0 {
            return Err(LlmConfigError::InvalidMaxTokens(self.max_tokens));
        }

        let fields = [
            ("api_key", &self.api_key),
            ("model", &self.model),
            ("small_model", &self.small_model),
            ("base_url", &self.base_url),
        ];
        for (name, value) in fields {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(LlmConfigError::EmptyField(name));
            }
        }

        Ok(())
    }

    /// Client settings for `async-openai`. Unset fields keep that crate's defaults.
    pub fn to_openai_config(&self) -> OpenAIConfig {
        let mut openai_config = OpenAIConfig::new();

        if let Some(api_key) = &self.api_key {
            openai_config = openai_config.with_api_key(api_key);
        }

        if let Some(base_url) = &self.base_url {
            openai_config = openai_config.with_api_base(base_url);
        }

        openai_config
    }
}

/// Mask a secret down to its last four characters ("****abcd")
pub fn redact_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        "****".to_string()
    } else {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{}", tail)
    }
}

fn env_value(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}
