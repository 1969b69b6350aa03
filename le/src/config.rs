//! Local Explorer configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Storage key the saved itineraries live under
pub const DEFAULT_STORAGE_KEY: &str = "my-local-explorer-itineraries";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// LLM provider configuration
    pub llm: LlmConfig,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Saved itinerary storage
    pub storage: StorageConfig,

    /// Directory searched for prompt template overrides before the embedded ones
    #[serde(rename = "prompts-dir")]
    pub prompts_dir: Option<PathBuf>,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks that the API key environment variable is set. Call this early
    /// in startup to fail fast with a clear error message.
    pub fn validate(&self) -> Result<()> {
        self.llm.get_api_key().map(|_| ())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .localexplorer.yml
        let local_config = PathBuf::from(".localexplorer.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/localexplorer/localexplorer.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("localexplorer").join("localexplorer.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// LLM provider configuration
///
/// `model`, `api-key-env` and `base-url` default per provider when unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name ("openai" or "anthropic")
    pub provider: String,

    /// Model identifier
    pub model: Option<String>,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: Option<String>,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: Option<String>,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Transport timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: None,
            api_key_env: None,
            base_url: None,
            max_tokens: 4096,
            timeout_ms: 120_000,
        }
    }
}

/// Built-in (model, api key env var, base url) for a provider
fn provider_defaults(provider: &str) -> (&'static str, &'static str, &'static str) {
    match provider {
        "anthropic" => ("claude-sonnet-4-20250514", "ANTHROPIC_API_KEY", "https://api.anthropic.com"),
        _ => ("gpt-4o-mini", "OPENAI_API_KEY", "https://api.openai.com"),
    }
}

impl LlmConfig {
    /// Configured model, or the provider's default
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(provider_defaults(&self.provider).0)
    }

    /// Configured key variable, or the provider's default
    pub fn api_key_env(&self) -> &str {
        self.api_key_env.as_deref().unwrap_or(provider_defaults(&self.provider).1)
    }

    /// Configured base URL without a trailing slash, or the provider's default
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(provider_defaults(&self.provider).2)
            .trim_end_matches('/')
    }

    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        let var = self.api_key_env();
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(eyre::eyre!("LLM API key not found. Set the {} environment variable.", var)),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, host:port
    #[serde(rename = "bind-addr")]
    pub bind_addr: String,

    /// Origins allowed to call the API from a browser; empty allows any
    #[serde(rename = "cors-origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            cors_origins: Vec::new(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the store; one directory is one isolated scope
    pub dir: PathBuf,

    /// Key the itinerary collection is stored under
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: tripstore::default_store_path(),
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}
