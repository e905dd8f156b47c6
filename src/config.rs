//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.sql-advisor.toml` in current directory
//! 4. `~/.config/sql-advisor/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [llm]
//! model = "qwen2.5:7b-instruct"
//! ollama_url = "http://localhost:11434"
//! temperature = 0.1
//! max_tokens = 512
//! timeout_secs = 30
//!
//! [retry]
//! max_retries = 2
//! initial_delay_ms = 500
//! max_delay_ms = 4000
//! backoff_factor = 2.0
//!
//! [rules]
//! disabled = ["distinct_check"]
//!
//! [explain]
//! timeout_ms = 10000
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `LLM_MODEL` | Model identifier |
//! | `OLLAMA_URL` | Ollama base URL |

use std::{
    env, fs,
    path::{Path, PathBuf}
};

use serde::Deserialize;
use tracing::debug;

use crate::error::{AppResult, config_error};

/// Default Ollama endpoint
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default model for query rewrites
pub const DEFAULT_MODEL: &str = "qwen2.5:7b-instruct";

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub llm:     LlmConfig,
    #[serde(default)]
    pub retry:   RetryConfig,
    #[serde(default)]
    pub rules:   RulesConfig,
    #[serde(default)]
    pub explain: ExplainConfig
}

/// Rules configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RulesConfig {
    /// Disabled rule ids, e.g. `or_to_in`
    #[serde(default)]
    pub disabled: Vec<String>
}

/// Language model configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model:        String,
    pub ollama_url:   String,
    pub temperature:  f32,
    pub max_tokens:   u32,
    /// Client-side timeout for one completion request
    pub timeout_secs: u64
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model:        String::from(DEFAULT_MODEL),
            ollama_url:   String::from(DEFAULT_OLLAMA_URL),
            temperature:  0.1,
            max_tokens:   512,
            timeout_secs: 30
        }
    }
}

/// Retry configuration for LLM requests
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries:      u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms:     u64,
    pub backoff_factor:   f64
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries:      2,
            initial_delay_ms: 500,
            max_delay_ms:     4000,
            backoff_factor:   2.0
        }
    }
}

/// EXPLAIN configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExplainConfig {
    /// Session `statement_timeout` in milliseconds
    pub timeout_ms: u64
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.sql-advisor.toml)
    /// 3. Config file in home directory (~/.config/sql-advisor/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sql-advisor")
                .join("config.toml");
            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }

        // Local file replaces the home one
        let local_config = PathBuf::from(".sql-advisor.toml");
        if local_config.exists() {
            config = Self::from_file(&local_config)?;
        }

        if let Ok(model) = env::var("LLM_MODEL") {
            config.llm.model = model;
        }

        if let Ok(url) = env::var("OLLAMA_URL") {
            config.llm.ollama_url = url;
        }

        Ok(config)
    }

    /// Read and parse a TOML config file
    pub fn from_file(path: &Path) -> AppResult<Self> {
        debug!(path = %path.display(), "loading config file");
        let content = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text; missing sections use defaults
    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| config_error(format!("Invalid config file: {}", e)))
    }
}
