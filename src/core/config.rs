//! Configuration management for Swarm
//!
//! Supports environment variables, config files, and runtime overrides.
//!
//! Config file location: ~/.config/swarm/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::error::{Result, SwarmError};

/// Model used when an agent does not name one
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Main configuration for Swarm
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Completion API configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Agent loop configuration
    #[serde(default)]
    pub agent: AgentConfig,
    /// Transcript output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Chat-completion API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    /// Bearer credential; read from OPENAI_API_KEY when absent
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// What the orchestrator does when a single tool call fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolErrorPolicy {
    /// Append a synthetic error tool-result and keep going
    #[default]
    Report,
    /// Log the failure and append nothing
    Skip,
    /// Abort the run
    Abort,
}

/// Agent loop behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Model for agents built without an explicit one
    pub default_model: String,
    /// Optional turn limit; unbounded when unset
    #[serde(default)]
    pub max_turns: Option<usize>,
    /// Handling of failed tool calls
    #[serde(default)]
    pub tool_error_policy: ToolErrorPolicy,
    /// Sampling temperature sent with each completion request
    #[serde(default)]
    pub temperature: Option<f32>,
}

/// Transcript persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where the demo driver writes the transcript
    pub transcript_path: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            timeout_secs: 120,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            default_model: env::var("SWARM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            max_turns: env::var("SWARM_MAX_TURNS")
                .ok()
                .and_then(|v| v.parse().ok()),
            tool_error_policy: ToolErrorPolicy::default(),
            temperature: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            transcript_path: PathBuf::from("eg-run.md"),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("swarm")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: CLI args > config file > env vars > defaults
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();

        match Self::load_from_file() {
            Ok(config) => config,
            Err(e) => {
                log::debug!("[CONFIG] Using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Load configuration from file only
    pub fn load_from_file() -> Result<Self> {
        let config_path = Self::config_file();

        if !config_path.exists() {
            return Err(SwarmError::config("Config file not found"));
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| SwarmError::config(format!("Failed to read config: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    ///
    /// The API key is never stored in the file, so it is always taken from the environment.
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)
            .map_err(|e| SwarmError::config(format!("Failed to parse config: {}", e)))?;

        if config.api.api_key.is_none() {
            config.api.api_key = ApiConfig::default().api_key;
        }

        Ok(config)
    }

    /// Generate a default config file content for display
    pub fn default_config_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config)
            .unwrap_or_else(|_| String::from("# Error generating config"))
    }

    /// Full URL of the chat-completion endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api.base_url.trim_end_matches('/'))
    }
}
