//! Custom error types for Swarm
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Main error type for Swarm operations
#[derive(Error, Debug)]
pub enum SwarmError {
    /// Completion API errors (transport, status, malformed responses)
    #[error("API error: {0}")]
    Api(String),

    /// No credential available for the completion API
    #[error("No API key configured. Set OPENAI_API_KEY or api.api_key in the config file")]
    MissingApiKey,

    /// Invalid tool or parameter descriptor
    #[error("Schema error: {0}")]
    Schema(String),

    /// A tool handler failed
    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    /// The model asked for a tool the active agent does not have
    #[error("Unknown tool '{0}'")]
    UnknownTool(String),

    /// The model emitted arguments that are not a JSON object
    #[error("Invalid arguments for '{tool}': {reason}")]
    InvalidArguments { tool: String, reason: String },

    /// The optional turn limit was reached
    #[error("Run stopped after reaching the turn limit of {0}")]
    MaxTurns(usize),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Generic error for other cases
    #[error("{0}")]
    Other(String),
}

/// Convenience Result type for Swarm operations
pub type Result<T> = std::result::Result<T, SwarmError>;

impl SwarmError {
    /// Create an API error
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    /// Create a schema error
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Create a tool execution error
    pub fn tool(msg: impl Into<String>) -> Self {
        Self::ToolExecution(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid-arguments error
    pub fn invalid_arguments(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Wrap an error with additional context
    pub fn with_context<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(error),
        }
    }
}
