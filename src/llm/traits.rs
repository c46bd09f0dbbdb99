//! Completion provider trait for abstracting different backends
//!
//! The orchestrator only needs one thing from a backend: given a model, the
//! message history and the available tools, return one assistant message.

use async_trait::async_trait;
use serde::Serialize;

use crate::core::{Message, Result, ToolDefinition};

/// One chat-completion request
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    /// Model identifier of the active agent
    pub model: String,
    /// System message followed by the transcript
    pub messages: Vec<Message>,
    /// Tools the model may call
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Create a request without a temperature override
    pub fn new(model: impl Into<String>, messages: Vec<Message>, tools: Vec<ToolDefinition>) -> Self {
        Self {
            model: model.into(),
            messages,
            tools,
            temperature: None,
        }
    }

    /// Names of the offered tools
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }
}

/// Token usage information
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Response from a completion provider
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// The assistant message to append to the transcript
    pub message: Message,
    /// Token usage information
    pub usage: Option<TokenUsage>,
    /// Model that generated the response
    pub model: String,
}

/// Trait for chat-completion backends
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Request one assistant message
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse>;

    /// Get the provider name
    fn name(&self) -> &str;
}
