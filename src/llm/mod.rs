//! LLM module - chat-completion backends
//!
//! Provides the provider abstraction with an OpenAI-compatible HTTP client and
//! a scripted replay provider.

pub mod openai;
pub mod scripted;
pub mod traits;

pub use openai::OpenAiClient;
pub use scripted::ScriptedProvider;
pub use traits::{CompletionProvider, CompletionRequest, CompletionResponse, TokenUsage};
