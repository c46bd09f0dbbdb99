//! OpenAI-compatible chat-completion client
//!
//! Async HTTP client for `POST {base_url}/chat/completions` with tool calling.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::core::{Config, Message, Result, SwarmError};
use crate::llm::traits::{CompletionProvider, CompletionRequest, CompletionResponse, TokenUsage};

/// Chat-completion API client
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    completions_url: String,
    api_key: Option<String>,
}

/// Chat-completion response body
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: String,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

impl OpenAiClient {
    /// Create a client from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()
            .map_err(|e| SwarmError::with_context("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            completions_url: config.completions_url(),
            api_key: config.api.api_key.clone(),
        })
    }

    /// Endpoint this client posts to
    pub fn completions_url(&self) -> &str {
        &self.completions_url
    }

    /// Convert a response body into the first choice's message
    fn to_completion_response(response: ChatResponse) -> Result<CompletionResponse> {
        let usage = response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        let message = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| SwarmError::api("Response contained no choices"))?;

        Ok(CompletionResponse {
            message,
            usage,
            model: response.model,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        let api_key = self.api_key.as_deref().ok_or(SwarmError::MissingApiKey)?;

        log::debug!(
            "[OPENAI] Request: model={} messages={} tools={:?}",
            request.model,
            request.messages.len(),
            request.tool_names()
        );

        let response = self
            .client
            .post(&self.completions_url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    SwarmError::api(format!(
                        "Cannot connect to {}. Is the API reachable?",
                        self.completions_url
                    ))
                } else {
                    SwarmError::from(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(SwarmError::api(format!(
                "Completion API error ({}): {}",
                status, error_text
            )));
        }

        let response_text = response.text().await?;
        log::debug!("[OPENAI] Response: {}", response_text);

        let chat_response: ChatResponse = serde_json::from_str(&response_text)
            .map_err(|e| SwarmError::api(format!("Failed to parse response: {}", e)))?;

        Self::to_completion_response(chat_response)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Role;
    use serde_json::json;

    #[test]
    fn test_client_creation() {
        let mut config = Config::default();
        config.api.base_url = "http://localhost:8080/v1".to_string();
        let client = OpenAiClient::from_config(&config).unwrap();
        assert_eq!(
            client.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_parse_tool_call_response() {
        let body = json!({
            "id": "chatcmpl-1",
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "finish_reason": "tool_calls",
                "message": {
                    "role": "assistant",
                    "content": null,
                    "refusal": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "transfer_to_refunds_agent", "arguments": "{}"}
                    }]
                }
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        });
        let parsed: ChatResponse = serde_json::from_value(body).unwrap();
        let response = OpenAiClient::to_completion_response(parsed).unwrap();

        assert_eq!(response.model, "gpt-4o-mini");
        assert_eq!(response.message.role, Role::Assistant);
        assert_eq!(
            response.message.requested_tool_calls().unwrap()[0].name(),
            "transfer_to_refunds_agent"
        );
        assert_eq!(response.usage.unwrap().total_tokens, 15);
    }

    #[test]
    fn test_empty_choices_is_error() {
        let parsed: ChatResponse =
            serde_json::from_value(json!({"model": "m", "choices": []})).unwrap();
        assert!(matches!(
            OpenAiClient::to_completion_response(parsed),
            Err(SwarmError::Api(_))
        ));
    }

    #[test]
    fn test_request_omits_empty_tools() {
        let request = CompletionRequest::new("m", vec![Message::system("s")], Vec::new());
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("tools").is_none());
        assert!(value.get("temperature").is_none());
        assert_eq!(value["messages"][0]["role"], "system");
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_the_call() {
        let mut config = Config::default();
        config.api.api_key = None;
        let client = OpenAiClient::from_config(&config).unwrap();
        let request = CompletionRequest::new("m", vec![Message::user("hi")], Vec::new());
        let err = client.complete(&request).await.unwrap_err();
        assert!(matches!(err, SwarmError::MissingApiKey));
    }
}
