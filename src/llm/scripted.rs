//! Scripted provider
//!
//! Replays a fixed sequence of assistant messages and records every request.
//! Drives offline runs and tests without a network connection.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::{Message, Result, SwarmError};
use crate::llm::traits::{CompletionProvider, CompletionRequest, CompletionResponse};

/// One scripted reply
#[derive(Debug, Clone)]
enum Step {
    Reply(Message),
    Fail(String),
}

/// Provider that answers from a script
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    /// Create a provider replying with the given messages, in order
    pub fn new(replies: impl IntoIterator<Item = Message>) -> Self {
        Self {
            steps: Mutex::new(replies.into_iter().map(Step::Reply).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue another reply
    pub fn then_reply(self, message: Message) -> Self {
        self.push(Step::Reply(message));
        self
    }

    /// Queue a failing call
    pub fn then_fail(self, error: impl Into<String>) -> Self {
        self.push(Step::Fail(error.into()));
        self
    }

    fn push(&self, step: Step) {
        if let Ok(mut steps) = self.steps.lock() {
            steps.push_back(step);
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Replies not yet consumed
    pub fn remaining(&self) -> usize {
        self.steps.lock().map(|steps| steps.len()).unwrap_or_default()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        self.requests
            .lock()
            .map_err(|_| SwarmError::Other("request log poisoned".to_string()))?
            .push(request.clone());

        let step = self
            .steps
            .lock()
            .map_err(|_| SwarmError::Other("script poisoned".to_string()))?
            .pop_front();

        match step {
            Some(Step::Reply(message)) => Ok(CompletionResponse {
                message,
                usage: None,
                model: request.model.clone(),
            }),
            Some(Step::Fail(error)) => Err(SwarmError::api(error)),
            None => Err(SwarmError::api("Script exhausted")),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
