//! Agent orchestrator
//!
//! Drives the handoff loop: ask the model, run the tools it requests one at a
//! time, switch agents on handoff, and stop once a reply carries no tool calls.

use std::sync::Arc;

use serde_json::json;

use crate::agent::definition::AgentRef;
use crate::agent::loop_state::RunState;
use crate::agent::response::{Response, RunOutcome};
use crate::core::config::AgentConfig;
use crate::core::{Config, Message, Result, SwarmError, ToolCall, ToolErrorPolicy};
use crate::llm::{CompletionProvider, CompletionRequest, OpenAiClient};
use crate::tools::{ToolOutput, ToolRegistry};

/// Options for a run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Optional turn limit; unbounded when `None`
    pub max_turns: Option<usize>,
    /// Handling of failed tool calls
    pub tool_error_policy: ToolErrorPolicy,
    /// Sampling temperature sent with each request
    pub temperature: Option<f32>,
}

impl From<&AgentConfig> for RunOptions {
    fn from(config: &AgentConfig) -> Self {
        Self {
            max_turns: config.max_turns,
            tool_error_policy: config.tool_error_policy,
            temperature: config.temperature,
        }
    }
}

/// Transcript notice appended when a tool hands off to another agent
pub fn transfer_notice(agent_name: &str) -> String {
    format!("Transferred to {}. Adopt persona immediately.", agent_name)
}

/// The multi-agent run loop
pub struct Swarm {
    /// Completion backend
    provider: Arc<dyn CompletionProvider>,
    /// Loop options
    options: RunOptions,
}

impl Swarm {
    /// Create a swarm with default options
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self::with_options(provider, RunOptions::default())
    }

    /// Create a swarm with explicit options
    pub fn with_options(provider: Arc<dyn CompletionProvider>, options: RunOptions) -> Self {
        Self { provider, options }
    }

    /// Create a swarm talking to the configured completion API
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = OpenAiClient::from_config(config)?;
        Ok(Self::with_options(
            Arc::new(provider),
            RunOptions::from(&config.agent),
        ))
    }

    /// Loop options
    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Run until the model replies without tool calls
    ///
    /// Messages are appended to `messages` in place; the outcome carries a
    /// snapshot of the transcript either way.
    pub async fn run(&self, agent: AgentRef, messages: &mut Vec<Message>) -> RunOutcome {
        log::info!(
            "[SWARM] Starting run with {} ({} messages)",
            agent.describe(),
            messages.len()
        );

        let mut state = RunState::new(agent, self.options.max_turns);

        let result = self.run_loop(&mut state, messages).await;

        log::info!(
            "[SWARM] Run finished after {} turn(s), {} handoff(s); active agent: {}",
            state.turn,
            state.handoffs,
            state.current_agent.describe()
        );

        match result {
            Ok(()) => RunOutcome::Completed(Response {
                agent: state.current_agent,
                messages: messages.clone(),
            }),
            Err(error) => {
                log::error!("[SWARM] Run aborted: {}", error);
                RunOutcome::Aborted {
                    agent: state.current_agent,
                    messages: messages.clone(),
                    error,
                }
            }
        }
    }

    /// Turn loop; any error returned here aborts the run
    async fn run_loop(&self, state: &mut RunState, messages: &mut Vec<Message>) -> Result<()> {
        loop {
            if !state.can_continue() {
                return Err(SwarmError::MaxTurns(state.turn));
            }

            let agent = Arc::clone(&state.current_agent);
            let registry = ToolRegistry::for_tools(agent.tools());

            let mut request_messages = Vec::with_capacity(messages.len() + 1);
            request_messages.push(Message::system(agent.instructions()));
            request_messages.extend(messages.iter().cloned());

            let request = CompletionRequest {
                model: agent.model().to_string(),
                messages: request_messages,
                tools: registry.definitions().to_vec(),
                temperature: self.options.temperature,
            };

            log::debug!(
                "[SWARM] Turn {} as {} with tools {:?}",
                state.turn + 1,
                agent.describe(),
                request.tool_names()
            );

            let response = self.provider.complete(&request).await?;
            let message = response.message;
            state.next_turn();

            if let Some(content) = message.content.as_deref().filter(|c| !c.is_empty()) {
                log::info!("[SWARM] {}: {}", agent.describe(), content);
            }

            let tool_calls = message.requested_tool_calls().map(<[ToolCall]>::to_vec);
            messages.push(message);

            let Some(tool_calls) = tool_calls else {
                log::info!("[SWARM] The model didn't use any more tools.");
                return Ok(());
            };

            for tool_call in &tool_calls {
                self.execute_tool_call(&registry, tool_call, state, messages)
                    .await?;
            }
        }
    }

    /// Run one tool call and append its result; errors are handled per policy
    async fn execute_tool_call(
        &self,
        registry: &ToolRegistry,
        tool_call: &ToolCall,
        state: &mut RunState,
        messages: &mut Vec<Message>,
    ) -> Result<()> {
        match registry.execute(tool_call).await {
            Ok(ToolOutput::Handoff(next)) => {
                let notice = transfer_notice(next.describe());
                log::info!("[SWARM] {}", notice);
                state.hand_off(next);
                messages.push(Message::tool_result(&tool_call.id, notice));
            }
            Ok(ToolOutput::Data(value)) => {
                let content = serde_json::to_string_pretty(&value)?;
                log::info!("[TOOL] {} -> {}", tool_call.name(), content);
                messages.push(Message::tool_result(&tool_call.id, content));
            }
            Err(error) => {
                log::error!(
                    "[TOOL] Error executing tool {}: {}",
                    tool_call.name(),
                    error
                );
                match self.options.tool_error_policy {
                    ToolErrorPolicy::Report => {
                        let content = json!({ "error": error.to_string() }).to_string();
                        messages.push(Message::tool_result(&tool_call.id, content));
                    }
                    ToolErrorPolicy::Skip => {}
                    ToolErrorPolicy::Abort => return Err(error),
                }
            }
        }
        Ok(())
    }
}
