//! Agent definitions
//!
//! An agent is a named persona: model, system instructions, and the tools it may call.

use std::fmt;
use std::sync::Arc;

use crate::core::config::DEFAULT_MODEL;
use crate::tools::Tool;

/// Shared handle to an agent; handoffs pass these around
pub type AgentRef = Arc<Agent>;

/// Default agent name
pub const DEFAULT_NAME: &str = "Agent";

/// Default system instructions
pub const DEFAULT_INSTRUCTIONS: &str = "You are a helpful Agent";

/// A named persona with instructions and tools
#[derive(Clone)]
pub struct Agent {
    name: String,
    model: String,
    instructions: String,
    tools: Vec<Tool>,
}

/// Builder for creating Agents; omitted fields take the defaults
#[derive(Default)]
pub struct AgentBuilder {
    name: Option<String>,
    model: Option<String>,
    instructions: Option<String>,
    tools: Vec<Tool>,
}

impl AgentBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the system instructions
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Append a tool
    pub fn tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool);
        self
    }

    /// Replace the tool list
    pub fn tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = tools;
        self
    }

    /// Build the Agent
    pub fn build(self) -> Agent {
        Agent {
            name: self.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            instructions: self
                .instructions
                .unwrap_or_else(|| DEFAULT_INSTRUCTIONS.to_string()),
            tools: self.tools,
        }
    }
}

impl Agent {
    /// Create an agent with default model, instructions and no tools
    pub fn new(name: impl Into<String>) -> Self {
        AgentBuilder::new().name(name).build()
    }

    /// Create a builder for more control
    pub fn builder() -> AgentBuilder {
        AgentBuilder::new()
    }

    /// Agent name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Model identifier sent with each completion request
    pub fn model(&self) -> &str {
        &self.model
    }

    /// System instructions
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Tools in declaration order
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Display name
    pub fn describe(&self) -> &str {
        &self.name
    }

    /// Names of this agent's tools
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Wrap in a shared handle
    pub fn into_ref(self) -> AgentRef {
        Arc::new(self)
    }
}

impl Default for Agent {
    fn default() -> Self {
        AgentBuilder::new().build()
    }
}

/// Agents compare by persona; tool handlers are compared by name only
impl PartialEq for Agent {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.model == other.model
            && self.instructions == other.instructions
            && self.tool_names() == other.tool_names()
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("tools", &self.tool_names())
            .finish()
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolOutput;

    #[test]
    fn test_defaults() {
        let agent = Agent::default();
        assert_eq!(agent.name(), "Agent");
        assert_eq!(agent.model(), "gpt-4o-mini");
        assert_eq!(agent.instructions(), "You are a helpful Agent");
        assert!(agent.tools().is_empty());
    }

    #[test]
    fn test_builder_overrides_only_given_fields() {
        let tool = Tool::builder("ping")
            .handler(|_| Ok(ToolOutput::data("pong")))
            .build()
            .unwrap();
        let agent = Agent::builder()
            .name("Support")
            .instructions("Be brief")
            .tool(tool)
            .build();

        assert_eq!(agent.name(), "Support");
        assert_eq!(agent.model(), "gpt-4o-mini");
        assert_eq!(agent.instructions(), "Be brief");
        assert_eq!(agent.tool_names(), vec!["ping"]);
        assert_eq!(agent.to_string(), "Support");
    }

    #[test]
    fn test_handoff_capability_check() {
        let data = ToolOutput::data("item_00000");
        let handoff = ToolOutput::handoff(Agent::new("Refunds Agent"));
        assert!(!data.is_handoff());
        assert_eq!(
            handoff.as_handoff().map(|a| a.describe()),
            Some("Refunds Agent")
        );
    }
}
