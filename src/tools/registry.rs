//! Tool registry - per-turn lookup and dispatch
//!
//! Built fresh from the active agent's tools on every turn, since a handoff can
//! change the tool set between turns.

use std::collections::HashMap;

use crate::core::{Result, SwarmError, ToolCall, ToolDefinition};
use crate::tools::schema::function_to_schema;
use crate::tools::tool::{Tool, ToolOutput};

/// Lookup from tool name to tool, plus the schemas sent to the model
pub struct ToolRegistry {
    /// Tools indexed by name
    tools: HashMap<String, Tool>,
    /// Schemas in the agent's tool order
    definitions: Vec<ToolDefinition>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            definitions: Vec::new(),
        }
    }

    /// Build a registry for an agent's tool list
    pub fn for_tools(tools: &[Tool]) -> Self {
        let mut registry = Self::new();
        for tool in tools {
            registry.register(tool.clone());
        }
        registry
    }

    /// Register a tool; a later tool with the same name replaces the earlier lookup entry
    pub fn register(&mut self, tool: Tool) {
        self.definitions.push(function_to_schema(&tool));
        if let Some(previous) = self.tools.insert(tool.name().to_string(), tool) {
            log::warn!(
                "[TOOL] Duplicate tool name '{}'; the last definition wins",
                previous.name()
            );
        }
    }

    /// Schemas for every registered tool
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    /// Look up a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Number of distinct tool names
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a tool call
    pub async fn execute(&self, tool_call: &ToolCall) -> Result<ToolOutput> {
        let name = tool_call.name();
        let tool = self
            .get(name)
            .ok_or_else(|| SwarmError::UnknownTool(name.to_string()))?;

        log::info!("[TOOL] {}({})", name, tool_call.function.arguments);

        tool.invoke(&tool_call.function.arguments).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::tool::Param;
    use serde_json::json;

    fn add_tool() -> Tool {
        Tool::builder("add")
            .description("Add two numbers")
            .param(Param::new("a").typed("number"))
            .param(Param::new("b").typed("number").with_default("0"))
            .handler(|args| {
                let a = args.get_f64("a").unwrap_or_default();
                let b = args.get_f64("b").unwrap_or_default();
                Ok(ToolOutput::data(a + b))
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_definitions_follow_tool_order() {
        let shout = Tool::builder("shout")
            .handler(|_| Ok(ToolOutput::data("HEY")))
            .build()
            .unwrap();
        let registry = ToolRegistry::for_tools(&[shout, add_tool()]);
        let names: Vec<_> = registry.definitions().iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["shout", "add"]);
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn test_execute() {
        let registry = ToolRegistry::for_tools(&[add_tool()]);
        let output = registry
            .execute(&ToolCall::new("call_1", "add", r#"{"a": 2, "b": 3}"#))
            .await
            .unwrap();
        assert!(matches!(output, ToolOutput::Data(v) if v == json!(5.0)));
    }

    #[tokio::test]
    async fn test_execute_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry
            .execute(&ToolCall::new("call_1", "missing", "{}"))
            .await
            .unwrap_err();
        assert!(matches!(err, SwarmError::UnknownTool(name) if name == "missing"));
    }
}
