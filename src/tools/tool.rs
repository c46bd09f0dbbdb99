//! Tool descriptors and invocation
//!
//! A tool is a named handler plus an explicit list of parameter descriptors.
//! Handlers either return plain data or hand control to another agent.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::{Map, Value};

use crate::agent::AgentRef;
use crate::core::{Result, SwarmError};
use crate::tools::schema::Signature;

/// Declared parameter of a tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Parameter name as the model must send it
    pub name: String,
    /// Declared type annotation, resolved through the schema type table
    pub declared_type: Option<String>,
    /// Default value text; a parameter with a default is optional
    pub default: Option<String>,
}

impl Param {
    /// Create an untyped, required parameter
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
            default: None,
        }
    }

    /// Attach a declared type
    pub fn typed(mut self, declared_type: impl Into<String>) -> Self {
        self.declared_type = Some(declared_type.into());
        self
    }

    /// Attach a default value (any text counts, valid JSON or not)
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Whether the model must always supply this parameter
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// Default as a JSON value: parsed when it is JSON, otherwise the raw text
    pub fn default_value(&self) -> Option<Value> {
        let text = self.default.as_deref()?.trim();
        if let Ok(value) = serde_json::from_str(text) {
            return Some(value);
        }
        let unquoted = text
            .strip_prefix('\'')
            .and_then(|t| t.strip_suffix('\''))
            .unwrap_or(text);
        Some(Value::String(unquoted.to_string()))
    }
}

/// Argument bag passed to a tool handler, keyed by parameter name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(Map<String, Value>);

impl Arguments {
    /// Decode the model's JSON argument string; must be an object (blank means none)
    pub fn parse(tool: &str, raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(SwarmError::invalid_arguments(
                tool,
                format!("expected a JSON object, got {}", other),
            )),
            Err(e) => Err(SwarmError::invalid_arguments(tool, e.to_string())),
        }
    }

    /// Get a raw argument value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a string argument by key
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.0
            .get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }

    /// Get a numeric argument by key
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(|v| v.as_f64())
    }

    /// Get a boolean argument by key
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(|v| v.as_bool())
    }

    /// Get a string argument, failing the tool call when it is missing
    pub fn require_string(&self, key: &str) -> Result<String> {
        self.get_string(key)
            .ok_or_else(|| SwarmError::tool(format!("missing string argument '{}'", key)))
    }

    /// Whether an argument is present
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Set an argument
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Arguments {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// What a tool produced
#[derive(Debug, Clone)]
pub enum ToolOutput {
    /// Plain JSON-serializable result
    Data(Value),
    /// Switch the active agent
    Handoff(AgentRef),
}

impl ToolOutput {
    /// Wrap a plain result
    pub fn data(value: impl Into<Value>) -> Self {
        Self::Data(value.into())
    }

    /// Hand off to another agent
    pub fn handoff(agent: impl Into<AgentRef>) -> Self {
        Self::Handoff(agent.into())
    }

    /// The target agent if this output is a handoff
    pub fn as_handoff(&self) -> Option<&AgentRef> {
        match self {
            Self::Handoff(agent) => Some(agent),
            Self::Data(_) => None,
        }
    }

    /// Check if this output is a handoff
    pub fn is_handoff(&self) -> bool {
        self.as_handoff().is_some()
    }
}

/// Handler behind a tool
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Run the tool with decoded arguments (defaults already applied)
    async fn call(&self, args: Arguments) -> Result<ToolOutput>;
}

/// Adapter for synchronous closures
struct FnHandler<F>(F);

#[async_trait]
impl<F> ToolHandler for FnHandler<F>
where
    F: Fn(Arguments) -> Result<ToolOutput> + Send + Sync,
{
    async fn call(&self, args: Arguments) -> Result<ToolOutput> {
        (self.0)(args)
    }
}

/// Adapter for closures returning boxed futures
struct AsyncFnHandler<F>(F);

#[async_trait]
impl<F> ToolHandler for AsyncFnHandler<F>
where
    F: Fn(Arguments) -> BoxFuture<'static, Result<ToolOutput>> + Send + Sync,
{
    async fn call(&self, args: Arguments) -> Result<ToolOutput> {
        (self.0)(args).await
    }
}

/// A callable exposed to the model
#[derive(Clone)]
pub struct Tool {
    name: String,
    description: String,
    params: Vec<Param>,
    handler: Arc<dyn ToolHandler>,
}

impl Tool {
    /// Start building a tool
    pub fn builder(name: impl Into<String>) -> ToolBuilder {
        ToolBuilder::new(name)
    }

    /// Tool name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declared parameters, in order
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Decode the raw argument string, fill defaults, and run the handler
    pub async fn invoke(&self, raw_arguments: &str) -> Result<ToolOutput> {
        let mut args = Arguments::parse(&self.name, raw_arguments)?;

        for param in &self.params {
            if args.contains(&param.name) {
                continue;
            }
            if let Some(value) = param.default_value() {
                args.insert(param.name.clone(), value);
            }
        }

        self.handler.call(args).await
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Tool`]
pub struct ToolBuilder {
    name: String,
    description: String,
    params: Vec<Param>,
    handler: Option<Arc<dyn ToolHandler>>,
    error: Option<SwarmError>,
}

impl ToolBuilder {
    /// Create a new builder with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            params: Vec::new(),
            handler: None,
            error: None,
        }
    }

    /// Set the description shown to the model
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a parameter
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Add parameters from a textual signature such as `(item_id, reason = "not provided")`
    pub fn signature(mut self, text: &str) -> Self {
        match Signature::parse(text) {
            Ok(params) => self.params.extend(params),
            Err(e) => {
                if self.error.is_none() {
                    self.error = Some(e);
                }
            }
        }
        self
    }

    /// Use a synchronous closure as the handler
    pub fn handler<F>(mut self, f: F) -> Self
    where
        F: Fn(Arguments) -> Result<ToolOutput> + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(FnHandler(f)));
        self
    }

    /// Use a closure returning a boxed future as the handler
    pub fn async_handler<F>(mut self, f: F) -> Self
    where
        F: Fn(Arguments) -> BoxFuture<'static, Result<ToolOutput>> + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(AsyncFnHandler(f)));
        self
    }

    /// Use an existing handler implementation
    pub fn handler_impl(mut self, handler: Arc<dyn ToolHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Build the tool, validating its parameter list
    pub fn build(self) -> Result<Tool> {
        if let Some(e) = self.error {
            return Err(e);
        }

        let handler = self.handler.ok_or_else(|| {
            SwarmError::schema(format!("tool '{}' has no callable handler", self.name))
        })?;

        for (i, param) in self.params.iter().enumerate() {
            if param.name.trim().is_empty() {
                return Err(SwarmError::schema(format!(
                    "tool '{}' has a parameter with an empty name",
                    self.name
                )));
            }
            if self.params[..i].iter().any(|p| p.name == param.name) {
                return Err(SwarmError::schema(format!(
                    "tool '{}' declares parameter '{}' twice",
                    self.name, param.name
                )));
            }
        }

        Ok(Tool {
            name: self.name,
            description: self.description,
            params: self.params,
            handler,
        })
    }
}
