//! Swarm - a minimal multi-agent orchestration loop
//!
//! Agents are named personas with instructions and tools. A run repeatedly
//! calls a chat-completion API, executes the tool calls the model requests,
//! and switches the active agent whenever a tool hands off to another one.
//!
//! # Architecture
//!
//! - **Core**: Shared types, configuration, and error handling
//! - **LLM**: Completion provider abstraction with an OpenAI-compatible client
//! - **Tools**: Tool descriptors, schema generation, and dispatch
//! - **Agent**: Agent definitions and the run loop
//! - **Demo**: The triage/inventory/refunds example and transcript persistence
//!
//! # Usage
//!
//! ```rust,no_run
//! use swarm::{Agent, Config, Message, Swarm};
//!
//! #[tokio::main]
//! async fn main() {
//!     let swarm = Swarm::from_config(&Config::load()).unwrap();
//!     let mut messages = vec![Message::user("Hello")];
//!
//!     let outcome = swarm.run(Agent::default().into_ref(), &mut messages).await;
//!     println!("{:?}", outcome.messages().last());
//! }
//! ```

pub mod agent;
pub mod core;
pub mod demo;
pub mod llm;
pub mod tools;

// Re-export commonly used items
pub use crate::agent::{Agent, AgentRef, Response, RunOutcome, Swarm};
pub use crate::core::{Config, Message, Result, SwarmError};
pub use crate::tools::{Tool, ToolOutput};
