//! Agent module - agent definitions and the handoff run loop

pub mod definition;
pub mod loop_state;
pub mod orchestrator;
pub mod response;

pub use definition::{Agent, AgentBuilder, AgentRef};
pub use loop_state::RunState;
pub use orchestrator::{transfer_notice, RunOptions, Swarm};
pub use response::{Response, RunOutcome};
