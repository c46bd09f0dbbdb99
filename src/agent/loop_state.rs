//! Run loop state management
//!
//! Tracks the active agent and turn count of one in-flight run.

use crate::agent::definition::AgentRef;

/// State of one run of the handoff loop
#[derive(Debug, Clone)]
pub struct RunState {
    /// Agent whose instructions and tools drive the next turn
    pub current_agent: AgentRef,
    /// Completed turns
    pub turn: usize,
    /// Optional turn limit; `None` runs until the model stops calling tools
    pub max_turns: Option<usize>,
    /// Handoffs applied so far
    pub handoffs: usize,
}

impl RunState {
    /// Create a new loop state starting at the given agent
    pub fn new(agent: AgentRef, max_turns: Option<usize>) -> Self {
        Self {
            current_agent: agent,
            turn: 0,
            max_turns,
            handoffs: 0,
        }
    }

    /// Whether another turn may start
    pub fn can_continue(&self) -> bool {
        self.max_turns.map_or(true, |max| self.turn < max)
    }

    /// Switch the active agent
    pub fn hand_off(&mut self, agent: AgentRef) {
        self.current_agent = agent;
        self.handoffs += 1;
    }

    /// Increment the turn counter
    pub fn next_turn(&mut self) {
        self.turn += 1;
    }
}
