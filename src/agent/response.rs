//! Run results
//!
//! Success and failure share one outcome type: both carry the transcript, a
//! failure additionally carries the error that stopped the run.

use crate::agent::definition::AgentRef;
use crate::core::{Message, Result, SwarmError};

/// Result of a run that ended with a final answer
#[derive(Debug, Clone)]
pub struct Response {
    /// Agent active when the loop terminated
    pub agent: AgentRef,
    /// Full transcript, excluding the per-turn system message
    pub messages: Vec<Message>,
}

impl Response {
    /// Content of the last assistant message, if any
    pub fn final_content(&self) -> Option<&str> {
        self.messages.last().and_then(|m| m.content.as_deref())
    }
}

/// How a run ended
#[derive(Debug)]
pub enum RunOutcome {
    /// The model produced a message without tool calls
    Completed(Response),
    /// The run stopped on a run-level error; the transcript so far is kept
    Aborted {
        agent: AgentRef,
        messages: Vec<Message>,
        error: SwarmError,
    },
}

impl RunOutcome {
    /// Transcript collected by the run, complete or partial
    pub fn messages(&self) -> &[Message] {
        match self {
            Self::Completed(response) => &response.messages,
            Self::Aborted { messages, .. } => messages,
        }
    }

    /// Agent active when the run ended
    pub fn agent(&self) -> &AgentRef {
        match self {
            Self::Completed(response) => &response.agent,
            Self::Aborted { agent, .. } => agent,
        }
    }

    /// Check if the run ended normally
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// The error that aborted the run
    pub fn error(&self) -> Option<&SwarmError> {
        match self {
            Self::Completed(_) => None,
            Self::Aborted { error, .. } => Some(error),
        }
    }

    /// Convert into a plain result, dropping the partial transcript on failure
    pub fn into_result(self) -> Result<Response> {
        match self {
            Self::Completed(response) => Ok(response),
            Self::Aborted { error, .. } => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Agent;

    #[test]
    fn test_completed_outcome() {
        let outcome = RunOutcome::Completed(Response {
            agent: Agent::new("Refunds Agent").into_ref(),
            messages: vec![Message::user("hi"), Message::assistant("Done")],
        });
        assert!(outcome.is_completed());
        assert_eq!(outcome.messages().len(), 2);
        let response = outcome.into_result().unwrap();
        assert_eq!(response.final_content(), Some("Done"));
    }

    #[test]
    fn test_aborted_outcome_keeps_transcript() {
        let outcome = RunOutcome::Aborted {
            agent: Agent::default().into_ref(),
            messages: vec![Message::user("hi")],
            error: SwarmError::api("boom"),
        };
        assert!(!outcome.is_completed());
        assert_eq!(outcome.messages().len(), 1);
        assert!(outcome.error().is_some());
        assert!(outcome.into_result().is_err());
    }
}
