//! Demo driver
//!
//! Seeds a user message, runs the swarm once, and writes the transcript to disk.

pub mod triage;

use std::fs;
use std::path::Path;

use crate::agent::{AgentRef, RunOutcome, Swarm};
use crate::core::{Message, Result};

/// Opening message of the triage demo
pub const DEFAULT_PROMPT: &str = "I would like to return a christmas tree.";

/// Write a transcript as pretty-printed JSON
pub fn save_transcript(path: &Path, messages: &[Message]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(messages)?;
    fs::write(path, content)?;
    Ok(())
}

/// Read a transcript written by [`save_transcript`]
pub fn load_transcript(path: &Path) -> Result<Vec<Message>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Run one conversation starting from `prompt` and persist whatever transcript results
pub async fn run_demo_loop(
    swarm: &Swarm,
    agent: AgentRef,
    prompt: &str,
    output: &Path,
) -> Result<RunOutcome> {
    let mut messages = vec![Message::user(prompt.trim())];

    let outcome = swarm.run(agent, &mut messages).await;

    save_transcript(output, outcome.messages())?;
    log::info!(
        "[DEMO] Wrote {} messages to {}",
        outcome.messages().len(),
        output.display()
    );

    Ok(outcome)
}
