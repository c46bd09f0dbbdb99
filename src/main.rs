//! Swarm - multi-agent handoff demo
//!
//! Main entry point for the CLI application.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use swarm::agent::{RunOptions, RunOutcome, Swarm};
use swarm::demo::{self, triage};
use swarm::llm::ScriptedProvider;
use swarm::Config;

/// Swarm - run the triage/inventory/refunds agents on one request
#[derive(Parser, Debug)]
#[command(name = "swarm")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Opening user message
    #[arg(long, short = 'p', default_value = demo::DEFAULT_PROMPT)]
    prompt: String,

    /// Model for every demo agent
    #[arg(long, short = 'm')]
    model: Option<String>,

    /// Transcript output path
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Stop after this many turns
    #[arg(long)]
    max_turns: Option<usize>,

    /// Replay a scripted conversation instead of calling the API
    #[arg(long)]
    replay: bool,

    /// Enable debug output
    #[arg(long, short = 'd')]
    debug: bool,

    /// Print the default config file and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if args.print_config {
        println!("{}", Config::default_config_toml());
        return Ok(());
    }

    // Build configuration
    let mut config = Config::load();

    // Apply CLI overrides
    if let Some(model) = args.model {
        config.agent.default_model = model;
    }

    if let Some(output) = args.output {
        config.output.transcript_path = output;
    }

    if args.max_turns.is_some() {
        config.agent.max_turns = args.max_turns;
    }

    // Demo failures are reported, not turned into a failing exit status
    if let Err(e) = run(&config, &args.prompt, args.replay).await {
        log::error!("An unhandled error occurred: {}", e);
    }

    Ok(())
}

async fn run(config: &Config, prompt: &str, replay: bool) -> swarm::Result<()> {
    let swarm = if replay {
        Swarm::with_options(
            Arc::new(ScriptedProvider::new(triage::christmas_tree_script())),
            RunOptions::from(&config.agent),
        )
    } else {
        Swarm::from_config(config)?
    };

    let agent = triage::triage_agent(&config.agent.default_model)?.into_ref();

    let outcome =
        demo::run_demo_loop(&swarm, agent, prompt, &config.output.transcript_path).await?;

    match outcome {
        RunOutcome::Completed(response) => {
            println!(
                "[{}] {}",
                response.agent.describe(),
                response.final_content().unwrap_or_default()
            );
        }
        RunOutcome::Aborted { agent, error, .. } => {
            log::error!("Run aborted while {} was active: {}", agent.describe(), error);
        }
    }

    Ok(())
}
