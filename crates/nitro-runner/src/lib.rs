//! Command handlers for the `nitro-runner` binary
//!
//! Kept out of `main.rs` so the commands can be driven with a mocked
//! [`SwapFlow`] and a scripted [`ReplySource`].

pub mod cli;
pub mod renderer;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use nitro_tools::SwapFlow;
use tracing::info;

use crate::cli::Command;
use crate::renderer::{render_chain_table, render_outcome};

/// Where the answer to the confirmation prompt comes from
pub trait ReplySource {
    fn reply(&mut self, prompt: &str) -> Result<String>;
}

/// Prints the prompt and reads one line from stdin.
pub struct StdinReplies;

impl ReplySource for StdinReplies {
    fn reply(&mut self, prompt: &str) -> Result<String> {
        let mut stdout = io::stdout();
        writeln!(stdout, "{prompt}")?;
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read confirmation from stdin")?;
        Ok(line)
    }
}

/// A fixed answer, used for `--yes`.
pub struct FixedReply(pub String);

impl ReplySource for FixedReply {
    fn reply(&mut self, _prompt: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// What a command printed and whether it succeeded
#[derive(Debug, Default)]
pub struct Report {
    pub output: Vec<String>,
    pub success: bool,
}

pub async fn run_command(
    flow: &SwapFlow,
    command: Command,
    json: bool,
    replies: &mut dyn ReplySource,
) -> Result<Report> {
    match command {
        Command::Chains { all } => {
            let registry = flow.chains().await?;
            let table = if all {
                render_chain_table(registry.chains())
            } else {
                render_chain_table(registry.live_chains())
            };
            Ok(Report {
                output: vec![table],
                success: true,
            })
        }
        Command::Quote(args) => {
            let outcome = flow.quote(&args.into_request(None)).await;
            Ok(Report {
                output: vec![render_outcome(&outcome, json)],
                success: outcome.success,
            })
        }
        Command::Swap {
            swap,
            to_address,
            yes,
        } => {
            let proposed = flow.propose(swap.into_request(to_address)).await;
            let Some(proposal) = proposed.proposal.clone() else {
                return Ok(Report {
                    output: vec![render_outcome(&proposed, json)],
                    success: false,
                });
            };

            let mut output = Vec::new();
            let reply = if yes {
                output.push(proposed.message.clone());
                "yes".to_string()
            } else {
                replies.reply(&proposed.message)?
            };
            info!("Confirmation reply: {}", reply.trim());

            let outcome = flow.confirm(&proposal, &reply).await;
            output.push(render_outcome(&outcome, json));
            Ok(Report {
                output,
                success: outcome.success,
            })
        }
    }
}
