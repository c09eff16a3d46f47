//! Check command - single availability lookup.

use anyhow::Result;
use clap::Args;

use tagwatch_core::{MonitorConfig, TerminalOutcome};

use crate::Cli;

/// Arguments for the check command.
#[derive(Args)]
pub struct CheckArgs {
    /// Gamertag to check.
    pub gamertag: String,
}

/// Runs the check command: one lookup, no monitoring, no claim.
pub async fn run(args: &CheckArgs, cli: &Cli) -> Result<TerminalOutcome> {
    let session = super::establish(cli).await?;
    super::run_monitor(&session, &args.gamertag, MonitorConfig::default()).await
}
