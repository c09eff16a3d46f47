//! Claim command - one-shot claim of an available gamertag.

use anyhow::Result;
use clap::Args;

use tagwatch_core::{MonitorConfig, TerminalOutcome};

use crate::Cli;

/// Arguments for the claim command.
#[derive(Args)]
pub struct ClaimArgs {
    /// Gamertag to claim.
    pub gamertag: String,
}

/// Runs the claim command: one lookup, claim immediately if available.
pub async fn run(args: &ClaimArgs, cli: &Cli) -> Result<TerminalOutcome> {
    let session = super::establish(cli).await?;
    let config = MonitorConfig {
        auto_claim: true,
        ..MonitorConfig::default()
    };
    super::run_monitor(&session, &args.gamertag, config).await
}
