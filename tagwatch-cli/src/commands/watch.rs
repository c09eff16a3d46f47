//! Watch command - poll until the gamertag becomes available.

use anyhow::Result;
use clap::Args;

use tagwatch_core::{MonitorConfig, DEFAULT_RETRY_DELAY_SECS, TerminalOutcome};

use crate::Cli;

/// Arguments for the watch command.
#[derive(Args)]
pub struct WatchArgs {
    /// Gamertag to watch.
    pub gamertag: String,

    /// Claim the gamertag automatically once it becomes available.
    #[arg(long)]
    pub claim: bool,

    /// Delay between lookups in seconds.
    #[arg(long, short, default_value_t = DEFAULT_RETRY_DELAY_SECS)]
    pub delay: u64,
}

/// Runs the watch command: monitor until available, optionally claim.
pub async fn run(args: &WatchArgs, cli: &Cli) -> Result<TerminalOutcome> {
    let session = super::establish(cli).await?;
    let config = MonitorConfig {
        auto_claim: args.claim,
        monitor_availability: true,
        retry_delay_secs: args.delay,
    };
    super::run_monitor(&session, &args.gamertag, config).await
}
