//! Interactive default flow, matching the original tool.
//!
//! Loads `settings.json`, prompts for whatever is missing, then runs the
//! monitor with the settings' flags.

use anyhow::Result;

use tagwatch_core::{StatusSink, TerminalOutcome};

use crate::console;
use crate::Cli;

/// Runs the interactive flow.
pub async fn run(cli: &Cli) -> Result<TerminalOutcome> {
    console::print_header();

    let session = super::establish(cli).await?;

    let gamertag = if session.settings.desired_gamertag.is_empty() {
        console::prompt("Desired gamertag")?
    } else {
        session
            .sink
            .progress(&format!("Desired gamertag: {}", session.settings.desired_gamertag));
        session.settings.desired_gamertag.clone()
    };

    let config = session.settings.monitor_config();
    super::run_monitor(&session, &gamertag, config).await
}
