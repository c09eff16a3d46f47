// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Tagwatch CLI - Xbox Live gamertag availability monitoring and claiming.
//!
//! # Examples
//!
//! ```bash
//! # Interactive flow (settings.json + prompts), like the original tool
//! tagwatch
//!
//! # One availability check
//! tagwatch check Foo123
//!
//! # Poll every 75 seconds until available
//! tagwatch watch Foo123
//!
//! # Poll every 30 seconds and claim automatically
//! tagwatch watch Foo123 --claim --delay 30
//!
//! # Claim a gamertag that is already available
//! tagwatch claim Foo123
//! ```

mod commands;
mod console;
mod settings;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tagwatch_core::{AbortReason, TerminalOutcome};

use commands::{check, claim, run, watch};

// ============================================================================
// CLI Definition
// ============================================================================

/// Tagwatch CLI - gamertag availability monitoring.
#[derive(Parser)]
#[command(name = "tagwatch")]
#[command(about = "Xbox Live gamertag availability monitor and claim tool")]
#[command(long_about = r#"
Tagwatch checks whether an Xbox Live gamertag is available, optionally
claims it, and can poll until it frees up.

With no subcommand it runs the interactive flow: settings.json is loaded
from the working directory and anything missing is prompted for.

Examples:
  tagwatch                          # Interactive flow
  tagwatch check Foo123             # One availability check
  tagwatch watch Foo123 --claim     # Poll and claim when available
  tagwatch claim Foo123             # One-shot claim
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs the interactive flow.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the settings file.
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (no log output).
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Check whether a gamertag is available.
    #[command(visible_alias = "c")]
    Check(check::CheckArgs),

    /// Poll until a gamertag becomes available.
    #[command(visible_alias = "w")]
    Watch(watch::WatchArgs),

    /// Claim an available gamertag.
    Claim(claim::ClaimArgs),
}

impl Cli {
    /// The settings path to use (flag or `settings.json` in the cwd).
    pub fn settings_path(&self) -> PathBuf {
        self.settings
            .clone()
            .unwrap_or_else(settings::default_settings_path)
    }
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Claimed, confirmed available, or cancelled by the user.
    Success = 0,
    /// General error (login failure, rejection, failed claim).
    Error = 1,
    /// The gamertag is taken.
    Unavailable = 2,
    /// Gave up after too many consecutive transport errors.
    ErrorCeiling = 3,
}

/// Maps a terminal outcome to a process exit code.
///
/// The error ceiling gets its own code so scripts can tell "the network is
/// bad" apart from "the request was rejected".
fn exit_code_for(outcome: &TerminalOutcome) -> i32 {
    match outcome {
        TerminalOutcome::Claimed | TerminalOutcome::ConfirmedAvailable => {
            ExitCode::Success as i32
        }
        TerminalOutcome::ConfirmedUnavailable => ExitCode::Unavailable as i32,
        TerminalOutcome::Aborted(AbortReason::TooManyErrors) => ExitCode::ErrorCeiling as i32,
        // The original exits cleanly on Ctrl-C.
        TerminalOutcome::Aborted(AbortReason::Cancelled) => ExitCode::Success as i32,
        TerminalOutcome::Aborted(_) => ExitCode::Error as i32,
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("tagwatch=debug,info")
    } else {
        EnvFilter::new("tagwatch=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let code = match dispatch(&cli).await {
        Ok(outcome) => exit_code_for(&outcome),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            ExitCode::Error as i32
        }
    };

    std::process::exit(code);
}

async fn dispatch(cli: &Cli) -> Result<TerminalOutcome> {
    match &cli.command {
        Some(Commands::Check(args)) => check::run(args, cli).await,
        Some(Commands::Watch(args)) => watch::run(args, cli).await,
        Some(Commands::Claim(args)) => claim::run(args, cli).await,
        None => run::run(cli).await,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code_for(&TerminalOutcome::Claimed), 0);
        assert_eq!(exit_code_for(&TerminalOutcome::ConfirmedAvailable), 0);
        assert_eq!(exit_code_for(&TerminalOutcome::ConfirmedUnavailable), 2);
        assert_eq!(
            exit_code_for(&TerminalOutcome::Aborted(AbortReason::TooManyErrors)),
            3
        );
        assert_eq!(
            exit_code_for(&TerminalOutcome::Aborted(AbortReason::Cancelled)),
            0
        );
        assert_eq!(
            exit_code_for(&TerminalOutcome::Aborted(AbortReason::Rejected {
                code: 1007,
                description: "Invalid reservation".to_string()
            })),
            1
        );
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_watch_args() {
        let cli = Cli::parse_from(["tagwatch", "watch", "Foo123", "--claim", "--delay", "30"]);
        match cli.command {
            Some(Commands::Watch(args)) => {
                assert_eq!(args.gamertag, "Foo123");
                assert!(args.claim);
                assert_eq!(args.delay, 30);
            }
            _ => panic!("expected watch command"),
        }
    }

    #[test]
    fn test_default_settings_path() {
        let cli = Cli::parse_from(["tagwatch"]);
        assert_eq!(cli.settings_path(), PathBuf::from("settings.json"));
    }
}
