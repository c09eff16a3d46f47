//! CLI command implementations.

pub mod check;
pub mod claim;
pub mod run;
pub mod watch;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::watch as watch_channel;
use tracing::debug;

use tagwatch_core::{MonitorConfig, StatusSink, TerminalOutcome};
use tagwatch_monitor::Monitor;
use tagwatch_xbl::{AuthClient, LoginIdentity, ReserveClient};

use crate::console::{self, ConsoleSink};
use crate::settings::Settings;
use crate::Cli;

/// Everything a command needs to drive a monitor run.
pub struct Session {
    /// Credential plus account gamertag from the login exchange.
    pub identity: LoginIdentity,
    /// Console output channel.
    pub sink: Arc<ConsoleSink>,
    /// Cancellation signal wired to Ctrl-C.
    pub cancel: watch_channel::Receiver<bool>,
    /// Loaded settings file.
    pub settings: Settings,
}

/// Loads settings, prompts for missing credentials, and logs in.
///
/// Login failure is fatal; the monitor loop is never entered without a
/// credential.
pub async fn establish(cli: &Cli) -> Result<Session> {
    let settings = Settings::load(&cli.settings_path());
    let sink = Arc::new(ConsoleSink::new(!cli.no_color));

    let (login, password) = credentials_for(&settings, sink.as_ref())?;

    sink.progress("Logging in...");
    let auth = AuthClient::new()?;
    let identity = auth
        .login(&login, &password)
        .await
        .context("Login failed, check credentials and try again")?;
    sink.success(&format!(
        "Successfully logged in as {}",
        identity.gamertag
    ));

    Ok(Session {
        identity,
        sink,
        cancel: spawn_ctrl_c_listener(),
        settings,
    })
}

/// Returns login and password, prompting for whichever the settings lack.
fn credentials_for(settings: &Settings, sink: &ConsoleSink) -> Result<(String, String)> {
    if !settings.login.is_empty() && !settings.password.is_empty() {
        return Ok((settings.login.clone(), settings.password.clone()));
    }

    println!("Please enter your Microsoft account credentials");
    sink.warn("Not compatible with 2FA or passwordless accounts");

    let login = if settings.login.is_empty() {
        console::prompt("Login")?
    } else {
        settings.login.clone()
    };
    let password = if settings.password.is_empty() {
        console::prompt("Password")?
    } else {
        settings.password.clone()
    };

    Ok((login, password))
}

/// Wires Ctrl-C to a cancellation channel.
fn spawn_ctrl_c_listener() -> watch_channel::Receiver<bool> {
    let (tx, rx) = watch_channel::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Ctrl-C received, cancelling");
            let _ = tx.send(true);
        }
    });
    rx
}

/// Runs one monitor/claim run for `gamertag` with the session's credential.
pub async fn run_monitor(
    session: &Session,
    gamertag: &str,
    config: MonitorConfig,
) -> Result<TerminalOutcome> {
    let service = ReserveClient::new()?;
    let sink: Arc<dyn StatusSink> = session.sink.clone();

    let mut monitor = Monitor::new(service, session.identity.credential.clone(), config)
        .with_sink(sink)
        .with_cancellation(session.cancel.clone());

    session
        .sink
        .progress(&format!("Looking up gamertag {gamertag}..."));
    Ok(monitor.run(gamertag).await)
}
