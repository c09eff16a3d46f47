//! The monitor/claim controller.
//!
//! One [`Monitor`] instance owns one run: the credential, the configuration,
//! and both counters live on the instance, so independent runs can never
//! contaminate each other's state.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use tagwatch_core::{
    AbortReason, LookupOutcome, MonitorConfig, NullSink, ReservationService, SessionCredential,
    StatusSink, TerminalOutcome,
};

/// Ceiling on back-to-back transport failures before the run aborts.
pub const MAX_CONSECUTIVE_ERRORS: u32 = 10;

/// Controller phases. Terminal results leave the loop instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Lookup,
    Wait,
    Claim,
}

/// The availability-monitoring and claim state machine.
///
/// Drives the reservation service in a loop: look the gamertag up, decide
/// whether to stop, wait, retry, or claim, and track the consecutive
/// transport-error count so an unreachable service cannot cause a retry
/// storm.
pub struct Monitor<S> {
    service: S,
    credential: SessionCredential,
    config: MonitorConfig,
    sink: Arc<dyn StatusSink>,
    cancel: Option<watch::Receiver<bool>>,
    attempt_count: u32,
    error_count: u32,
}

impl<S: ReservationService> Monitor<S> {
    /// Creates a monitor for one run.
    ///
    /// Invalid configuration fields are replaced with defaults; configuration
    /// is never an error.
    pub fn new(service: S, credential: SessionCredential, config: MonitorConfig) -> Self {
        Self {
            service,
            credential,
            config: config.normalized(),
            sink: Arc::new(NullSink),
            cancel: None,
            attempt_count: 0,
            error_count: 0,
        }
    }

    /// Sets the status sink for progress and terminal messages.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn StatusSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Attaches a cancellation signal.
    ///
    /// When the channel flips to `true` the run unwinds to
    /// `Aborted(Cancelled)` at the next suspension point, interrupting a
    /// pending wait without issuing another network call.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Lookups issued so far (monotonic, never reset).
    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    /// Consecutive transport errors since the last status-carrying response.
    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    /// Runs the state machine to a terminal outcome for `gamertag`.
    ///
    /// Emits exactly one final status message per run.
    #[instrument(skip(self), fields(auto_claim = self.config.auto_claim, monitor = self.config.monitor_availability))]
    pub async fn run(&mut self, gamertag: &str) -> TerminalOutcome {
        let outcome = self.drive(gamertag).await;
        self.report(gamertag, &outcome);
        outcome
    }

    /// The state loop proper.
    async fn drive(&mut self, gamertag: &str) -> TerminalOutcome {
        let mut phase = Phase::Lookup;

        loop {
            if self.is_cancelled() {
                return TerminalOutcome::Aborted(AbortReason::Cancelled);
            }

            phase = match phase {
                Phase::Lookup => {
                    self.attempt_count += 1;
                    debug!(attempt = self.attempt_count, "Looking up gamertag");

                    let outcome = self.service.check(gamertag, &self.credential).await;
                    // Any response with an HTTP status resets the ceiling,
                    // including a 400 that aborts the run.
                    if outcome.carries_status() {
                        self.error_count = 0;
                    }

                    match outcome {
                        LookupOutcome::Available => {
                            info!(attempt = self.attempt_count, "Gamertag is available");
                            if self.config.auto_claim {
                                Phase::Claim
                            } else {
                                return TerminalOutcome::ConfirmedAvailable;
                            }
                        }
                        LookupOutcome::Unavailable { composed } => {
                            debug!(composed = %composed, "Gamertag is taken");
                            if self.config.monitor_availability {
                                self.sink.progress(&format!(
                                    "Gamertag {gamertag} is unavailable, monitoring... ({})",
                                    self.attempt_count
                                ));
                                Phase::Wait
                            } else {
                                return TerminalOutcome::ConfirmedUnavailable;
                            }
                        }
                        LookupOutcome::ClientError { code, description } => {
                            // The service definitively rejected the request
                            // shape or credential; retrying cannot help.
                            return TerminalOutcome::Aborted(AbortReason::Rejected {
                                code,
                                description,
                            });
                        }
                        LookupOutcome::TransportError { message } => {
                            self.error_count += 1;
                            warn!(
                                error = %message,
                                consecutive = self.error_count,
                                "Lookup failed"
                            );
                            self.sink.warn(&format!("Error: {message}"));
                            if self.error_count < MAX_CONSECUTIVE_ERRORS {
                                // Immediate retry; the ceiling alone guards
                                // against storms.
                                Phase::Lookup
                            } else {
                                return TerminalOutcome::Aborted(AbortReason::TooManyErrors);
                            }
                        }
                    }
                }

                Phase::Wait => {
                    let delay = Duration::from_secs(self.config.retry_delay_secs);
                    if self.sleep_or_cancel(delay).await {
                        return TerminalOutcome::Aborted(AbortReason::Cancelled);
                    }
                    Phase::Lookup
                }

                Phase::Claim => {
                    self.sink
                        .progress(&format!("Attempting to claim gamertag {gamertag}..."));
                    match self.service.claim(gamertag, &self.credential).await {
                        Ok(()) => return TerminalOutcome::Claimed,
                        Err(e) => {
                            // Claims are one-shot; a failed claim ends the run.
                            return TerminalOutcome::Aborted(AbortReason::ClaimFailed(
                                e.to_string(),
                            ));
                        }
                    }
                }
            };
        }
    }

    /// True once the cancellation channel has flipped.
    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Sleeps for `delay`, returning `true` if cancelled mid-wait.
    async fn sleep_or_cancel(&mut self, delay: Duration) -> bool {
        let sleep = tokio::time::sleep(delay);
        tokio::pin!(sleep);

        loop {
            let Some(rx) = self.cancel.as_mut() else {
                (&mut sleep).await;
                return false;
            };

            if *rx.borrow() {
                return true;
            }

            tokio::select! {
                () = &mut sleep => return false,
                changed = rx.changed() => {
                    match changed {
                        Ok(()) => {
                            if *rx.borrow_and_update() {
                                return true;
                            }
                        }
                        // Sender gone; cancellation can never arrive.
                        Err(_) => self.cancel = None,
                    }
                }
            }
        }
    }

    /// Emits the single final status message for a terminal outcome.
    fn report(&self, gamertag: &str, outcome: &TerminalOutcome) {
        match outcome {
            TerminalOutcome::Claimed => {
                self.sink
                    .success(&format!("Successfully claimed gamertag {gamertag}!"));
            }
            TerminalOutcome::ConfirmedAvailable => {
                self.sink
                    .success(&format!("Gamertag {gamertag} is available"));
            }
            TerminalOutcome::ConfirmedUnavailable => {
                self.sink
                    .failure(&format!("Gamertag {gamertag} is unavailable"));
            }
            TerminalOutcome::Aborted(AbortReason::Cancelled) => {
                self.sink.failure("Cancelled by user");
            }
            TerminalOutcome::Aborted(reason) => {
                self.sink.failure(&format!("Aborted: {reason}"));
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
