//! Trait definitions for tagwatch.
//!
//! These are the seams between the monitor loop and its collaborators: the
//! wire-level reservation service and the human-readable status channel.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::{LookupOutcome, SessionCredential};

/// A service that can check and claim gamertag reservations.
///
/// Implementors issue single-shot requests only. No retry logic belongs
/// here; the monitor loop owns the retry policy and inspects the returned
/// [`LookupOutcome`] to drive it.
#[async_trait]
pub trait ReservationService: Send + Sync {
    /// Issues one availability check for `gamertag`.
    ///
    /// This never fails: every transport or protocol failure is folded into
    /// a [`LookupOutcome`] variant.
    async fn check(&self, gamertag: &str, credential: &SessionCredential) -> LookupOutcome;

    /// Issues one claim request for `gamertag`.
    ///
    /// Anything other than a successful claim is an error; the caller
    /// decides whether that is fatal (it is — claims are never retried).
    async fn claim(
        &self,
        gamertag: &str,
        credential: &SessionCredential,
    ) -> Result<(), CoreError>;
}

#[async_trait]
impl<T: ReservationService + ?Sized> ReservationService for std::sync::Arc<T> {
    async fn check(&self, gamertag: &str, credential: &SessionCredential) -> LookupOutcome {
        (**self).check(gamertag, credential).await
    }

    async fn claim(
        &self,
        gamertag: &str,
        credential: &SessionCredential,
    ) -> Result<(), CoreError> {
        (**self).claim(gamertag, credential).await
    }
}

/// Write-only notification channel for human-readable progress.
///
/// The monitor calls these with progress and terminal messages; no return
/// value is consumed and implementations must not fail.
pub trait StatusSink: Send + Sync {
    /// An operation is in progress ("Looking up gamertag...").
    fn progress(&self, message: &str);

    /// An operation completed in the user's favor.
    fn success(&self, message: &str);

    /// An operation failed or ended against the user.
    fn failure(&self, message: &str);

    /// A non-terminal problem worth showing ("Error: timeout").
    fn warn(&self, message: &str) {
        self.failure(message);
    }
}

/// A [`StatusSink`] that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl StatusSink for NullSink {
    fn progress(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn failure(&self, _message: &str) {}
}
