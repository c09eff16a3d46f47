//! Outcome types for lookups and monitor runs.
//!
//! A single availability check classifies into a [`LookupOutcome`]; a whole
//! monitor/claim run terminates in a [`TerminalOutcome`]. Transport failures
//! are plain data here, never propagated errors, because the monitor's retry
//! policy depends on inspecting them.

use std::fmt;

// ============================================================================
// Lookup Outcome
// ============================================================================

/// Classified result of one reservation-check request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The service echoed the requested gamertag back unchanged.
    Available,

    /// The service answered successfully but assigned a different composed
    /// gamertag (the requested one is taken).
    Unavailable {
        /// The composed gamertag the service offered instead.
        composed: String,
    },

    /// The service rejected the request with a structured 400 body.
    ClientError {
        /// Service error code.
        code: i64,
        /// Human-readable description from the error body.
        description: String,
    },

    /// Network failure, timeout, unexpected status, or undecodable response.
    TransportError {
        /// Best available description of the failure.
        message: String,
    },
}

impl LookupOutcome {
    /// Returns true if this outcome carries an HTTP status from the service.
    ///
    /// The consecutive-error counter resets on any such outcome, including a
    /// 400 rejection.
    pub fn carries_status(&self) -> bool {
        !matches!(self, LookupOutcome::TransportError { .. })
    }
}

// ============================================================================
// Terminal Outcome
// ============================================================================

/// Why a monitor run was aborted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    /// The service definitively rejected the request (structured 400).
    Rejected {
        /// Service error code.
        code: i64,
        /// Human-readable description from the error body.
        description: String,
    },

    /// The consecutive transport-error ceiling was reached.
    TooManyErrors,

    /// The one-shot claim request failed.
    ClaimFailed(String),

    /// A cancellation signal interrupted the run.
    Cancelled,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::Rejected { code, description } => {
                write!(f, "Error code {code}: {description}")
            }
            AbortReason::TooManyErrors => write!(f, "too many consecutive errors"),
            AbortReason::ClaimFailed(message) => write!(f, "claim failed: {message}"),
            AbortReason::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Final result of a monitor/claim run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalOutcome {
    /// The gamertag was claimed for the account.
    Claimed,

    /// The gamertag is available (auto-claim was off).
    ConfirmedAvailable,

    /// The gamertag is unavailable (monitoring was off).
    ConfirmedUnavailable,

    /// The run stopped without a definitive answer.
    Aborted(AbortReason),
}

impl TerminalOutcome {
    /// Returns true for outcomes where the desired gamertag ended up usable.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            TerminalOutcome::Claimed | TerminalOutcome::ConfirmedAvailable
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carries_status() {
        assert!(LookupOutcome::Available.carries_status());
        assert!(
            LookupOutcome::Unavailable {
                composed: "Foo123#4567".to_string()
            }
            .carries_status()
        );
        assert!(
            LookupOutcome::ClientError {
                code: 1007,
                description: "Invalid reservation".to_string()
            }
            .carries_status()
        );
        assert!(
            !LookupOutcome::TransportError {
                message: "connection refused".to_string()
            }
            .carries_status()
        );
    }

    #[test]
    fn test_terminal_success() {
        assert!(TerminalOutcome::Claimed.is_success());
        assert!(TerminalOutcome::ConfirmedAvailable.is_success());
        assert!(!TerminalOutcome::ConfirmedUnavailable.is_success());
        assert!(!TerminalOutcome::Aborted(AbortReason::TooManyErrors).is_success());
    }

    #[test]
    fn test_abort_reason_display() {
        let rejected = AbortReason::Rejected {
            code: 1007,
            description: "Invalid reservation".to_string(),
        };
        assert_eq!(rejected.to_string(), "Error code 1007: Invalid reservation");
        assert_eq!(
            AbortReason::TooManyErrors.to_string(),
            "too many consecutive errors"
        );
        assert_eq!(AbortReason::Cancelled.to_string(), "cancelled");
    }
}
