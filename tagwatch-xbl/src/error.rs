//! Xbox Live client error types.

use thiserror::Error;

/// Errors from the Xbox Live authentication and claim endpoints.
///
/// The reservation check deliberately does not use this type: its failures
/// are classified into `LookupOutcome` values instead of being propagated.
#[derive(Debug, Error)]
pub enum XblError {
    /// Login failed (bad credentials, 2FA account, or a changed login page).
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The login page no longer matches the expected shape.
    #[error("Login page parse error: {0}")]
    LoginPageChanged(String),

    /// An expected token or claim was missing from a token response.
    #[error("Missing claim in token response: {0}")]
    MissingClaim(String),

    /// The claim endpoint refused the request.
    #[error("Claim rejected: {0}")]
    ClaimRejected(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for XblError {
    fn from(e: reqwest::Error) -> Self {
        XblError::Http(e.to_string())
    }
}

impl From<serde_json::Error> for XblError {
    fn from(e: serde_json::Error) -> Self {
        XblError::Parse(e.to_string())
    }
}
