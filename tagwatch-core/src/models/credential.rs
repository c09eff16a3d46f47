//! Session credential for the Xbox Live reservation endpoints.

use std::fmt;

/// Bearer authorization plus reservation identifier for one login session.
///
/// Immutable for the lifetime of a run once login succeeds; the monitor owns
/// it and hands it to the service by reference on every call. There is no
/// automatic re-authentication: an expired credential surfaces through the
/// normal lookup classification.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredential {
    /// Full authorization header value (`XBL3.0 x=<uhs>;<token>`).
    pub token: String,
    /// Opaque reservation identifier tying this session to a pending
    /// gamertag reservation (the account XUID).
    pub reservation_id: String,
}

impl SessionCredential {
    /// Creates a credential from an authorization value and reservation id.
    pub fn new(token: impl Into<String>, reservation_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            reservation_id: reservation_id.into(),
        }
    }
}

// The token is a bearer secret; keep it out of logs.
impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredential")
            .field("token", &"<redacted>")
            .field("reservation_id", &self.reservation_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let credential = SessionCredential::new("XBL3.0 x=123;secret", "2533274800000000");
        let debug = format!("{credential:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("2533274800000000"));
    }
}
