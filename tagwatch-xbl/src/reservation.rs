//! Gamertag reservation check and claim.
//!
//! # Endpoints
//!
//! ```text
//! POST https://gamertag.xboxlive.com/gamertags/reserve        (contract v1)
//! POST https://accounts.xboxlive.com/users/current/profile/gamertag  (contract v6)
//! ```
//!
//! The reservation check is a pure single-shot classifier: every transport
//! or protocol failure is folded into a [`LookupOutcome`] value because the
//! monitor's retry policy depends on inspecting it. The claim request is a
//! one-shot `Result` — the monitor never retries it.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use tagwatch_core::{CoreError, LookupOutcome, ReservationService, SessionCredential};

use crate::client::HttpClient;
use crate::error::XblError;

// ============================================================================
// Constants
// ============================================================================

/// Base URL for the gamertag reservation service.
pub const RESERVE_BASE_URL: &str = "https://gamertag.xboxlive.com";

/// Reservation-check endpoint.
pub const RESERVE_ENDPOINT: &str = "/gamertags/reserve";

/// Base URL for the account profile service.
pub const ACCOUNT_BASE_URL: &str = "https://accounts.xboxlive.com";

/// Claim endpoint.
pub const CLAIM_ENDPOINT: &str = "/users/current/profile/gamertag";

/// Contract version for the reservation endpoint.
const RESERVE_CONTRACT_VERSION: &str = "1";

/// Contract version for the claim endpoint.
const CLAIM_CONTRACT_VERSION: &str = "6";

// ============================================================================
// Wire Structures
// ============================================================================

/// Body of a reservation-check request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReserveRequest<'a> {
    gamertag: &'a str,
    reservation_id: &'a str,
    target_gamertag_fields: &'a str,
}

/// Body of a successful reservation-check response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReserveResponse {
    /// The handle plus any suffix, as normalized by the service.
    composed_gamertag: Option<String>,
}

/// Structured 400-class error body.
#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    code: i64,
    description: String,
}

/// Body of a claim request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClaimRequest<'a> {
    reservation_id: &'a str,
    gamertag: ClaimGamertag<'a>,
    preview: bool,
    use_legacy_entitlement: bool,
}

/// Gamertag fields of a claim request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClaimGamertag<'a> {
    gamertag: &'a str,
    gamertag_suffix: &'a str,
    classic_gamertag: &'a str,
}

// ============================================================================
// Reserve Client
// ============================================================================

/// Client for the gamertag reservation and claim endpoints.
#[derive(Debug, Clone)]
pub struct ReserveClient {
    http: HttpClient,
    reserve_base: String,
    account_base: String,
}

impl ReserveClient {
    /// Creates a client against the production endpoints.
    pub fn new() -> Result<Self, XblError> {
        Ok(Self {
            http: HttpClient::new()?,
            reserve_base: RESERVE_BASE_URL.to_string(),
            account_base: ACCOUNT_BASE_URL.to_string(),
        })
    }

    /// Creates a client against custom base URLs (for tests).
    pub fn with_base_urls(
        reserve_base: impl Into<String>,
        account_base: impl Into<String>,
    ) -> Result<Self, XblError> {
        Ok(Self {
            http: HttpClient::new()?,
            reserve_base: reserve_base.into(),
            account_base: account_base.into(),
        })
    }

    /// Issues one availability check and classifies the outcome.
    ///
    /// HTTP 200 with the requested handle echoed back unchanged means
    /// available; 200 with a different composed handle means taken; a
    /// structured 400 body is a definitive rejection; everything else is a
    /// transport error.
    #[instrument(skip(self, credential))]
    pub async fn check(
        &self,
        gamertag: &str,
        credential: &SessionCredential,
    ) -> LookupOutcome {
        let url = format!("{}{}", self.reserve_base, RESERVE_ENDPOINT);
        let body = ReserveRequest {
            gamertag,
            reservation_id: &credential.reservation_id,
            target_gamertag_fields: "gamertag",
        };

        let response = match self
            .http
            .post_json(&url, &credential.token, RESERVE_CONTRACT_VERSION, &body)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return LookupOutcome::TransportError {
                    message: e.to_string(),
                };
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                return LookupOutcome::TransportError {
                    message: e.to_string(),
                };
            }
        };

        match status {
            StatusCode::OK => match serde_json::from_str::<ReserveResponse>(&text) {
                Ok(body) => {
                    let composed = body.composed_gamertag.unwrap_or_default();
                    debug!(composed = %composed, "Reservation check answered");
                    // Case-and-suffix-exact comparison; any difference means
                    // the service composed something else for us.
                    if composed == gamertag {
                        LookupOutcome::Available
                    } else {
                        LookupOutcome::Unavailable { composed }
                    }
                }
                Err(e) => LookupOutcome::TransportError {
                    message: format!("undecodable response body: {e}"),
                },
            },
            StatusCode::BAD_REQUEST => match serde_json::from_str::<ServiceErrorBody>(&text) {
                Ok(body) => LookupOutcome::ClientError {
                    code: body.code,
                    description: body.description,
                },
                Err(e) => LookupOutcome::TransportError {
                    message: format!("undecodable error body: {e}"),
                },
            },
            other => {
                warn!(status = %other, "Unexpected reservation status");
                LookupOutcome::TransportError {
                    message: format!("unexpected status {other}"),
                }
            }
        }
    }

    /// Issues one claim request for an available gamertag.
    #[instrument(skip(self, credential))]
    pub async fn claim(
        &self,
        gamertag: &str,
        credential: &SessionCredential,
    ) -> Result<(), XblError> {
        let url = format!("{}{}", self.account_base, CLAIM_ENDPOINT);
        let body = ClaimRequest {
            reservation_id: &credential.reservation_id,
            gamertag: ClaimGamertag {
                gamertag,
                gamertag_suffix: "",
                classic_gamertag: gamertag,
            },
            preview: false,
            use_legacy_entitlement: false,
        };

        let response = self
            .http
            .post_json(&url, &credential.token, CLAIM_CONTRACT_VERSION, &body)
            .await?;

        let status = response.status();
        if status == StatusCode::OK {
            debug!("Claim accepted");
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ServiceErrorBody>(&text) {
            Ok(body) => format!("{} (code {})", body.description, body.code),
            Err(_) => format!("status {status}"),
        };
        warn!(status = %status, message = %message, "Claim rejected");
        Err(XblError::ClaimRejected(message))
    }
}

#[async_trait]
impl ReservationService for ReserveClient {
    async fn check(&self, gamertag: &str, credential: &SessionCredential) -> LookupOutcome {
        ReserveClient::check(self, gamertag, credential).await
    }

    async fn claim(
        &self,
        gamertag: &str,
        credential: &SessionCredential,
    ) -> Result<(), CoreError> {
        ReserveClient::claim(self, gamertag, credential)
            .await
            .map_err(|e| CoreError::Service(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_request_wire_format() {
        let body = ReserveRequest {
            gamertag: "Foo123",
            reservation_id: "2533274800000000",
            target_gamertag_fields: "gamertag",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["gamertag"], "Foo123");
        assert_eq!(json["reservationId"], "2533274800000000");
        assert_eq!(json["targetGamertagFields"], "gamertag");
    }

    #[test]
    fn test_claim_request_wire_format() {
        let body = ClaimRequest {
            reservation_id: "2533274800000000",
            gamertag: ClaimGamertag {
                gamertag: "Foo123",
                gamertag_suffix: "",
                classic_gamertag: "Foo123",
            },
            preview: false,
            use_legacy_entitlement: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["reservationId"], "2533274800000000");
        assert_eq!(json["gamertag"]["gamertag"], "Foo123");
        assert_eq!(json["gamertag"]["gamertagSuffix"], "");
        assert_eq!(json["gamertag"]["classicGamertag"], "Foo123");
        assert_eq!(json["preview"], false);
        assert_eq!(json["useLegacyEntitlement"], false);
    }

    #[test]
    fn test_parse_error_body() {
        let body: ServiceErrorBody =
            serde_json::from_str(r#"{"code":1007,"description":"Invalid reservation"}"#).unwrap();
        assert_eq!(body.code, 1007);
        assert_eq!(body.description, "Invalid reservation");
    }
}
