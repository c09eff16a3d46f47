//! Microsoft account login chain.
//!
//! Produces the `XBL3.0 x=<uhs>;<token>` authorization value plus the
//! account XUID (used as the reservation identifier) in four steps:
//!
//! 1. **RPS pre-auth** - fetch the live.com authorize page, scrape the
//!    `PPFT` hidden field and the `urlPost` target, POST the credentials,
//!    and read the access token from the redirect URL fragment.
//! 2. **User token** - exchange the RPS ticket at
//!    `user.auth.xboxlive.com/user/authenticate`.
//! 3. **XSTS token** - authorize at `xsts.auth.xboxlive.com/xsts/authorize`
//!    for the `http://xboxlive.com` relying party.
//! 4. Read the XUID and current gamertag from the XSTS display claims.
//!
//! Accounts with 2FA or passwordless sign-in cannot complete step 1; that
//! surfaces as [`XblError::AuthenticationFailed`].

use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use tagwatch_core::SessionCredential;

use crate::client::USER_AGENT;
use crate::error::XblError;

// ============================================================================
// Constants
// ============================================================================

/// OAuth authorize URL for the legacy Xbox Live client id.
const AUTHORIZE_URL: &str = "https://login.live.com/oauth20_authorize.srf\
?client_id=000000004C12AE6F\
&redirect_uri=https://login.live.com/oauth20_desktop.srf\
&scope=service::user.auth.xboxlive.com::MBI_SSL\
&display=touch&response_type=token&locale=en";

/// User token endpoint (XASU).
const USER_AUTHENTICATE_URL: &str = "https://user.auth.xboxlive.com/user/authenticate";

/// XSTS authorization endpoint.
const XSTS_AUTHORIZE_URL: &str = "https://xsts.auth.xboxlive.com/xsts/authorize";

/// Login timeout; the credential POST can redirect several times.
const LOGIN_TIMEOUT_SECS: u64 = 60;

static PPFT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"sFTTag:'.*value="([^"]+)""#).expect("hardcoded regex must compile")
});

static URL_POST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"urlPost:'([^']+)'").expect("hardcoded regex must compile")
});

// ============================================================================
// Wire Structures
// ============================================================================

/// Request body for the user-token exchange.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct UserTokenRequest<'a> {
    relying_party: &'a str,
    token_type: &'a str,
    properties: UserTokenProperties<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct UserTokenProperties<'a> {
    auth_method: &'a str,
    site_name: &'a str,
    rps_ticket: &'a str,
}

/// Request body for the XSTS authorization.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct XstsRequest<'a> {
    relying_party: &'a str,
    token_type: &'a str,
    properties: XstsProperties<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct XstsProperties<'a> {
    user_tokens: [&'a str; 1],
    sandbox_id: &'a str,
}

/// Token response shared by the XASU and XSTS endpoints.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(rename = "Token")]
    token: String,
    #[serde(rename = "DisplayClaims")]
    display_claims: DisplayClaims,
}

#[derive(Debug, Deserialize)]
struct DisplayClaims {
    xui: Vec<XuiClaim>,
}

/// Per-user claims; `xid` and `gtg` only appear on the XSTS response.
#[derive(Debug, Deserialize)]
struct XuiClaim {
    uhs: String,
    #[serde(default)]
    xid: Option<String>,
    #[serde(default)]
    gtg: Option<String>,
}

// ============================================================================
// Login Identity
// ============================================================================

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginIdentity {
    /// Credential for the reservation endpoints.
    pub credential: SessionCredential,
    /// The account's current gamertag.
    pub gamertag: String,
}

// ============================================================================
// Auth Client
// ============================================================================

/// Client for the Microsoft account login chain.
///
/// Holds its own cookie-enabled HTTP client: the login POST only works with
/// the cookies set by the authorize page.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: Client,
}

impl AuthClient {
    /// Creates a new auth client.
    pub fn new() -> Result<Self, XblError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(LOGIN_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()?;

        Ok(Self { http })
    }

    /// Runs the full login chain for a Microsoft account.
    ///
    /// Any failure here is fatal for the run; the monitor loop is never
    /// entered without a credential.
    #[instrument(skip(self, password))]
    pub async fn login(&self, user: &str, password: &str) -> Result<LoginIdentity, XblError> {
        let rps_ticket = self.request_rps_ticket(user, password).await?;
        let user_token = self.request_user_token(&rps_ticket).await?;
        let xsts = self.request_xsts_token(&user_token).await?;

        let claim = xsts
            .display_claims
            .xui
            .into_iter()
            .next()
            .ok_or_else(|| XblError::MissingClaim("xui".to_string()))?;
        let xuid = claim
            .xid
            .ok_or_else(|| XblError::MissingClaim("xid".to_string()))?;

        debug!(xuid = %xuid, "Login chain complete");

        Ok(LoginIdentity {
            credential: SessionCredential::new(
                format!("XBL3.0 x={};{}", claim.uhs, xsts.token),
                xuid,
            ),
            gamertag: claim.gtg.unwrap_or_default(),
        })
    }

    /// Scrapes the authorize page and exchanges the credentials for an RPS
    /// ticket (the `access_token` in the redirect fragment).
    async fn request_rps_ticket(&self, user: &str, password: &str) -> Result<String, XblError> {
        let page = self
            .http
            .get(AUTHORIZE_URL)
            .send()
            .await?
            .text()
            .await?;

        let ppft = extract_ppft(&page)
            .ok_or_else(|| XblError::LoginPageChanged("PPFT field not found".to_string()))?;
        let url_post = extract_url_post(&page)
            .ok_or_else(|| XblError::LoginPageChanged("urlPost not found".to_string()))?;

        debug!("Posting credentials to login form");

        let response = self
            .http
            .post(&url_post)
            .form(&[
                ("login", user),
                ("loginfmt", user),
                ("passwd", password),
                ("PPFT", &ppft),
            ])
            .send()
            .await?;

        // A successful login redirects to oauth20_desktop.srf with the token
        // in the URL fragment. Staying on the login page (or being bounced to
        // a 2FA interstitial) means there is no token to extract.
        extract_fragment_token(response.url()).ok_or_else(|| {
            XblError::AuthenticationFailed(
                "no access token in redirect; check credentials (2FA and passwordless \
                 accounts are not supported)"
                    .to_string(),
            )
        })
    }

    /// Exchanges the RPS ticket for a user token.
    async fn request_user_token(&self, rps_ticket: &str) -> Result<String, XblError> {
        let body = UserTokenRequest {
            relying_party: "http://auth.xboxlive.com",
            token_type: "JWT",
            properties: UserTokenProperties {
                auth_method: "RPS",
                site_name: "user.auth.xboxlive.com",
                rps_ticket,
            },
        };

        let response: TokenResponse = self
            .http
            .post(USER_AUTHENTICATE_URL)
            .json(&body)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| XblError::AuthenticationFailed(e.to_string()))?
            .json()
            .await?;

        Ok(response.token)
    }

    /// Authorizes the user token against XSTS for the xboxlive.com relying
    /// party. The response carries the XUID and gamertag claims.
    async fn request_xsts_token(&self, user_token: &str) -> Result<TokenResponse, XblError> {
        let body = XstsRequest {
            relying_party: "http://xboxlive.com",
            token_type: "JWT",
            properties: XstsProperties {
                user_tokens: [user_token],
                sandbox_id: "RETAIL",
            },
        };

        let response: TokenResponse = self
            .http
            .post(XSTS_AUTHORIZE_URL)
            .json(&body)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| XblError::AuthenticationFailed(e.to_string()))?
            .json()
            .await?;

        Ok(response)
    }
}

// ============================================================================
// Page Scraping
// ============================================================================

/// Extracts the PPFT hidden-field value from the authorize page.
fn extract_ppft(page: &str) -> Option<String> {
    PPFT_RE
        .captures(page)
        .map(|captures| captures[1].to_string())
}

/// Extracts the credential POST target from the authorize page.
fn extract_url_post(page: &str) -> Option<String> {
    URL_POST_RE
        .captures(page)
        .map(|captures| captures[1].to_string())
}

/// Extracts `access_token` from a redirect URL fragment.
fn extract_fragment_token(url: &Url) -> Option<String> {
    let fragment = url.fragment()?;
    url::form_urlencoded::parse(fragment.as_bytes())
        .find(|(key, _)| key == "access_token")
        .map(|(_, value)| value.into_owned())
}

// ============================================================================
// Tests
// ============================================================================
