//! HTTP client shared by the reservation endpoints.

use reqwest::{header, Client, Response};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::error::XblError;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent the gamertag endpoints are known to accept.
pub(crate) const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Thin wrapper around [`reqwest::Client`] that attaches the authorization
/// and contract-version headers the Xbox Live endpoints expect.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    pub fn new() -> Result<Self, XblError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, XblError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { inner: client })
    }

    /// Performs an authorized POST with a JSON body.
    ///
    /// `contract_version` goes into the `x-xbl-contract-version` header; the
    /// reservation and claim endpoints use different values.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        authorization: &str,
        contract_version: &str,
        body: &T,
    ) -> Result<Response, reqwest::Error> {
        debug!(url = %url, contract = %contract_version, "Sending POST request");

        self.inner
            .post(url)
            .header(header::AUTHORIZATION, authorization)
            .header(header::ACCEPT, "application/json, text/plain, */*")
            .header("x-xbl-contract-version", contract_version)
            .json(body)
            .send()
            .await
    }
}
