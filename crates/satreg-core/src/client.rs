//! HTTP client for the Satellite API.
//!
//! Wraps reqwest with:
//! - HTTP Basic auth on every request
//! - A configurable total timeout
//! - Opt-in acceptance of invalid TLS certificates
//! - Endpoint URL construction

use crate::config::{AppConfig, ClientConfig};
use crate::error::{Result, SatregError};
use crate::models::Credentials;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Endpoint URLs relative to a server base URL.
pub struct Endpoints;

impl Endpoints {
    pub fn activation_keys(creds: &Credentials, organization_id: u64) -> String {
        format!(
            "{}/katello/api/organizations/{}/activation_keys",
            creds.base_url(),
            organization_id
        )
    }

    pub fn smart_proxies(creds: &Credentials) -> String {
        format!("{}/api/v2/smart_proxies", creds.base_url())
    }

    pub fn smart_proxy(creds: &Credentials, id: i64) -> String {
        format!("{}/api/v2/smart_proxies/{}", creds.base_url(), id)
    }

    pub fn registration_commands(creds: &Credentials) -> String {
        format!("{}/api/v2/registration_commands", creds.base_url())
    }
}

/// HTTP client for a Satellite server.
#[derive(Clone)]
pub struct SatelliteClient {
    client: Client,
}

impl SatelliteClient {
    /// Create a new client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        if config.accept_invalid_certs {
            warn!("TLS certificate verification toward the Satellite API is disabled");
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(AppConfig::USER_AGENT)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| SatregError::Config {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }

    /// Make an authenticated GET request without inspecting the status.
    pub async fn get(&self, creds: &Credentials, url: &str) -> Result<Response> {
        debug!("GET {} as {}", url, creds.username());
        self.client
            .get(url)
            .basic_auth(creds.username(), Some(creds.password()))
            .send()
            .await
            .map_err(|e| SatregError::transport(url, e))
    }

    /// Make an authenticated GET request and decode a successful JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, creds: &Credentials, url: &str) -> Result<T> {
        let response = self.get(creds, url).await?;
        let response = check_response_status(response, url).await?;
        decode_json(response, url).await
    }

    /// Make an authenticated POST request with a JSON body.
    pub async fn post_json<B: Serialize>(
        &self,
        creds: &Credentials,
        url: &str,
        body: &B,
    ) -> Result<Response> {
        debug!("POST {} as {}", url, creds.username());
        self.client
            .post(url)
            .basic_auth(creds.username(), Some(creds.password()))
            .json(body)
            .send()
            .await
            .map_err(|e| SatregError::transport(url, e))
    }
}

/// Turn a non-success status into [`SatregError::Status`].
async fn check_response_status(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(SatregError::Status {
        url: url.to_string(),
        status: status.as_u16(),
        body,
    })
}

/// Read the body as text and parse it, keeping transport and decode failures apart.
pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response, url: &str) -> Result<T> {
    let text = response
        .text()
        .await
        .map_err(|e| SatregError::transport(url, e))?;
    serde_json::from_str(&text).map_err(|e| SatregError::decode(url, e.to_string()))
}
