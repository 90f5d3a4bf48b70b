//! Registration orchestration.
//!
//! The flow for one form submission:
//! 1. List activation keys
//! 2. List capsules, then look up each capsule's location
//! 3. If a key and a known capsule were selected, request a registration command
//!
//! The capsule lookup produced in step 2 is returned to the caller and used
//! for step 3 of the same run only.

use crate::client::{decode_json, Endpoints, SatelliteClient};
use crate::config::{ClientConfig, DefaultsConfig};
use crate::error::{Result, SatregError};
use crate::models::{
    ActivationKey, ActivationKeysResponse, Capsule, CapsuleListing, CapsuleLookup,
    Credentials, OrchestrationReport, RegistrationCommand, RegistrationOutcome,
    RegistrationParams, RegistrationRequest, RegistrationResponse, RegistrationSelection,
    SmartProxiesResponse, SmartProxyDetail, SmartProxyEntry,
};
use futures::stream::{self, StreamExt};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

/// Runs the list/lookup/register sequence against a Satellite server.
#[derive(Clone)]
pub struct Orchestrator {
    client: SatelliteClient,
    config: ClientConfig,
}

impl Orchestrator {
    /// Create an orchestrator with its own upstream client.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = SatelliteClient::new(&config)?;
        Ok(Self { client, config })
    }

    /// List activation keys in upstream order.
    pub async fn list_activation_keys(&self, creds: &Credentials) -> Result<Vec<ActivationKey>> {
        let url = Endpoints::activation_keys(creds, self.config.organization_id);
        let response: ActivationKeysResponse = self.client.get_json(creds, &url).await?;

        let keys: Vec<ActivationKey> = response.results.into_iter().map(Into::into).collect();
        debug!("Fetched {} activation keys", keys.len());
        Ok(keys)
    }

    /// List capsules with their first location and build a fresh lookup.
    ///
    /// Detail lookups run up to `detail_concurrency` at a time; results keep
    /// the listing order. A failed lookup yields the "Unknown" location
    /// instead of failing the listing.
    pub async fn list_capsules_with_locations(
        &self,
        creds: &Credentials,
    ) -> Result<CapsuleListing> {
        let url = Endpoints::smart_proxies(creds);
        let response: SmartProxiesResponse = self.client.get_json(creds, &url).await?;

        let capsules: Vec<Capsule> = stream::iter(response.results)
            .map(|entry| self.resolve_capsule(creds, entry))
            .buffered(self.config.detail_concurrency.max(1))
            .collect()
            .await;

        let lookup = CapsuleLookup::from_capsules(&capsules);
        debug!(
            "Fetched {} capsules ({} distinct display names)",
            capsules.len(),
            lookup.len()
        );
        Ok(CapsuleListing { capsules, lookup })
    }

    /// Request a registration command for the selected key and capsule.
    ///
    /// Returns [`RegistrationOutcome::Skipped`] without contacting the server
    /// when either selection is empty or the capsule is not in `lookup`.
    /// A non-200 answer is returned as [`RegistrationOutcome::Rejected`].
    pub async fn submit_registration(
        &self,
        creds: &Credentials,
        activation_key: &str,
        capsule_display: &str,
        lookup: &CapsuleLookup,
    ) -> Result<RegistrationOutcome> {
        if activation_key.is_empty() || capsule_display.is_empty() {
            return Ok(RegistrationOutcome::Skipped);
        }
        let Some(smart_proxy_id) = lookup.get(capsule_display) else {
            debug!("Capsule '{}' not in current listing, skipping registration", capsule_display);
            return Ok(RegistrationOutcome::Skipped);
        };

        let url = Endpoints::registration_commands(creds);
        let payload = RegistrationRequest {
            registration_command: RegistrationParams {
                smart_proxy_id,
                setup_insights: false,
                insecure: true,
                activation_key,
            },
        };

        let response = self.client.post_json(creds, &url, &payload).await?;
        let status = response.status();

        if status == StatusCode::OK {
            let body: RegistrationResponse = decode_json(response, &url).await?;
            let command_text = body
                .registration_command
                .unwrap_or_else(|| DefaultsConfig::NO_COMMAND.to_string());
            info!(
                "Generated registration command for key '{}' via capsule {}",
                activation_key, smart_proxy_id
            );
            return Ok(RegistrationOutcome::Command(RegistrationCommand { command_text }));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SatregError::transport(&url, e))?;
        warn!("Registration command request returned HTTP {}", status.as_u16());
        Ok(RegistrationOutcome::Rejected {
            status: status.as_u16(),
            body,
        })
    }

    /// Run the full sequence for one form submission.
    pub async fn run(
        &self,
        creds: &Credentials,
        selection: &RegistrationSelection,
    ) -> Result<OrchestrationReport> {
        let activation_keys = self.list_activation_keys(creds).await?;
        let listing = self.list_capsules_with_locations(creds).await?;

        let registration = self
            .submit_registration(
                creds,
                selection.activation_key.as_deref().unwrap_or_default(),
                selection.capsule.as_deref().unwrap_or_default(),
                &listing.lookup,
            )
            .await?;

        Ok(OrchestrationReport {
            activation_keys,
            capsules: listing.capsules,
            registration,
        })
    }

    async fn resolve_capsule(&self, creds: &Credentials, entry: SmartProxyEntry) -> Capsule {
        let location_name = self
            .fetch_location(creds, entry.id)
            .await
            .unwrap_or_else(|| DefaultsConfig::UNKNOWN_LOCATION.to_string());

        Capsule {
            id: entry.id,
            name: entry
                .name
                .unwrap_or_else(|| DefaultsConfig::UNNAMED_CAPSULE.to_string()),
            location_name,
        }
    }

    async fn fetch_location(&self, creds: &Credentials, id: i64) -> Option<String> {
        let url = Endpoints::smart_proxy(creds, id);

        let response = match self.client.get(creds, &url).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Capsule {} detail lookup failed: {}", id, e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(
                "Capsule {} detail lookup returned HTTP {}",
                id,
                response.status().as_u16()
            );
            return None;
        }

        match decode_json::<SmartProxyDetail>(response, &url).await {
            Ok(detail) => detail.first_location_name(),
            Err(e) => {
                warn!("Capsule {} detail lookup failed: {}", id, e);
                None
            }
        }
    }
}
