//! Data model for activation keys, capsules, and registration results.
//!
//! Public types are what the front-end renders. The `*Response` types mirror
//! the upstream JSON bodies and are only used while decoding.

use crate::config::DefaultsConfig;
use crate::error::{Result, SatregError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

/// Basic-auth credentials and the server they belong to.
///
/// Supplied with every form submission and never stored.
#[derive(Clone)]
pub struct Credentials {
    base_url: String,
    username: String,
    password: String,
}

impl Credentials {
    /// Validate the server URL and build credentials.
    ///
    /// Trailing slashes are stripped so endpoint paths can be appended directly.
    pub fn new(
        base_url: impl AsRef<str>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let base_url = base_url.as_ref().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(SatregError::Validation {
                field: "api_url".into(),
                message: "must not be empty".into(),
            });
        }

        let parsed = url::Url::parse(&base_url).map_err(|e| SatregError::Validation {
            field: "api_url".into(),
            message: format!("{} is not a valid URL ({})", base_url, e),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SatregError::Validation {
                field: "api_url".into(),
                message: format!("unsupported scheme '{}', use http or https", parsed.scheme()),
            });
        }

        Ok(Self {
            base_url,
            username: username.into(),
            password: password.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An activation key as offered in the selection form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivationKey {
    pub name: String,
}

/// A capsule (smart proxy) with its first associated location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Capsule {
    pub id: i64,
    pub name: String,
    pub location_name: String,
}

impl Capsule {
    /// The string shown to users and used as the lookup key.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.location_name)
    }
}

/// Maps capsule display strings back to capsule ids.
///
/// Built fresh for each listing and handed to the caller; nothing is shared
/// between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapsuleLookup {
    entries: HashMap<String, i64>,
}

impl CapsuleLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a lookup from capsules in listing order. Later duplicates win.
    pub fn from_capsules<'a>(capsules: impl IntoIterator<Item = &'a Capsule>) -> Self {
        let mut lookup = Self::new();
        for capsule in capsules {
            lookup.insert(capsule.display_name(), capsule.id);
        }
        lookup
    }

    /// Insert a mapping, returning the id it replaced, if any.
    pub fn insert(&mut self, display_name: String, id: i64) -> Option<i64> {
        let previous = self.entries.insert(display_name.clone(), id);
        if let Some(previous_id) = previous {
            if previous_id != id {
                warn!(
                    "Duplicate capsule display name '{}': id {} replaces id {}",
                    display_name, id, previous_id
                );
            }
        }
        previous
    }

    pub fn get(&self, display_name: &str) -> Option<i64> {
        self.entries.get(display_name).copied()
    }

    pub fn contains(&self, display_name: &str) -> bool {
        self.entries.contains_key(display_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Capsules in listing order plus the lookup derived from them.
#[derive(Debug, Clone, Default)]
pub struct CapsuleListing {
    pub capsules: Vec<Capsule>,
    pub lookup: CapsuleLookup,
}

/// Shell command returned by the registration endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationCommand {
    pub command_text: String,
}

/// Result of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// Key or capsule missing or unmatched; no request was sent.
    Skipped,
    /// The upstream generated a command.
    Command(RegistrationCommand),
    /// The upstream refused; `body` is the raw response text.
    Rejected { status: u16, body: String },
}

impl RegistrationOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, RegistrationOutcome::Skipped)
    }
}

/// What the user picked on the selection form.
#[derive(Debug, Clone, Default)]
pub struct RegistrationSelection {
    pub activation_key: Option<String>,
    pub capsule: Option<String>,
}

/// Everything a single orchestration run produced.
#[derive(Debug, Clone)]
pub struct OrchestrationReport {
    pub activation_keys: Vec<ActivationKey>,
    pub capsules: Vec<Capsule>,
    pub registration: RegistrationOutcome,
}

// ============================================================================
// Upstream wire types
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct ActivationKeysResponse {
    #[serde(default)]
    pub results: Vec<ActivationKeyEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActivationKeyEntry {
    #[serde(default)]
    pub name: Option<String>,
}

impl From<ActivationKeyEntry> for ActivationKey {
    fn from(entry: ActivationKeyEntry) -> Self {
        Self {
            name: entry
                .name
                .unwrap_or_else(|| DefaultsConfig::UNNAMED_KEY.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SmartProxiesResponse {
    #[serde(default)]
    pub results: Vec<SmartProxyEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SmartProxyEntry {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SmartProxyDetail {
    #[serde(default)]
    pub locations: Vec<LocationEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LocationEntry {
    #[serde(default)]
    pub name: Option<String>,
}

impl SmartProxyDetail {
    /// Name of the first location, if there is one.
    pub fn first_location_name(self) -> Option<String> {
        self.locations.into_iter().next().and_then(|l| l.name)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RegistrationRequest<'a> {
    pub registration_command: RegistrationParams<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegistrationParams<'a> {
    pub smart_proxy_id: i64,
    pub setup_insights: bool,
    pub insecure: bool,
    pub activation_key: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegistrationResponse {
    #[serde(default)]
    pub registration_command: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn capsule(id: i64, name: &str, location: &str) -> Capsule {
        Capsule {
            id,
            name: name.into(),
            location_name: location.into(),
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(capsule(3, "caps1", "Berlin").display_name(), "caps1 (Berlin)");
    }

    #[test]
    fn test_lookup_last_duplicate_wins() {
        let capsules = vec![
            capsule(1, "caps", "Berlin"),
            capsule(2, "other", "Paris"),
            capsule(7, "caps", "Berlin"),
        ];
        let lookup = CapsuleLookup::from_capsules(&capsules);
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get("caps (Berlin)"), Some(7));
        assert_eq!(lookup.get("other (Paris)"), Some(2));
        assert!(!lookup.contains("caps (Paris)"));
    }

    #[test]
    fn test_only_skipped_outcome_is_skipped() {
        assert!(RegistrationOutcome::Skipped.is_skipped());
        assert!(!RegistrationOutcome::Command(RegistrationCommand {
            command_text: "subscription-manager register".into(),
        })
        .is_skipped());
        assert!(!RegistrationOutcome::Rejected {
            status: 422,
            body: String::new(),
        }
        .is_skipped());
    }

    #[test]
    fn test_credentials_trim_trailing_slash() {
        let creds = Credentials::new("https://satellite.example.com//", "admin", "pw").unwrap();
        assert_eq!(creds.base_url(), "https://satellite.example.com");
    }

    #[test]
    fn test_credentials_reject_bad_urls() {
        assert!(matches!(
            Credentials::new("  ", "admin", "pw"),
            Err(SatregError::Validation { .. })
        ));
        assert!(Credentials::new("satellite.example.com", "admin", "pw").is_err());
        assert!(Credentials::new("ftp://satellite.example.com", "admin", "pw").is_err());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("https://sat", "admin", "hunter2").unwrap();
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("admin"));
    }

    #[test]
    fn test_missing_key_name_defaults() {
        let response: ActivationKeysResponse =
            serde_json::from_value(json!({"results": [{"name": "ak-rhel9"}, {"id": 4}]})).unwrap();
        let keys: Vec<ActivationKey> = response.results.into_iter().map(Into::into).collect();
        assert_eq!(keys[0].name, "ak-rhel9");
        assert_eq!(keys[1].name, "Unnamed");
    }

    #[test]
    fn test_first_location_name() {
        let detail: SmartProxyDetail = serde_json::from_value(json!({
            "locations": [{"name": "Berlin"}, {"name": "Paris"}]
        }))
        .unwrap();
        assert_eq!(detail.first_location_name().as_deref(), Some("Berlin"));

        let empty: SmartProxyDetail = serde_json::from_value(json!({"id": 1})).unwrap();
        assert_eq!(empty.first_location_name(), None);
    }

    #[test]
    fn test_registration_request_shape() {
        let body = RegistrationRequest {
            registration_command: RegistrationParams {
                smart_proxy_id: 5,
                setup_insights: false,
                insecure: true,
                activation_key: "ak-rhel9",
            },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"registration_command": {
                "smart_proxy_id": 5,
                "setup_insights": false,
                "insecure": true,
                "activation_key": "ak-rhel9"
            }})
        );
    }
}
