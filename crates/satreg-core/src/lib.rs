//! # satreg-core
//!
//! Builds host registration commands from a Satellite/Foreman-style server.
//!
//! The crate lists activation keys and capsules (smart proxies) for a set of
//! Basic-auth credentials and requests a registration command for the selected
//! pair. It has no state of its own: every call takes the credentials it needs
//! and returns plain values.
//!
//! ```rust,no_run
//! use satreg_core::{ClientConfig, Credentials, Orchestrator, RegistrationSelection};
//!
//! # async fn example() -> satreg_core::Result<()> {
//! let orchestrator = Orchestrator::new(ClientConfig::default())?;
//! let creds = Credentials::new("https://satellite.example.com", "admin", "secret")?;
//!
//! let report = orchestrator
//!     .run(&creds, &RegistrationSelection::default())
//!     .await?;
//! println!("{} keys, {} capsules", report.activation_keys.len(), report.capsules.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;

pub use client::{Endpoints, SatelliteClient};
pub use config::{AppConfig, ClientConfig, DefaultsConfig, NetworkConfig};
pub use error::{Result, SatregError};
pub use models::{
    ActivationKey, Capsule, CapsuleListing, CapsuleLookup, Credentials, OrchestrationReport,
    RegistrationCommand, RegistrationOutcome, RegistrationSelection,
};
pub use orchestrator::Orchestrator;
