//! HTTP request handlers.

use crate::render::{self, HiddenCredentials};
use crate::server::AppState;
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Form, Json,
};
use satreg_core::{Credentials, RegistrationOutcome, RegistrationSelection};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Fields posted by both the login form and the selection form.
#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    pub api_url: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub activation_key: Option<String>,
    #[serde(default)]
    pub capsule: Option<String>,
}

/// Health check endpoint.
pub async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// Login page.
pub async fn handle_login_form() -> Html<String> {
    Html(render::login_page())
}

/// Login or selection submission.
///
/// Lists keys and capsules on every submission and, when a key and capsule
/// were chosen, requests a registration command resolved against this
/// request's own listing.
pub async fn handle_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SubmitForm>,
) -> Html<String> {
    let hidden = HiddenCredentials {
        api_url: &form.api_url,
        username: &form.username,
        password: &form.password,
    };

    let creds = match Credentials::new(
        &form.api_url,
        form.username.as_str(),
        form.password.as_str(),
    ) {
        Ok(creds) => creds,
        Err(e) => {
            debug!("Rejected form submission: {}", e);
            return Html(render::error_page(&e));
        }
    };

    let selection = RegistrationSelection {
        activation_key: form.activation_key.clone(),
        capsule: form.capsule.clone(),
    };
    debug!("Orchestrating for {} at {}", creds.username(), creds.base_url());

    match state.orchestrator.run(&creds, &selection).await {
        Ok(report) => {
            if report.registration.is_skipped() {
                debug!("No registration requested for {}", creds.username());
            } else if let RegistrationOutcome::Rejected { status, .. } = &report.registration {
                info!("Registration command refused by {} (HTTP {})", creds.base_url(), status);
            }
            Html(render::selection_page(
                &hidden,
                &report.activation_keys,
                &report.capsules,
                &report.registration,
            ))
        }
        Err(e) => {
            error!("Orchestration against {} failed ({}): {}", creds.base_url(), e.kind(), e);
            Html(render::error_page(&e))
        }
    }
}
