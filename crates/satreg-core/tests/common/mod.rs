//! In-process stand-in for a Satellite server.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Canned responses served by the fake.
#[derive(Clone)]
pub struct FakeSatellite {
    pub keys: (u16, String),
    pub proxies: (u16, String),
    /// Detail responses keyed by capsule id; missing ids answer 404.
    pub details: HashMap<i64, (u16, String)>,
    pub registration: (u16, String),
}

impl Default for FakeSatellite {
    fn default() -> Self {
        Self {
            keys: (200, json!({"results": []}).to_string()),
            proxies: (200, json!({"results": []}).to_string()),
            details: HashMap::new(),
            registration: (
                200,
                json!({"registration_command": "subscription-manager register"}).to_string(),
            ),
        }
    }
}

impl FakeSatellite {
    pub fn with_keys(mut self, keys: Value) -> Self {
        self.keys = (200, keys.to_string());
        self
    }

    pub fn with_proxies(mut self, proxies: Value) -> Self {
        self.proxies = (200, proxies.to_string());
        self
    }

    pub fn with_detail(mut self, id: i64, status: u16, body: impl Into<String>) -> Self {
        self.details.insert(id, (status, body.into()));
        self
    }

    pub fn with_location(self, id: i64, location: &str) -> Self {
        self.with_detail(id, 200, json!({"id": id, "locations": [{"name": location}]}).to_string())
    }

    pub fn with_registration(mut self, status: u16, body: impl Into<String>) -> Self {
        self.registration = (status, body.into());
        self
    }
}

/// What the fake saw.
#[derive(Default)]
pub struct Recorded {
    pub authorizations: Mutex<Vec<String>>,
    pub paths: Mutex<Vec<String>>,
    pub registrations: Mutex<Vec<Value>>,
}

impl Recorded {
    pub fn registration_count(&self) -> usize {
        self.registrations.lock().unwrap().len()
    }
}

struct FakeState {
    fake: FakeSatellite,
    recorded: Arc<Recorded>,
}

fn reply((status, body): &(u16, String)) -> (StatusCode, String) {
    (StatusCode::from_u16(*status).unwrap(), body.clone())
}

fn record(state: &FakeState, headers: &HeaderMap, path: String) {
    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        state.recorded.authorizations.lock().unwrap().push(auth.to_string());
    }
    state.recorded.paths.lock().unwrap().push(path);
}

async fn keys(
    State(state): State<Arc<FakeState>>,
    Path(org): Path<u64>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    record(&state, &headers, format!("/katello/api/organizations/{}/activation_keys", org));
    reply(&state.fake.keys)
}

async fn proxies(State(state): State<Arc<FakeState>>, headers: HeaderMap) -> (StatusCode, String) {
    record(&state, &headers, "/api/v2/smart_proxies".into());
    reply(&state.fake.proxies)
}

async fn proxy_detail(
    State(state): State<Arc<FakeState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    record(&state, &headers, format!("/api/v2/smart_proxies/{}", id));
    match state.fake.details.get(&id) {
        Some(detail) => reply(detail),
        None => (StatusCode::NOT_FOUND, json!({"error": "not found"}).to_string()),
    }
}

async fn registration(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    record(&state, &headers, "/api/v2/registration_commands".into());
    state.recorded.registrations.lock().unwrap().push(body);
    reply(&state.fake.registration)
}

/// Serve `fake` on an ephemeral port and return its base URL.
pub async fn spawn(fake: FakeSatellite) -> (String, Arc<Recorded>) {
    let recorded = Arc::new(Recorded::default());
    let state = Arc::new(FakeState {
        fake,
        recorded: recorded.clone(),
    });

    let app = Router::new()
        .route("/katello/api/organizations/:org/activation_keys", get(keys))
        .route("/api/v2/smart_proxies", get(proxies))
        .route("/api/v2/smart_proxies/:id", get(proxy_detail))
        .route("/api/v2/registration_commands", post(registration))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), recorded)
}
