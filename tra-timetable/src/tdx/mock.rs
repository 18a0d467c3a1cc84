//! Mock TDX server for testing without API access.
//!
//! Serves canned JSON for each endpoint from an in-process axum server on
//! an ephemeral port, so the real [`TdxClient`](super::TdxClient) can be
//! pointed at it. Counts requests per endpoint and can be told to fail.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Form, Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::task::JoinHandle;

/// The endpoints the mock serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Token,
    LiveBoard,
    Stations,
    Timetable,
    Alerts,
}

/// What an endpoint should answer with.
#[derive(Debug, Clone)]
enum Canned {
    Body(Value),
    Status(u16),
}

#[derive(Debug, Default)]
struct MockState {
    canned: HashMap<Endpoint, Canned>,
    hits: HashMap<Endpoint, usize>,
    last_uri: HashMap<Endpoint, String>,
    expires_in: Option<u64>,
    token_delay: Option<Duration>,
}

type Shared = Arc<Mutex<MockState>>;

/// A running mock TDX server. The server stops when this is dropped.
pub struct MockTdx {
    addr: SocketAddr,
    state: Shared,
    task: JoinHandle<()>,
}

impl MockTdx {
    pub const CLIENT_ID: &'static str = "mock-client";
    pub const CLIENT_SECRET: &'static str = "mock-secret";
    pub const ACCESS_TOKEN: &'static str = "mock-access-token";

    /// Start a mock server with empty data on every endpoint.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState {
            expires_in: Some(86_400),
            ..MockState::default()
        }));

        let app = Router::new()
            .route(
                "/auth/realms/TDXConnect/protocol/openid-connect/token",
                post(token),
            )
            .route(
                "/api/basic/v2/Rail/TRA/LiveBoard/Station/:station_id",
                get(live_board),
            )
            .route("/api/basic/v2/Rail/TRA/Station", get(stations))
            .route(
                "/api/basic/v2/Rail/TRA/DailyTimetable/OD/:origin/to/:dest/:date",
                get(timetable),
            )
            .route("/api/basic/v2/Rail/TRA/Alert", get(alerts))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock TDX listener");
        let addr = listener.local_addr().expect("mock TDX local address");

        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state, task }
    }

    /// Base URL to hand to [`TdxConfig::with_base_url`](super::TdxConfig::with_base_url).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answer `endpoint` with `body` and status 200.
    pub fn respond(&self, endpoint: Endpoint, body: Value) {
        self.lock().canned.insert(endpoint, Canned::Body(body));
    }

    /// Answer `endpoint` with an empty body and `status`.
    pub fn fail(&self, endpoint: Endpoint, status: u16) {
        self.lock().canned.insert(endpoint, Canned::Status(status));
    }

    /// Set the `expires_in` the token endpoint reports.
    pub fn set_token_lifetime(&self, expires_in: Option<u64>) {
        self.lock().expires_in = expires_in;
    }

    /// Hold every token response for `delay` before answering.
    pub fn set_token_delay(&self, delay: Duration) {
        self.lock().token_delay = Some(delay);
    }

    /// Number of requests `endpoint` has received, including rejected ones.
    pub fn hits(&self, endpoint: Endpoint) -> usize {
        self.lock().hits.get(&endpoint).copied().unwrap_or(0)
    }

    /// Path and query of the most recent request to `endpoint`.
    pub fn last_uri(&self, endpoint: Endpoint) -> Option<String> {
        self.lock().last_uri.get(&endpoint).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for MockTdx {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn record(state: &Shared, endpoint: Endpoint, uri: &Uri) -> MockState {
    let mut guard = state.lock().unwrap_or_else(|e| e.into_inner());
    *guard.hits.entry(endpoint).or_default() += 1;
    guard.last_uri.insert(endpoint, uri.to_string());
    MockState {
        canned: guard.canned.clone(),
        expires_in: guard.expires_in,
        token_delay: guard.token_delay,
        ..MockState::default()
    }
}

async fn token(
    State(state): State<Shared>,
    uri: Uri,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let snapshot = record(&state, Endpoint::Token, &uri);
    if let Some(delay) = snapshot.token_delay {
        tokio::time::sleep(delay).await;
    }

    if let Some(Canned::Status(status)) = snapshot.canned.get(&Endpoint::Token) {
        return status_only(*status);
    }

    let field = |k: &str| form.get(k).map(String::as_str);
    let valid = field("grant_type") == Some("client_credentials")
        && field("client_id") == Some(MockTdx::CLIENT_ID)
        && field("client_secret") == Some(MockTdx::CLIENT_SECRET);

    if !valid {
        return status_only(401);
    }

    let mut body = json!({
        "access_token": MockTdx::ACCESS_TOKEN,
        "token_type": "Bearer",
    });
    if let Some(expires_in) = snapshot.expires_in {
        body["expires_in"] = json!(expires_in);
    }
    Json(body).into_response()
}

async fn live_board(State(state): State<Shared>, headers: HeaderMap, uri: Uri) -> Response {
    serve(&state, Endpoint::LiveBoard, &headers, &uri)
}

async fn stations(State(state): State<Shared>, headers: HeaderMap, uri: Uri) -> Response {
    serve(&state, Endpoint::Stations, &headers, &uri)
}

async fn timetable(State(state): State<Shared>, headers: HeaderMap, uri: Uri) -> Response {
    serve(&state, Endpoint::Timetable, &headers, &uri)
}

async fn alerts(State(state): State<Shared>, headers: HeaderMap, uri: Uri) -> Response {
    serve(&state, Endpoint::Alerts, &headers, &uri)
}

fn serve(state: &Shared, endpoint: Endpoint, headers: &HeaderMap, uri: &Uri) -> Response {
    let snapshot = record(state, endpoint, uri);

    let expected = format!("Bearer {}", MockTdx::ACCESS_TOKEN);
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    if !authorized {
        return status_only(401);
    }

    match snapshot.canned.get(&endpoint) {
        Some(Canned::Body(body)) => Json(body.clone()).into_response(),
        Some(Canned::Status(status)) => status_only(*status),
        None => Json(json!([])).into_response(),
    }
}

fn status_only(status: u16) -> Response {
    StatusCode::from_u16(status)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        .into_response()
}
