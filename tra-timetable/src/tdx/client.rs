//! TDX HTTP client.
//!
//! Thin async wrapper over the five TDX endpoints the app uses: the OAuth2
//! token endpoint and four `Rail/TRA` reads. Token handling and caching live
//! in [`crate::repository`]; this client only speaks HTTP.

use chrono::NaiveDate;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;

use crate::domain::{Alert, StationId};
use crate::repository::BearerToken;

use super::error::TdxError;
use super::types::{AlertsPayload, LiveBoardEntry, OdTrain, StationRecord, TokenResponse};

/// Default base URL for the TDX platform.
pub const DEFAULT_BASE_URL: &str = "https://tdx.transportdata.tw";

const TOKEN_PATH: &str = "auth/realms/TDXConnect/protocol/openid-connect/token";
const TRA_PATH: &str = "api/basic/v2/Rail/TRA";

/// How much of an unparseable body to keep in errors.
const BODY_SNIPPET_CHARS: usize = 500;

/// Configuration for the TDX client.
#[derive(Debug, Clone)]
pub struct TdxConfig {
    /// Base URL for the API (defaults to production TDX)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TdxConfig {
    /// Create a config pointing at production TDX.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing). A trailing `/` is ignored.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TdxConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// TDX API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct TdxClient {
    http: reqwest::Client,
    base_url: String,
}

impl TdxClient {
    /// Create a new TDX client with the given configuration.
    pub fn new(config: TdxConfig) -> Result<Self, TdxError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange client credentials for an access token.
    pub async fn request_token(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<TokenResponse, TdxError> {
        let url = format!("{}/{}", self.base_url, TOKEN_PATH);

        let response = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", client_id),
                ("client_secret", client_secret),
            ])
            .send()
            .await?;

        read_json(response).await
    }

    /// Live board for one station.
    pub async fn live_board(
        &self,
        token: &BearerToken,
        station: &StationId,
    ) -> Result<Vec<LiveBoardEntry>, TdxError> {
        let path = format!("LiveBoard/Station/{}", station.as_str());
        self.get_tra(token, &path).await
    }

    /// Every TRA station.
    pub async fn stations(&self, token: &BearerToken) -> Result<Vec<StationRecord>, TdxError> {
        self.get_tra(token, "Station").await
    }

    /// Origin-destination timetable for a single day.
    pub async fn od_timetable(
        &self,
        token: &BearerToken,
        origin: &StationId,
        dest: &StationId,
        date: NaiveDate,
    ) -> Result<Vec<OdTrain>, TdxError> {
        let path = format!(
            "DailyTimetable/OD/{}/to/{}/{}",
            origin.as_str(),
            dest.as_str(),
            date.format("%Y-%m-%d")
        );
        self.get_tra(token, &path).await
    }

    /// Current TRA service alerts.
    pub async fn alerts(&self, token: &BearerToken) -> Result<Vec<Alert>, TdxError> {
        let payload: AlertsPayload = self.get_tra(token, "Alert").await?;
        Ok(payload.into_alerts())
    }

    /// Authorized GET against a `Rail/TRA` path, decoded as JSON.
    async fn get_tra<T: DeserializeOwned>(
        &self,
        token: &BearerToken,
        path: &str,
    ) -> Result<T, TdxError> {
        let url = format!("{}/{}/{}", self.base_url, TRA_PATH, path);

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, token.as_str())
            .query(&[("$format", "JSON")])
            .send()
            .await?;

        read_json(response).await
    }
}

/// Check the status and decode the body.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TdxError> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(TdxError::Unauthorized);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(TdxError::RateLimited);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TdxError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|e| TdxError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(BODY_SNIPPET_CHARS).collect()),
    })
}
