//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Alert, TrainSchedule};

/// Query for `/api/alerts`.
#[derive(Debug, Default, Deserialize)]
pub struct AlertsRequest {
    /// Bypass the cache
    #[serde(default)]
    pub refresh: bool,
}

/// An alert as shown on the home screen.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertResult {
    pub alert_id: String,
    pub title: String,
    pub description: String,
    /// Omitted when blank
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effects: Option<String>,
    pub publish_time: String,
    pub start_time: String,
    pub end_time: String,
    /// `YYYY-MM-DD HH:MM`
    pub display_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_url: Option<String>,
}

/// A train on a board or in search results.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainResult {
    #[serde(flatten)]
    pub schedule: TrainSchedule,
    /// Cleaned-up train type, e.g. `自強3000`
    pub display_type: String,
}

/// Query for `/api/search`.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Origin station ID
    pub origin: String,

    /// Destination station ID
    pub dest: String,

    /// `YYYY-MM-DD` (defaults to today)
    pub date: Option<String>,

    /// `HH:MM` (defaults to now)
    pub time: Option<String>,

    /// Car-type keyword in either language (defaults to "All")
    pub car_type: Option<String>,
}

/// Search response.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub date: String,
    pub start_time: String,
    pub trains: Vec<TrainResult>,
}

/// Body for `PUT /api/credentials`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub client_id: String,
    pub client_secret: String,
}

/// Body for `PUT /api/profile`.
#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub username: String,
}

/// Current profile. Never includes the secret.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub client_id: String,
    pub credentials_configured: bool,
}

/// Result of adding a favorite.
#[derive(Debug, Serialize)]
pub struct FavoriteAdded {
    /// `false` if the route was already saved
    pub added: bool,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl From<&Alert> for AlertResult {
    fn from(alert: &Alert) -> Self {
        Self {
            alert_id: alert.alert_id.clone(),
            title: alert.title.clone(),
            description: alert.description.clone(),
            effects: alert.effects_text().map(str::to_string),
            publish_time: alert.publish_time.clone(),
            start_time: alert.start_time.clone(),
            end_time: alert.end_time.clone(),
            display_time: alert.display_time(),
            alert_url: alert.alert_url.clone(),
        }
    }
}

impl From<TrainSchedule> for TrainResult {
    fn from(schedule: TrainSchedule) -> Self {
        let display_type = schedule.display_type();
        Self {
            schedule,
            display_type,
        }
    }
}
