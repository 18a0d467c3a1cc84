//! TDX API response DTOs.
//!
//! These types map directly to the TDX `Rail/TRA` v2 JSON responses.
//! They use `Option` and `#[serde(default)]` liberally because TDX omits
//! fields on some records (notably stations without a city and OD rows
//! with a missing stop time).

use serde::Deserialize;

use crate::domain::Alert;

/// Response from the OAuth2 token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    /// Lifetime in seconds.
    pub expires_in: Option<u64>,

    pub token_type: Option<String>,
}

/// A bilingual name as TDX sends it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TdxName {
    #[serde(rename = "Zh_tw", default)]
    pub zh_tw: String,

    #[serde(rename = "En", default)]
    pub en: String,
}

/// One row from `LiveBoard/Station/{StationID}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LiveBoardEntry {
    pub train_no: String,

    #[serde(default)]
    pub train_type_name: TdxName,

    #[serde(default)]
    pub station_name: TdxName,

    /// `HH:MM:SS`
    pub scheduled_departure_time: Option<String>,

    /// `HH:MM:SS`
    pub scheduled_arrival_time: Option<String>,

    /// Minutes late.
    #[serde(default)]
    pub delay_time: i32,

    #[serde(default)]
    pub ending_station_name: TdxName,
}

/// One station from `Station`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StationRecord {
    #[serde(rename = "StationID")]
    pub station_id: String,

    #[serde(default)]
    pub station_name: TdxName,

    pub station_address: Option<String>,

    /// City or county name, e.g. `臺北市`. Absent for some non-passenger
    /// stations.
    pub location_city: Option<String>,
}

/// One row from `DailyTimetable/OD/{O}/to/{D}/{Date}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OdTrain {
    pub daily_train_info: Option<OdTrainInfo>,
    pub origin_stop_time: Option<StopTime>,
    pub destination_stop_time: Option<StopTime>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OdTrainInfo {
    pub train_no: Option<String>,
    pub train_type_name: Option<TdxName>,
    pub ending_station_name: Option<TdxName>,

    /// 0 = southbound/clockwise, 1 = northbound/anticlockwise.
    pub direction: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StopTime {
    pub arrival_time: Option<String>,
    pub departure_time: Option<String>,
    pub station_name: Option<TdxName>,
}

/// Alert list response.
///
/// The v2 endpoint returns a bare array; newer deployments wrap it in an
/// object with an `Alerts` field. Accept both. An object without
/// `Alerts` is not an alert list and fails to decode.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AlertsPayload {
    List(Vec<Alert>),
    Wrapped {
        #[serde(rename = "Alerts")]
        alerts: Vec<Alert>,
    },
}

impl AlertsPayload {
    pub fn into_alerts(self) -> Vec<Alert> {
        match self {
            AlertsPayload::List(alerts) => alerts,
            AlertsPayload::Wrapped { alerts } => alerts,
        }
    }
}
