//! TDX (Transport Data eXchange) client.
//!
//! This module provides an HTTP client for the TDX `Rail/TRA` endpoints
//! and the conversions from TDX payloads to the app's view models.
//!
//! Key characteristics of TDX:
//! - Every data call needs a bearer token from an OAuth2 client-credentials
//!   grant against the TDX identity server
//! - Data calls take `$format=JSON`
//! - Names arrive bilingual (`Zh_tw`/`En`); the app shows the zh-TW form

mod client;
mod convert;
mod error;
#[cfg(test)]
pub mod mock;
mod types;

pub use client::{DEFAULT_BASE_URL, TdxClient, TdxConfig};
pub use convert::{convert_live_board, convert_od_train, group_stations_by_city};
pub use error::TdxError;
pub use types::{
    AlertsPayload, LiveBoardEntry, OdTrain, OdTrainInfo, StationRecord, StopTime, TdxName,
    TokenResponse,
};
