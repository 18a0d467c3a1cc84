//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, put},
};
use chrono::{Local, NaiveDate, NaiveTime};
use tracing::error;

use crate::domain::{DomainError, FavoriteRoute, StationId, StationsByCity};
use crate::repository::SearchQuery;
use crate::settings::{Credentials, SettingsError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/alerts", get(alerts))
        .route("/api/stations", get(stations))
        .route("/api/stations/:id/board", get(live_board))
        .route("/api/search", get(search))
        .route("/api/favorites", get(list_favorites).post(add_favorite))
        .route("/api/favorites/:origin/:dest", delete(remove_favorite))
        .route("/api/credentials", put(update_credentials))
        .route("/api/profile", get(profile).put(update_profile))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Service alerts, cached unless `refresh=true`.
async fn alerts(
    State(state): State<AppState>,
    Query(req): Query<AlertsRequest>,
) -> Json<Vec<AlertResult>> {
    let alerts = state.repo.fetch_alerts(req.refresh).await;
    Json(alerts.iter().map(AlertResult::from).collect())
}

/// All stations grouped by city.
async fn stations(State(state): State<AppState>) -> Json<StationsByCity> {
    let stations = state.repo.fetch_all_stations().await;
    Json(stations.as_ref().clone())
}

/// Live board for one station.
async fn live_board(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<TrainResult>>, AppError> {
    let station = StationId::parse(&id).map_err(DomainError::from)?;
    let trains = state.repo.fetch_trains(&station).await;
    Ok(Json(trains.into_iter().map(TrainResult::from).collect()))
}

/// Origin-destination search.
async fn search(
    State(state): State<AppState>,
    Query(req): Query<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let origin = StationId::parse(&req.origin).map_err(DomainError::from)?;
    let dest = StationId::parse(&req.dest).map_err(DomainError::from)?;

    let now = Local::now();
    let date = match req.date.as_deref() {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map_err(|_| DomainError::InvalidDate(d.to_string()))?,
        None => now.date_naive(),
    };
    let start_time = match req.time {
        Some(t) => {
            NaiveTime::parse_from_str(&t, "%H:%M")
                .map_err(|_| DomainError::InvalidStartTime(t.clone()))?;
            t
        }
        None => now.format("%H:%M").to_string(),
    };
    let keyword = req.car_type.as_deref().unwrap_or("All");

    let query = SearchQuery::new(origin, dest, date, start_time.clone(), keyword);
    let trains = state
        .repo
        .load_search(&query)
        .await
        .into_value_or_default();

    Ok(Json(SearchResponse {
        date: date.format("%Y-%m-%d").to_string(),
        start_time,
        trains: trains.into_iter().map(TrainResult::from).collect(),
    }))
}

async fn list_favorites(State(state): State<AppState>) -> Json<Vec<FavoriteRoute>> {
    Json(state.repo.settings().favorites().await)
}

async fn add_favorite(
    State(state): State<AppState>,
    Json(route): Json<FavoriteRoute>,
) -> Result<impl IntoResponse, AppError> {
    StationId::parse(&route.origin_id).map_err(DomainError::from)?;
    StationId::parse(&route.dest_id).map_err(DomainError::from)?;

    let added = state.repo.settings().add_favorite(route).await?;
    let status = if added {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(FavoriteAdded { added })))
}

async fn remove_favorite(
    State(state): State<AppState>,
    Path((origin, dest)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    if state
        .repo
        .settings()
        .remove_favorite(&origin, &dest)
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound {
            message: format!("no favorite from {origin} to {dest}"),
        })
    }
}

/// Replace the TDX credentials. Drops the token and cached lists.
async fn update_credentials(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<StatusCode, AppError> {
    state
        .repo
        .update_credentials(Credentials::new(req.client_id, req.client_secret))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn profile(State(state): State<AppState>) -> Json<ProfileResponse> {
    let settings = state.repo.settings();
    let credentials = settings.credentials().await;
    Json(ProfileResponse {
        username: settings.username().await,
        credentials_configured: credentials.is_complete(),
        client_id: credentials.client_id,
    })
}

async fn update_profile(
    State(state): State<AppState>,
    Json(req): Json<ProfileRequest>,
) -> Result<StatusCode, AppError> {
    state.repo.settings().set_username(req.username).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<SettingsError> for AppError {
    fn from(e: SettingsError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
