//! Token-gated access to TRA schedules, alerts and stations.
//!
//! [`TrainRepository`] is the single entry point screens talk to. Every
//! query ensures a bearer token, performs one TDX read and reshapes the
//! payload into view models. Alerts and the station list are memoized in
//! single-slot caches until invalidated.
//!
//! Each query comes in three forms:
//! - `load_*` returns a tagged [`Fetched`] so the cause of a failure stays
//!   visible;
//! - `fetch_*` collapses that to what a screen shows (the value, a stale
//!   cached value, or an empty result);
//! - `fetch_*_then` spawns the request and hands the collapsed result to a
//!   callback.

mod cache;
mod error;
mod outcome;
mod search;
mod token;

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::{StationId, TrainSchedule};
use crate::settings::{Credentials, SettingsError, SettingsStore};
use crate::tdx::{TdxClient, TdxError, convert_live_board, group_stations_by_city};

pub use cache::{AlertsEntry, CacheConfig, ResponseCache, StationsEntry};
pub use error::FetchError;
pub use outcome::Fetched;
pub use search::{SearchQuery, filter_timetable};
pub use token::{BearerToken, TokenManager};

/// Schedule, alert and station queries against TDX.
///
/// Cheap to clone; clones share the token and caches.
#[derive(Clone)]
pub struct TrainRepository {
    inner: Arc<Inner>,
}

struct Inner {
    client: TdxClient,
    tokens: Arc<TokenManager>,
    cache: ResponseCache,
    settings: Arc<SettingsStore>,
}

impl TrainRepository {
    /// Create a repository. Nothing is fetched until the first query.
    pub fn new(
        client: TdxClient,
        settings: Arc<SettingsStore>,
        cache_config: &CacheConfig,
    ) -> Self {
        let tokens = Arc::new(TokenManager::new(client.clone(), Arc::clone(&settings)));

        Self {
            inner: Arc::new(Inner {
                client,
                tokens,
                cache: ResponseCache::new(cache_config),
                settings,
            }),
        }
    }

    pub fn tokens(&self) -> &Arc<TokenManager> {
        &self.inner.tokens
    }

    pub fn settings(&self) -> &Arc<SettingsStore> {
        &self.inner.settings
    }

    /// Drop the token and both cached lists.
    pub async fn invalidate(&self) {
        self.inner.tokens.invalidate().await;
        self.inner.cache.invalidate_all();
        debug!("token and caches invalidated");
    }

    /// Save new credentials and invalidate everything derived from the old
    /// ones.
    pub async fn update_credentials(&self, credentials: Credentials) -> Result<(), SettingsError> {
        self.inner.settings.set_credentials(credentials).await?;
        self.invalidate().await;
        Ok(())
    }

    // --- Alerts ---

    /// Current alerts.
    ///
    /// Without `force_refresh`, a cached list is returned with no network
    /// call. On failure, falls back to the cached list if there is one.
    pub async fn load_alerts(&self, force_refresh: bool) -> Fetched<AlertsEntry> {
        if !force_refresh && let Some(cached) = self.inner.cache.alerts().await {
            debug!(count = cached.len(), "alerts served from cache");
            return Fetched::Cached(cached);
        }

        let generation = self.inner.cache.generation();
        let result = match self.inner.tokens.ensure_token().await {
            Ok(token) => self.request(self.inner.client.alerts(&token).await).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(alerts) => {
                let entry = Arc::new(alerts);
                self.inner
                    .cache
                    .store_alerts(generation, Arc::clone(&entry))
                    .await;
                Fetched::Fresh(entry)
            }
            Err(e) => {
                warn!(error = %e, kind = e.kind(), "fetching alerts failed");
                Fetched::fallback(self.inner.cache.alerts().await, e)
            }
        }
    }

    pub async fn fetch_alerts(&self, force_refresh: bool) -> AlertsEntry {
        self.load_alerts(force_refresh).await.into_value_or_default()
    }

    pub fn fetch_alerts_then<F>(&self, force_refresh: bool, on_result: F) -> JoinHandle<()>
    where
        F: FnOnce(AlertsEntry) + Send + 'static,
    {
        let this = self.clone();
        tokio::spawn(async move { on_result(this.fetch_alerts(force_refresh).await) })
    }

    // --- Live board ---

    /// Live board for one station. Never cached.
    pub async fn load_trains(&self, station: &StationId) -> Fetched<Vec<TrainSchedule>> {
        let result = match self.inner.tokens.ensure_token().await {
            Ok(token) => {
                self.request(self.inner.client.live_board(&token, station).await)
                    .await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(entries) => Fetched::Fresh(convert_live_board(entries)),
            Err(e) => {
                warn!(error = %e, kind = e.kind(), %station, "fetching live board failed");
                Fetched::Failed(e)
            }
        }
    }

    pub async fn fetch_trains(&self, station: &StationId) -> Vec<TrainSchedule> {
        self.load_trains(station).await.into_value_or_default()
    }

    pub fn fetch_trains_then<F>(&self, station: StationId, on_result: F) -> JoinHandle<()>
    where
        F: FnOnce(Vec<TrainSchedule>) + Send + 'static,
    {
        let this = self.clone();
        tokio::spawn(async move { on_result(this.fetch_trains(&station).await) })
    }

    // --- Stations ---

    /// All stations grouped by city. Cached until invalidated.
    pub async fn load_all_stations(&self) -> Fetched<StationsEntry> {
        if let Some(cached) = self.inner.cache.stations().await {
            debug!(cities = cached.len(), "stations served from cache");
            return Fetched::Cached(cached);
        }

        let generation = self.inner.cache.generation();
        let result = match self.inner.tokens.ensure_token().await {
            Ok(token) => self.request(self.inner.client.stations(&token).await).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(records) => {
                let entry: StationsEntry = Arc::new(group_stations_by_city(records));
                self.inner
                    .cache
                    .store_stations(generation, Arc::clone(&entry))
                    .await;
                Fetched::Fresh(entry)
            }
            Err(e) => {
                warn!(error = %e, kind = e.kind(), "fetching stations failed");
                Fetched::fallback(self.inner.cache.stations().await, e)
            }
        }
    }

    pub async fn fetch_all_stations(&self) -> StationsEntry {
        self.load_all_stations().await.into_value_or_default()
    }

    pub fn fetch_all_stations_then<F>(&self, on_result: F) -> JoinHandle<()>
    where
        F: FnOnce(StationsEntry) + Send + 'static,
    {
        let this = self.clone();
        tokio::spawn(async move { on_result(this.fetch_all_stations().await) })
    }

    // --- Search ---

    /// Origin-destination timetable search. Never cached.
    pub async fn load_search(&self, query: &SearchQuery) -> Fetched<Vec<TrainSchedule>> {
        let result = match self.inner.tokens.ensure_token().await {
            Ok(token) => {
                let rows = self
                    .inner
                    .client
                    .od_timetable(&token, &query.origin, &query.dest, query.date)
                    .await;
                self.request(rows).await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(rows) => Fetched::Fresh(filter_timetable(&rows, &query.start_time, query.car_type)),
            Err(e) => {
                warn!(
                    error = %e,
                    kind = e.kind(),
                    origin = %query.origin,
                    dest = %query.dest,
                    "timetable search failed"
                );
                Fetched::Failed(e)
            }
        }
    }

    /// Trains from `origin` to `dest` on `date`, leaving at or after
    /// `start_time` (`HH:MM`), filtered by a car-type keyword.
    pub async fn search_trains(
        &self,
        origin: &StationId,
        dest: &StationId,
        date: NaiveDate,
        start_time: &str,
        car_type_keyword: &str,
    ) -> Vec<TrainSchedule> {
        let query = SearchQuery::new(
            origin.clone(),
            dest.clone(),
            date,
            start_time,
            car_type_keyword,
        );
        self.load_search(&query).await.into_value_or_default()
    }

    pub fn search_trains_then<F>(&self, query: SearchQuery, on_result: F) -> JoinHandle<()>
    where
        F: FnOnce(Vec<TrainSchedule>) + Send + 'static,
    {
        let this = self.clone();
        tokio::spawn(async move { on_result(this.load_search(&query).await.into_value_or_default()) })
    }

    /// Map a data-call result into the access-layer taxonomy.
    ///
    /// A rejected token is dropped so the next query logs in again; the
    /// current query is not retried.
    async fn request<T>(&self, result: Result<T, TdxError>) -> Result<T, FetchError> {
        match result {
            Ok(v) => Ok(v),
            Err(TdxError::Unauthorized) => {
                self.inner.tokens.invalidate().await;
                Err(FetchError::Request(TdxError::Unauthorized))
            }
            Err(e) => Err(FetchError::Request(e)),
        }
    }
}
