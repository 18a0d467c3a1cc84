//! Single-slot caches for alerts and the station list.
//!
//! Each list is cached as one value: either absent or the complete body of
//! the last successful response. Failed fetches never touch the cache.
//!
//! A generation counter guards against a request that started before an
//! invalidation writing its (possibly stale-credential) result afterwards.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{Alert, StationsByCity};

/// Cached alert list.
pub type AlertsEntry = Arc<Vec<Alert>>;

/// Cached station grouping.
pub type StationsEntry = Arc<StationsByCity>;

/// Configuration for the caches.
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// TTL for cached lists. `None` keeps them until invalidated.
    pub ttl: Option<Duration>,
}

impl CacheConfig {
    /// Expire cached lists after `ttl`.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

/// A cache holding at most one value.
fn slot<V>(config: &CacheConfig) -> MokaCache<(), V>
where
    V: Clone + Send + Sync + 'static,
{
    let mut builder = MokaCache::builder();
    if let Some(ttl) = config.ttl {
        builder = builder.time_to_live(ttl);
    }
    builder.build()
}

/// Response caches for the access layer.
pub struct ResponseCache {
    alerts: MokaCache<(), AlertsEntry>,
    stations: MokaCache<(), StationsEntry>,
    generation: AtomicU64,
}

impl ResponseCache {
    /// Create empty caches with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            alerts: slot(config),
            stations: slot(config),
            generation: AtomicU64::new(0),
        }
    }

    /// Current generation. Take this before starting a fetch and pass it
    /// back when storing the result.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub async fn alerts(&self) -> Option<AlertsEntry> {
        self.alerts.get(&()).await
    }

    /// Store alerts fetched during `generation`. Returns `false` (and
    /// stores nothing) if the caches were invalidated since.
    pub async fn store_alerts(&self, generation: u64, entry: AlertsEntry) -> bool {
        self.store(&self.alerts, generation, entry).await
    }

    pub async fn stations(&self) -> Option<StationsEntry> {
        self.stations.get(&()).await
    }

    /// Store stations fetched during `generation`. See
    /// [`store_alerts`](Self::store_alerts).
    pub async fn store_stations(&self, generation: u64, entry: StationsEntry) -> bool {
        self.store(&self.stations, generation, entry).await
    }

    /// Insert unless invalidated since `generation`. An invalidation that
    /// lands between the check and the insert is caught by the re-check,
    /// which evicts the entry again.
    async fn store<V>(&self, slot: &MokaCache<(), V>, generation: u64, entry: V) -> bool
    where
        V: Clone + Send + Sync + 'static,
    {
        if self.generation() != generation {
            return false;
        }
        slot.insert((), entry).await;
        if self.generation() != generation {
            slot.invalidate(&()).await;
            return false;
        }
        true
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.alerts.invalidate_all();
        self.stations.invalidate_all();
    }
}
