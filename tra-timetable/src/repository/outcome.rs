//! Tagged query outcomes.

use super::error::FetchError;

/// Result of an access-layer query, before it is collapsed for display.
#[derive(Debug)]
pub enum Fetched<T> {
    /// Fetched from TDX just now.
    Fresh(T),
    /// Served from cache without a network call.
    Cached(T),
    /// The fetch failed; this is the last good cached value.
    Stale { value: T, cause: FetchError },
    /// The fetch failed and nothing was cached.
    Failed(FetchError),
}

impl<T> Fetched<T> {
    /// After a failed fetch: fall back to `cached` if there is one.
    pub(crate) fn fallback(cached: Option<T>, cause: FetchError) -> Self {
        match cached {
            Some(value) => Fetched::Stale { value, cause },
            None => Fetched::Failed(cause),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Fetched::Fresh(v) | Fetched::Cached(v) | Fetched::Stale { value: v, .. } => Some(v),
            Fetched::Failed(_) => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Fetched::Fresh(v) | Fetched::Cached(v) | Fetched::Stale { value: v, .. } => Some(v),
            Fetched::Failed(_) => None,
        }
    }

    /// The failure behind a `Stale` or `Failed` outcome.
    pub fn cause(&self) -> Option<&FetchError> {
        match self {
            Fetched::Stale { cause, .. } | Fetched::Failed(cause) => Some(cause),
            Fetched::Fresh(_) | Fetched::Cached(_) => None,
        }
    }

    /// Whether the value came from the network on this call.
    pub fn is_fresh(&self) -> bool {
        matches!(self, Fetched::Fresh(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Fetched::Fresh(v) => Fetched::Fresh(f(v)),
            Fetched::Cached(v) => Fetched::Cached(f(v)),
            Fetched::Stale { value, cause } => Fetched::Stale {
                value: f(value),
                cause,
            },
            Fetched::Failed(cause) => Fetched::Failed(cause),
        }
    }
}

impl<T: Default> Fetched<T> {
    /// Collapse to what a screen shows: the value, or an empty one.
    pub fn into_value_or_default(self) -> T {
        self.into_value().unwrap_or_default()
    }
}
