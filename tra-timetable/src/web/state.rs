//! Application state for the web layer.

use crate::repository::TrainRepository;

/// Shared application state.
///
/// The repository already shares its token, caches and settings between
/// clones, so the state is just a handle to it.
#[derive(Clone)]
pub struct AppState {
    /// Token-gated TDX access layer
    pub repo: TrainRepository,
}

impl AppState {
    /// Create a new app state.
    pub fn new(repo: TrainRepository) -> Self {
        Self { repo }
    }
}
