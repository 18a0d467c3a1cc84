//! Local JSON front end.
//!
//! Exposes the repository's queries, favorites and credential management
//! as HTTP endpoints for a screen layer to call.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
