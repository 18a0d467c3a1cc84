//! Locally persisted app settings.
//!
//! TDX client credentials, a display username and saved favorite routes,
//! kept in a single JSON document on disk.

mod error;
mod store;

pub use error::SettingsError;
pub use store::{Credentials, Settings, SettingsStore};
