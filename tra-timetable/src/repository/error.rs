//! Access-layer error taxonomy.

use crate::tdx::TdxError;

/// Why a query could not produce fresh data.
///
/// Callers of the `fetch_*` methods never see this; it is logged and kept
/// in [`Fetched`](super::Fetched) for diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Client ID or secret is blank; no login was attempted
    #[error("missing credentials: set a TDX client ID and secret")]
    MissingCredentials,

    /// The token exchange failed
    #[error("login failed: {0}")]
    Auth(#[source] TdxError),

    /// The data call failed
    #[error("request failed: {0}")]
    Request(#[source] TdxError),
}

impl FetchError {
    /// Short machine-readable name, for logs and JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::MissingCredentials => "missing_credentials",
            FetchError::Auth(_) => "auth_failure",
            FetchError::Request(_) => "request_failure",
        }
    }
}
