//! TDX client error types.

/// Errors from the TDX HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum TdxError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Token rejected or credentials invalid
    #[error("unauthorized (invalid or expired credentials)")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by TDX API")]
    RateLimited,
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(b) => format!(" (body: {b})"),
        None => String::new(),
    }
}
