//! Settings store error types.

/// Errors reading or writing the settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Reading or writing the file failed
    #[error("settings I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File contents are not a valid settings document
    #[error("settings file {path} is corrupt: {message}")]
    Corrupt { path: String, message: String },

    /// Serializing the settings failed
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}
