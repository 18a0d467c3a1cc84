//! JSON-file settings store.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::domain::FavoriteRoute;

use super::error::SettingsError;

/// Everything the app persists locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub favorites: Vec<FavoriteRoute>,
}

/// TDX client credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Both parts present and non-blank.
    pub fn is_complete(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.client_secret.trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Thread-safe settings with optional file backing.
///
/// Every mutation is written through to disk before it becomes visible, so
/// a failed write leaves the in-memory state unchanged.
#[derive(Debug)]
pub struct SettingsStore {
    path: Option<PathBuf>,
    inner: RwLock<Settings>,
}

impl SettingsStore {
    /// Open the settings file at `path`. A missing file yields defaults;
    /// it is created on the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();

        let settings = match std::fs::read_to_string(&path) {
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|e| SettingsError::Corrupt {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Settings::default(),
            Err(e) => {
                return Err(SettingsError::Io {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };

        Ok(Self {
            path: Some(path),
            inner: RwLock::new(settings),
        })
    }

    /// A store that lives only in memory.
    pub fn in_memory(settings: Settings) -> Self {
        Self {
            path: None,
            inner: RwLock::new(settings),
        }
    }

    /// The backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// A copy of the current settings.
    pub async fn snapshot(&self) -> Settings {
        self.inner.read().await.clone()
    }

    pub async fn credentials(&self) -> Credentials {
        let guard = self.inner.read().await;
        Credentials::new(guard.client_id.clone(), guard.client_secret.clone())
    }

    pub async fn set_credentials(&self, credentials: Credentials) -> Result<(), SettingsError> {
        self.update(|s| {
            s.client_id = credentials.client_id;
            s.client_secret = credentials.client_secret;
        })
        .await
    }

    pub async fn username(&self) -> String {
        self.inner.read().await.username.clone()
    }

    pub async fn set_username(&self, username: impl Into<String>) -> Result<(), SettingsError> {
        let username = username.into();
        self.update(|s| s.username = username).await
    }

    pub async fn favorites(&self) -> Vec<FavoriteRoute> {
        self.inner.read().await.favorites.clone()
    }

    pub async fn is_favorite(&self, origin_id: &str, dest_id: &str) -> bool {
        let guard = self.inner.read().await;
        guard.favorites.iter().any(|f| f.is_route(origin_id, dest_id))
    }

    /// Add a favorite route. Returns `false` (and writes nothing) if the
    /// same origin/destination pair is already saved.
    pub async fn add_favorite(&self, route: FavoriteRoute) -> Result<bool, SettingsError> {
        let mut guard = self.inner.write().await;

        if guard.favorites.iter().any(|f| f.same_route(&route)) {
            return Ok(false);
        }

        let mut next = guard.clone();
        next.favorites.push(route);
        self.save(&next).await?;
        *guard = next;

        Ok(true)
    }

    /// Remove a favorite route. Returns whether anything was removed.
    pub async fn remove_favorite(
        &self,
        origin_id: &str,
        dest_id: &str,
    ) -> Result<bool, SettingsError> {
        let mut guard = self.inner.write().await;

        let mut next = guard.clone();
        next.favorites.retain(|f| !f.is_route(origin_id, dest_id));
        if next.favorites.len() == guard.favorites.len() {
            return Ok(false);
        }

        self.save(&next).await?;
        *guard = next;

        Ok(true)
    }

    async fn update(&self, mutate: impl FnOnce(&mut Settings)) -> Result<(), SettingsError> {
        let mut guard = self.inner.write().await;

        let mut next = guard.clone();
        mutate(&mut next);
        self.save(&next).await?;
        *guard = next;

        Ok(())
    }

    /// Write settings to the backing file, if any.
    ///
    /// Creates parent directories if they don't exist.
    async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let io_err = |source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(settings)?;
        tokio::fs::write(path, json).await.map_err(io_err)?;

        Ok(())
    }
}
