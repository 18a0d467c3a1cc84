//! Bearer token acquisition.
//!
//! Exchanges the stored client credentials for a bearer token using the
//! OAuth2 client-credentials grant, and holds the token in memory until it
//! expires or is invalidated. Tokens are never written to disk.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::settings::SettingsStore;
use crate::tdx::TdxClient;

use super::error::FetchError;

/// How long before the provider's expiry we stop using a token.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// A held bearer token, formatted for the `Authorization` header.
#[derive(Clone)]
pub struct BearerToken {
    header: String,
    expires_at: Option<Instant>,
}

impl BearerToken {
    /// Wrap an access token. `expires_in` is the provider's lifetime in
    /// seconds; `None` means the token is used until invalidated.
    pub fn new(access_token: &str, expires_in: Option<u64>) -> Self {
        let expires_at = expires_in.map(|secs| {
            Instant::now() + Duration::from_secs(secs).saturating_sub(EXPIRY_MARGIN)
        });

        Self {
            header: format!("Bearer {access_token}"),
            expires_at,
        }
    }

    /// `"Bearer <access_token>"`
    pub fn as_str(&self) -> &str {
        &self.header
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("header", &"Bearer <redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Produces bearer tokens, logging in at most once per token lifetime.
///
/// Concurrent callers that find no token each perform their own login;
/// there is no de-duplication.
///
/// A login that was already in flight when [`invalidate`](Self::invalidate)
/// ran still hands its token to its own caller, but does not store it.
#[derive(Debug)]
pub struct TokenManager {
    client: TdxClient,
    settings: Arc<SettingsStore>,
    token: RwLock<Option<BearerToken>>,
    /// Bumped by `invalidate`, under the `token` write lock.
    generation: AtomicU64,
}

impl TokenManager {
    pub fn new(client: TdxClient, settings: Arc<SettingsStore>) -> Self {
        Self {
            client,
            settings,
            token: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Return the held token, or log in to get one.
    ///
    /// Fails with [`FetchError::MissingCredentials`] without touching the
    /// network if either credential is blank. Login failures are returned
    /// as [`FetchError::Auth`] and nothing is stored. Never retries.
    pub async fn ensure_token(&self) -> Result<BearerToken, FetchError> {
        if let Some(token) = self.token.read().await.as_ref() {
            if !token.is_expired() {
                return Ok(token.clone());
            }
            debug!("held token expired");
        }

        let generation = self.generation.load(Ordering::Acquire);
        let credentials = self.settings.credentials().await;
        if !credentials.is_complete() {
            warn!("TDX credentials missing; not logging in");
            return Err(FetchError::MissingCredentials);
        }

        let response = self
            .client
            .request_token(&credentials.client_id, &credentials.client_secret)
            .await
            .map_err(|e| {
                warn!(error = %e, "TDX login failed");
                FetchError::Auth(e)
            })?;

        let token = BearerToken::new(&response.access_token, response.expires_in);
        info!(expires_in = ?response.expires_in, "logged in to TDX");

        let mut held = self.token.write().await;
        if self.generation.load(Ordering::Acquire) == generation {
            *held = Some(token.clone());
        } else {
            debug!("credentials changed during login; token not kept");
        }
        Ok(token)
    }

    /// Callback form of [`ensure_token`](Self::ensure_token).
    ///
    /// Exactly one of `on_ready` or `on_failure` runs, on a tokio task.
    pub fn ensure_token_then<R, F>(
        self: &Arc<Self>,
        on_ready: R,
        on_failure: F,
    ) -> JoinHandle<()>
    where
        R: FnOnce(BearerToken) + Send + 'static,
        F: FnOnce(FetchError) + Send + 'static,
    {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            match this.ensure_token().await {
                Ok(token) => on_ready(token),
                Err(e) => on_failure(e),
            }
        })
    }

    /// Drop the held token; the next call logs in again.
    pub async fn invalidate(&self) {
        let mut held = self.token.write().await;
        self.generation.fetch_add(1, Ordering::AcqRel);
        *held = None;
    }

    /// Whether a token is currently held (expired or not).
    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }
}
