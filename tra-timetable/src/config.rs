//! Process configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::repository::CacheConfig;
use crate::settings::Credentials;
use crate::tdx::TdxConfig;

const DEFAULT_SETTINGS_PATH: &str = "tra-settings.json";
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// A variable was set but could not be parsed.
#[derive(Debug, Error)]
#[error("invalid value for {var}: {value:?} ({reason})")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TDX endpoint and timeout.
    pub tdx: TdxConfig,

    /// Where credentials, username and favorites are persisted.
    pub settings_path: PathBuf,

    pub listen_addr: SocketAddr,

    pub cache: CacheConfig,

    /// Credentials from `TDX_CLIENT_ID`/`TDX_CLIENT_SECRET`. Only used when
    /// the settings file has none.
    pub seed_credentials: Option<Credentials>,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let mut tdx = TdxConfig::new();
        if let Some(url) = get("TDX_BASE_URL") {
            tdx = tdx.with_base_url(url);
        }
        if let Some(secs) = get("TDX_TIMEOUT_SECS") {
            tdx = tdx.with_timeout(parse_secs("TDX_TIMEOUT_SECS", &secs)?);
        }

        let mut cache = CacheConfig::default();
        if let Some(secs) = get("TRA_CACHE_TTL_SECS") {
            cache = cache.with_ttl(Duration::from_secs(parse_secs("TRA_CACHE_TTL_SECS", &secs)?));
        }

        let listen = get("TRA_LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen.parse().map_err(|e: std::net::AddrParseError| ConfigError {
            var: "TRA_LISTEN_ADDR",
            value: listen.clone(),
            reason: e.to_string(),
        })?;

        let settings_path = get("TRA_SETTINGS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));

        let seed_credentials = match (get("TDX_CLIENT_ID"), get("TDX_CLIENT_SECRET")) {
            (Some(id), Some(secret)) => Some(Credentials::new(id, secret)),
            _ => None,
        };

        Ok(Self {
            tdx,
            settings_path,
            listen_addr,
            cache,
            seed_credentials,
        })
    }
}

fn parse_secs(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError {
            var,
            value: value.to_string(),
            reason: "must be positive".into(),
        }),
        Ok(secs) => Ok(secs),
        Err(e) => Err(ConfigError {
            var,
            value: value.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.tdx.base_url, crate::tdx::DEFAULT_BASE_URL);
        assert_eq!(config.listen_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.settings_path, PathBuf::from("tra-settings.json"));
        assert!(config.cache.ttl.is_none());
        assert!(config.seed_credentials.is_none());
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("TDX_BASE_URL", "http://localhost:9000/"),
            ("TDX_TIMEOUT_SECS", "5"),
            ("TRA_CACHE_TTL_SECS", "600"),
            ("TRA_LISTEN_ADDR", "0.0.0.0:8080"),
            ("TRA_SETTINGS_PATH", "/tmp/tra.json"),
        ])
        .unwrap();

        assert_eq!(config.tdx.base_url, "http://localhost:9000");
        assert_eq!(config.tdx.timeout_secs, 5);
        assert_eq!(config.cache.ttl, Some(Duration::from_secs(600)));
        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.settings_path, PathBuf::from("/tmp/tra.json"));
    }

    #[test]
    fn seed_needs_both_halves() {
        let config = config(&[("TDX_CLIENT_ID", "id")]).unwrap();
        assert!(config.seed_credentials.is_none());

        let config = config_with_both();
        let seed = config.seed_credentials.unwrap();
        assert_eq!(seed.client_id, "id");
        assert!(seed.is_complete());
    }

    fn config_with_both() -> AppConfig {
        config(&[("TDX_CLIENT_ID", "id"), ("TDX_CLIENT_SECRET", "secret")]).unwrap()
    }

    #[test]
    fn blank_values_are_unset() {
        let config = config(&[("TRA_LISTEN_ADDR", "  "), ("TDX_CLIENT_SECRET", "")]).unwrap();
        assert_eq!(config.listen_addr.port(), 3000);
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = config(&[("TDX_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert_eq!(err.var, "TDX_TIMEOUT_SECS");

        let err = config(&[("TRA_CACHE_TTL_SECS", "0")]).unwrap_err();
        assert!(err.to_string().contains("must be positive"));

        let err = config(&[("TRA_LISTEN_ADDR", "nowhere")]).unwrap_err();
        assert_eq!(err.var, "TRA_LISTEN_ADDR");
    }
}
