use std::time::Duration;

use arbor_core::species::{
    SentinelSpecies, DEFAULT_FALLBACK_SPECIES_ID, DEFAULT_UNIDENTIFIED_SPECIES_ID,
};

use crate::auth::jwt::JwtConfig;

/// Default wait for a sync transaction to start, in milliseconds.
const DEFAULT_TX_MAX_WAIT_MS: u64 = 5_000;
/// Default total budget for a sync transaction, in milliseconds.
const DEFAULT_TX_TIMEOUT_MS: u64 = 20_000;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration.
    pub jwt: JwtConfig,
    /// Sync engine budgets and sentinel species.
    pub sync: SyncConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            sync: SyncConfig::from_env(),
        }
    }
}

/// Budgets for the batch transaction and the catalog rows merge logic falls
/// back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    /// Longest wait for a pooled connection and `BEGIN`.
    pub tx_max_wait: Duration,
    /// Longest time the whole batch may run, commit included.
    pub tx_timeout: Duration,
    pub sentinels: SentinelSpecies,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            tx_max_wait: Duration::from_millis(DEFAULT_TX_MAX_WAIT_MS),
            tx_timeout: Duration::from_millis(DEFAULT_TX_TIMEOUT_MS),
            sentinels: SentinelSpecies::default(),
        }
    }
}

impl SyncConfig {
    /// Load sync settings from environment variables.
    ///
    /// | Env Var                   | Default |
    /// |---------------------------|---------|
    /// | `SYNC_TX_MAX_WAIT_MS`     | `5000`  |
    /// | `SYNC_TX_TIMEOUT_MS`      | `20000` |
    /// | `UNIDENTIFIED_SPECIES_ID` | `1`     |
    /// | `FALLBACK_SPECIES_ID`     | `2`     |
    ///
    /// # Panics
    ///
    /// Panics if a variable is set but does not parse.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let number = |key: &str, default: i64| -> i64 {
            lookup(key)
                .map(|raw| {
                    raw.trim()
                        .parse()
                        .unwrap_or_else(|_| panic!("{key} must be a valid integer"))
                })
                .unwrap_or(default)
        };
        let millis = |key: &str, default: u64| -> Duration {
            let value = number(key, default as i64);
            assert!(value > 0, "{key} must be positive");
            Duration::from_millis(value as u64)
        };

        Self {
            tx_max_wait: millis("SYNC_TX_MAX_WAIT_MS", DEFAULT_TX_MAX_WAIT_MS),
            tx_timeout: millis("SYNC_TX_TIMEOUT_MS", DEFAULT_TX_TIMEOUT_MS),
            sentinels: SentinelSpecies {
                unidentified: number("UNIDENTIFIED_SPECIES_ID", DEFAULT_UNIDENTIFIED_SPECIES_ID),
                fallback: number("FALLBACK_SPECIES_ID", DEFAULT_FALLBACK_SPECIES_ID),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(SyncConfig::from_lookup(lookup(&[])), SyncConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = SyncConfig::from_lookup(lookup(&[
            ("SYNC_TX_MAX_WAIT_MS", "250"),
            ("SYNC_TX_TIMEOUT_MS", "1000"),
            ("UNIDENTIFIED_SPECIES_ID", "40"),
            ("FALLBACK_SPECIES_ID", "41"),
        ]));
        assert_eq!(config.tx_max_wait, Duration::from_millis(250));
        assert_eq!(config.tx_timeout, Duration::from_secs(1));
        assert_eq!(config.sentinels.unidentified, 40);
        assert_eq!(config.sentinels.fallback, 41);
    }

    #[test]
    #[should_panic(expected = "SYNC_TX_TIMEOUT_MS must be positive")]
    fn rejects_zero_budget() {
        SyncConfig::from_lookup(lookup(&[("SYNC_TX_TIMEOUT_MS", "0")]));
    }
}
