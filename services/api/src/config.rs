//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;
use whereami_core::context::{is_valid_timestamp_format, DEFAULT_TIMESTAMP_FORMAT};

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub nominatim_url: String,
    pub nominatim_user_agent: String,
    /// `None` leaves geocoding requests without a deadline.
    pub geocoder_timeout: Option<Duration>,
    pub max_upload_bytes: usize,
    pub cors_origin: String,
    pub timestamp_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            log_level: Level::INFO,
            nominatim_url: "https://nominatim.openstreetmap.org/reverse".to_string(),
            nominatim_user_agent: "smart-whereami/0.1".to_string(),
            geocoder_timeout: None,
            max_upload_bytes: 10 * 1024 * 1024,
            cors_origin: "http://localhost:3000".to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // --- Server Settings ---
        let bind_address = match lookup("BIND_ADDRESS") {
            Some(raw) => raw
                .parse::<SocketAddr>()
                .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?,
            None => defaults.bind_address,
        };

        let log_level = match lookup("RUST_LOG") {
            Some(raw) => raw.parse::<Level>().map_err(|_| {
                ConfigError::InvalidValue(
                    "RUST_LOG".to_string(),
                    format!("'{}' is not a valid log level", raw),
                )
            })?,
            None => defaults.log_level,
        };

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(raw) => raw.parse::<usize>().map_err(|e| {
                ConfigError::InvalidValue("MAX_UPLOAD_BYTES".to_string(), e.to_string())
            })?,
            None => defaults.max_upload_bytes,
        };

        let cors_origin = lookup("CORS_ORIGIN").unwrap_or(defaults.cors_origin);

        // --- Geocoder Settings ---
        let nominatim_url = lookup("NOMINATIM_URL").unwrap_or(defaults.nominatim_url);
        reqwest::Url::parse(&nominatim_url)
            .map_err(|e| ConfigError::InvalidValue("NOMINATIM_URL".to_string(), e.to_string()))?;

        let nominatim_user_agent =
            lookup("NOMINATIM_USER_AGENT").unwrap_or(defaults.nominatim_user_agent);

        let geocoder_timeout = match lookup("GEOCODER_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue("GEOCODER_TIMEOUT_SECS".to_string(), e.to_string())
            })?)),
            None => None,
        };

        // --- Display Settings ---
        let timestamp_format = lookup("TIMESTAMP_FORMAT").unwrap_or(defaults.timestamp_format);
        if !is_valid_timestamp_format(&timestamp_format) {
            return Err(ConfigError::InvalidValue(
                "TIMESTAMP_FORMAT".to_string(),
                format!("'{}' is not a valid strftime pattern", timestamp_format),
            ));
        }

        Ok(Self {
            bind_address,
            log_level,
            nominatim_url,
            nominatim_user_agent,
            geocoder_timeout,
            max_upload_bytes,
            cors_origin,
            timestamp_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::assert_ok;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = assert_ok!(Config::from_lookup(lookup(&[])));
        assert_eq!(config.bind_address.port(), 3000);
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.geocoder_timeout, None);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = assert_ok!(Config::from_lookup(lookup(&[
            ("BIND_ADDRESS", "127.0.0.1:8080"),
            ("RUST_LOG", "debug"),
            ("GEOCODER_TIMEOUT_SECS", "5"),
            ("NOMINATIM_URL", "http://localhost:8088/reverse"),
        ])));
        assert_eq!(config.bind_address.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.geocoder_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.nominatim_url, "http://localhost:8088/reverse");
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = Config::from_lookup(lookup(&[("RUST_LOG", "chatty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref var, _) if var == "RUST_LOG"));

        let err = Config::from_lookup(lookup(&[("TIMESTAMP_FORMAT", "%Q")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref var, _) if var == "TIMESTAMP_FORMAT"));
    }
}
