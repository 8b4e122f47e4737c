//! Server configuration read from the environment

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::http::HeaderValue;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ENVIRONMENT: &str = "development";

/// Configuration errors, raised at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("HOST must be an IP address, got {0:?}")]
    InvalidHost(String),

    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),

    #[error("CORS_ALLOWED_ORIGINS contains an invalid origin: {0:?}")]
    InvalidOrigin(String),
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Reported by the health endpoint
    pub environment: String,
    /// `None` allows any origin
    pub cors_origins: Option<Vec<HeaderValue>>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            cors_origins: None,
        }
    }
}

impl ApiConfig {
    /// Read `HOST`, `PORT`, `APP_ENV` and `CORS_ALLOWED_ORIGINS`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup, unset keys taking their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = match lookup("HOST") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidHost(raw))?,
            None => defaults.host,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };

        let environment = lookup("APP_ENV")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.environment);

        let cors_origins = match lookup("CORS_ALLOWED_ORIGINS") {
            Some(raw) => parse_origins(&raw)?,
            None => None,
        };

        Ok(Self {
            host,
            port,
            environment,
            cors_origins,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// CORS layer for the configured origins
    pub fn cors_layer(&self) -> CorsLayer {
        let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
        match &self.cors_origins {
            Some(origins) => layer.allow_origin(AllowOrigin::list(origins.clone())),
            None => layer.allow_origin(Any),
        }
    }
}

/// Comma separated origins; empty or `*` means any origin
fn parse_origins(raw: &str) -> Result<Option<Vec<HeaderValue>>, ConfigError> {
    let entries: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect();

    if entries.is_empty() || entries.contains(&"*") {
        return Ok(None);
    }

    entries
        .into_iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
        assert_eq!(config.environment, "development");
        assert!(config.cors_origins.is_none());
    }

    #[test]
    fn test_values_are_read() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8081"),
            ("APP_ENV", "production"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example"),
        ]))
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8081");
        assert_eq!(config.environment, "production");
        assert_eq!(config.cors_origins.unwrap().len(), 2);
    }

    #[test]
    fn test_wildcard_and_empty_origins_allow_any() {
        let config = ApiConfig::from_lookup(lookup(&[("CORS_ALLOWED_ORIGINS", "*")])).unwrap();
        assert!(config.cors_origins.is_none());

        let config = ApiConfig::from_lookup(lookup(&[("CORS_ALLOWED_ORIGINS", " , ")])).unwrap();
        assert!(config.cors_origins.is_none());
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let err = ApiConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(_)));

        let err = ApiConfig::from_lookup(lookup(&[("HOST", "localhost:80")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHost(_)));

        let err = ApiConfig::from_lookup(lookup(&[("CORS_ALLOWED_ORIGINS", "https://ok.example,bad\norigin")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOrigin(_)));
    }
}
