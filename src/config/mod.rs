//! Configuration management for Portal Core

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Remote API configuration
    pub api: ApiConfig,
    /// Well-known routes used by the guards
    pub routes: RouteConfig,
    /// Logging configuration
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the portal API (e.g., http://localhost:5000/api)
    pub base_url: String,
    pub timeout_secs: u64,
    /// Bearer token to start with, if any (CLI use)
    pub token: Option<String>,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_secs: 30,
            token: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteConfig {
    /// Where authenticated users land (and where role mismatches are sent)
    pub landing_path: String,
    /// Where unauthenticated users are sent
    pub login_path: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            landing_path: "/dashboard".to_string(),
            login_path: "/login".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// "json" or "pretty"
    pub log_format: String,
    pub service_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: "pretty".to_string(),
            service_name: "portal-core".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_defaults = ApiConfig::default();
        let route_defaults = RouteConfig::default();
        let telemetry_defaults = TelemetryConfig::default();

        let base_url = lookup("PORTAL_API_URL").unwrap_or(api_defaults.base_url);
        url::Url::parse(&base_url).context("Invalid PORTAL_API_URL")?;

        let timeout_secs = match lookup("PORTAL_API_TIMEOUT_SECS") {
            Some(raw) => raw.parse().context("Invalid PORTAL_API_TIMEOUT_SECS")?,
            None => api_defaults.timeout_secs,
        };

        let landing_path =
            lookup("PORTAL_LANDING_PATH").unwrap_or(route_defaults.landing_path);
        let login_path = lookup("PORTAL_LOGIN_PATH").unwrap_or(route_defaults.login_path);
        for (name, value) in [
            ("PORTAL_LANDING_PATH", &landing_path),
            ("PORTAL_LOGIN_PATH", &login_path),
        ] {
            if !value.starts_with('/') {
                anyhow::bail!("{} must be an absolute path, got {:?}", name, value);
            }
        }

        let log_format = lookup("PORTAL_LOG_FORMAT").unwrap_or(telemetry_defaults.log_format);

        Ok(Self {
            api: ApiConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                timeout_secs,
                token: lookup("PORTAL_API_TOKEN").filter(|t| !t.is_empty()),
            },
            routes: RouteConfig {
                landing_path,
                login_path,
            },
            telemetry: TelemetryConfig {
                log_format,
                service_name: lookup("PORTAL_SERVICE_NAME")
                    .unwrap_or(telemetry_defaults.service_name),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert!(config.api.token.is_none());
        assert_eq!(config.routes.landing_path, "/dashboard");
        assert_eq!(config.routes.login_path, "/login");
        assert_eq!(config.telemetry.log_format, "pretty");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORTAL_API_URL", "https://portal.example.com/api/"),
            ("PORTAL_API_TIMEOUT_SECS", "5"),
            ("PORTAL_API_TOKEN", "abc"),
            ("PORTAL_LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.api.base_url, "https://portal.example.com/api");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.api.token.as_deref(), Some("abc"));
        assert_eq!(config.telemetry.log_format, "json");
    }

    #[test]
    fn test_invalid_timeout() {
        let err = Config::from_lookup(lookup_from(&[("PORTAL_API_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("PORTAL_API_TIMEOUT_SECS"));
    }

    #[test]
    fn test_invalid_url() {
        assert!(Config::from_lookup(lookup_from(&[("PORTAL_API_URL", "not a url")])).is_err());
    }

    #[test]
    fn test_relative_route_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("PORTAL_LOGIN_PATH", "login")])).is_err());
    }

    #[test]
    fn test_empty_token_ignored() {
        let config = Config::from_lookup(lookup_from(&[("PORTAL_API_TOKEN", "")])).unwrap();
        assert!(config.api.token.is_none());
    }
}
