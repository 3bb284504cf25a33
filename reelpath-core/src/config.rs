//! Centralized configuration for Reelpath.
//!
//! All tunable parameters are defined here with defaults, and can be
//! overridden from the process environment.

use std::time::Duration;

use url::Url;

use crate::errors::ConfigError;

/// Central configuration for all Reelpath components.
#[derive(Debug, Clone, Default)]
pub struct ReelpathConfig {
    pub upstream: UpstreamConfig,
    pub server: ServerConfig,
}

/// Player front-end access settings.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Landing page scraped for the current player domain (`BASE_URL`)
    pub entry_url: Option<String>,
    /// Domain used when discovery finds nothing (`DEFAULT_PLAYER_URL`)
    pub fallback_domain: Option<String>,
    /// Timeout applied to every upstream request
    pub request_timeout: Duration,
    /// User agent sent upstream; the player rejects obvious bots
    pub user_agent: &'static str,
    /// Maximum redirects followed per request
    pub max_redirects: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            entry_url: None,
            fallback_domain: None,
            request_timeout: Duration::from_secs(30),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/124.0 Safari/537.36",
            max_redirects: 5,
        }
    }
}

/// HTTP API listener settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5001,
        }
    }
}

impl ReelpathConfig {
    /// Builds configuration from the process environment.
    ///
    /// # Errors
    /// - `ConfigError::InvalidValue` - A variable is set to an unusable value
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    ///
    /// Unset and blank variables keep their defaults.
    ///
    /// # Errors
    /// - `ConfigError::InvalidValue` - A variable is set to an unusable value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(entry_url) = get("BASE_URL") {
            Url::parse(&entry_url).map_err(|e| ConfigError::InvalidValue {
                name: "BASE_URL",
                value: entry_url.clone(),
                reason: e.to_string(),
            })?;
            config.upstream.entry_url = Some(entry_url);
        }

        config.upstream.fallback_domain = get("DEFAULT_PLAYER_URL");

        if let Some(timeout) = get("REQUEST_TIMEOUT_SECS") {
            let seconds = timeout
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue {
                    name: "REQUEST_TIMEOUT_SECS",
                    value: timeout.clone(),
                    reason: e.to_string(),
                })?;
            config.upstream.request_timeout = Duration::from_secs(seconds);
        }

        if let Some(host) = get("HOST") {
            config.server.host = host;
        }

        if let Some(port) = get("PORT") {
            config.server.port = port.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                name: "PORT",
                value: port.clone(),
                reason: e.to_string(),
            })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = ReelpathConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.upstream.entry_url, None);
        assert_eq!(config.upstream.fallback_domain, None);
        assert_eq!(config.upstream.request_timeout, Duration::from_secs(30));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5001);
    }

    #[test]
    fn test_reads_overrides() {
        let config = ReelpathConfig::from_lookup(lookup(&[
            ("BASE_URL", "https://landing.example/movie/1"),
            ("DEFAULT_PLAYER_URL", "https://player.example/"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(
            config.upstream.entry_url.as_deref(),
            Some("https://landing.example/movie/1")
        );
        assert_eq!(
            config.upstream.fallback_domain.as_deref(),
            Some("https://player.example/")
        );
        assert_eq!(config.upstream.request_timeout, Duration::from_secs(5));
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = ReelpathConfig::from_lookup(lookup(&[("DEFAULT_PLAYER_URL", "  ")])).unwrap();
        assert_eq!(config.upstream.fallback_domain, None);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let error = ReelpathConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidValue { name: "PORT", .. }));

        let error = ReelpathConfig::from_lookup(lookup(&[("BASE_URL", "not a url")])).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidValue { name: "BASE_URL", .. }));
    }
}
