//! Configuration management via environment variables
//!
//! Every setting is optional. Service URLs fall back to in-cluster defaults,
//! credentials fall back to empty (which the probes report as unhealthy),
//! and a variable set to the empty string is treated as unset.

use crate::common::error::{MonitorError, MonitorResult};
use std::time::Duration;

/// Default interval between collection cycles (seconds)
pub const DEFAULT_COLLECT_INTERVAL_SECS: u64 = 30;

/// Default per-request timeout for outbound probe calls (seconds)
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// Get a non-empty environment variable
///
/// # Example
/// ```
/// use rinzler_monitor::config::get_env;
///
/// let token = get_env("PLEX_TOKEN").unwrap_or_default();
/// ```
pub fn get_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable, returning `default` when unset or empty
pub fn get_env_or(name: &str, default: &str) -> String {
    get_env(name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable parsed to a specific type
///
/// An unparsable value logs a warning and yields `default`.
pub fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    match get_env(name) {
        Some(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(
                    variable = name,
                    value = %raw,
                    "Ignoring unparsable environment variable, using default"
                );
                default
            }
        },
        None => default,
    }
}

/// Connection parameters for one monitored service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base URL (no trailing slash required)
    pub url: String,
    /// API key or token; empty when not configured
    pub credential: String,
}

impl ServiceConfig {
    /// Create a service config from explicit values
    pub fn new(url: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            credential: credential.into(),
        }
    }

    /// Load from a URL variable (with default) and a credential variable
    pub fn from_env(url_var: &str, default_url: &str, credential_var: &str) -> Self {
        Self {
            url: get_env_or(url_var, default_url),
            credential: get_env(credential_var).unwrap_or_default(),
        }
    }

    /// Whether a credential is configured
    pub fn has_credential(&self) -> bool {
        !self.credential.is_empty()
    }

    /// Join `path` onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), path)
    }
}

/// Transmission connection parameters (optional basic auth)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransmissionConfig {
    /// Base URL
    pub url: String,
    /// Basic auth username; empty disables basic auth
    pub username: String,
    /// Basic auth password
    pub password: String,
}

impl TransmissionConfig {
    /// Load from `TRANSMISSION_URL`, `TRANSMISSION_USER`, `TRANSMISSION_PASS`
    pub fn from_env() -> Self {
        Self {
            url: get_env_or("TRANSMISSION_URL", defaults::TRANSMISSION_URL),
            username: get_env("TRANSMISSION_USER").unwrap_or_default(),
            password: get_env("TRANSMISSION_PASS").unwrap_or_default(),
        }
    }

    /// Basic auth credentials, when a username is configured
    pub fn basic_auth(&self) -> Option<(&str, &str)> {
        if self.username.is_empty() {
            None
        } else {
            Some((self.username.as_str(), self.password.as_str()))
        }
    }

    /// Join `path` onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), path)
    }
}

impl Default for TransmissionConfig {
    fn default() -> Self {
        Self {
            url: defaults::TRANSMISSION_URL.to_string(),
            username: String::new(),
            password: String::new(),
        }
    }
}

/// In-cluster default base URLs
pub mod defaults {
    /// Plex
    pub const PLEX_URL: &str = "http://plex.media:32400";
    /// Tautulli
    pub const TAUTULLI_URL: &str = "http://tautulli.media:8181";
    /// Radarr
    pub const RADARR_URL: &str = "http://radarr.arr-stack:7878";
    /// Sonarr
    pub const SONARR_URL: &str = "http://sonarr.arr-stack:8989";
    /// Readarr
    pub const READARR_URL: &str = "http://readarr.arr-stack:8787";
    /// Lidarr
    pub const LIDARR_URL: &str = "http://lidarr.arr-stack:8686";
    /// Bazarr
    pub const BAZARR_URL: &str = "http://bazarr.arr-stack:6767";
    /// Jackett
    pub const JACKETT_URL: &str = "http://jackett.download:9117";
    /// Transmission (behind gluetun)
    pub const TRANSMISSION_URL: &str = "http://gluetun-transmission.download:9091";
    /// Argo CD
    pub const ARGO_URL: &str = "http://argocd-server.argocd:8080";
}

/// Full monitor configuration, read-only after load
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Plex (token required)
    pub plex: ServiceConfig,
    /// Tautulli (API key optional)
    pub tautulli: ServiceConfig,
    /// Radarr
    pub radarr: ServiceConfig,
    /// Sonarr
    pub sonarr: ServiceConfig,
    /// Readarr (probed only when an API key is set)
    pub readarr: ServiceConfig,
    /// Lidarr
    pub lidarr: ServiceConfig,
    /// Bazarr
    pub bazarr: ServiceConfig,
    /// Jackett (API key optional)
    pub jackett: ServiceConfig,
    /// Transmission
    pub transmission: TransmissionConfig,
    /// Argo CD (token optional)
    pub argocd: ServiceConfig,
    /// Sleep between collection cycles
    pub collect_interval: Duration,
    /// Per-request timeout for probes; `None` means no explicit timeout
    pub probe_timeout: Option<Duration>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            plex: ServiceConfig::new(defaults::PLEX_URL, ""),
            tautulli: ServiceConfig::new(defaults::TAUTULLI_URL, ""),
            radarr: ServiceConfig::new(defaults::RADARR_URL, ""),
            sonarr: ServiceConfig::new(defaults::SONARR_URL, ""),
            readarr: ServiceConfig::new(defaults::READARR_URL, ""),
            lidarr: ServiceConfig::new(defaults::LIDARR_URL, ""),
            bazarr: ServiceConfig::new(defaults::BAZARR_URL, ""),
            jackett: ServiceConfig::new(defaults::JACKETT_URL, ""),
            transmission: TransmissionConfig::default(),
            argocd: ServiceConfig::new(defaults::ARGO_URL, ""),
            collect_interval: Duration::from_secs(DEFAULT_COLLECT_INTERVAL_SECS),
            probe_timeout: Some(Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS)),
        }
    }
}

impl MonitorConfig {
    /// Load the configuration from environment variables
    pub fn from_env() -> Self {
        let interval_secs =
            get_env_parse("MONITOR_COLLECT_INTERVAL_SECS", DEFAULT_COLLECT_INTERVAL_SECS);
        let timeout_secs = get_env_parse("MONITOR_PROBE_TIMEOUT_SECS", DEFAULT_PROBE_TIMEOUT_SECS);

        Self {
            plex: ServiceConfig::from_env("PLEX_URL", defaults::PLEX_URL, "PLEX_TOKEN"),
            tautulli: ServiceConfig::from_env(
                "TAUTULLI_URL",
                defaults::TAUTULLI_URL,
                "TAUTULLI_API_KEY",
            ),
            radarr: ServiceConfig::from_env("RADARR_URL", defaults::RADARR_URL, "RADARR_API_KEY"),
            sonarr: ServiceConfig::from_env("SONARR_URL", defaults::SONARR_URL, "SONARR_API_KEY"),
            readarr: ServiceConfig::from_env(
                "READARR_URL",
                defaults::READARR_URL,
                "READARR_API_KEY",
            ),
            lidarr: ServiceConfig::from_env("LIDARR_URL", defaults::LIDARR_URL, "LIDARR_API_KEY"),
            bazarr: ServiceConfig::from_env("BAZARR_URL", defaults::BAZARR_URL, "BAZARR_API_KEY"),
            jackett: ServiceConfig::from_env(
                "JACKETT_URL",
                defaults::JACKETT_URL,
                "JACKETT_API_KEY",
            ),
            transmission: TransmissionConfig::from_env(),
            argocd: ServiceConfig::from_env("ARGO_URL", defaults::ARGO_URL, "ARGO_TOKEN"),
            collect_interval: Duration::from_secs(interval_secs),
            probe_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        }
    }

    /// Reject settings the collector cannot run with
    pub fn validate(&self) -> MonitorResult<()> {
        if self.collect_interval.is_zero() {
            return Err(MonitorError::Config(
                "collect interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
