//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MENU_API_URL` - Upstream menu endpoint (e.g., `https://kitchen.example.com/api/menu`)
//!
//! ## Optional
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 3000)
//! - `SITE_STATIC_DIR` - Static asset directory (default: crates/site/static)
//! - `MENU_FETCH_TIMEOUT_SECS` - Per-attempt timeout for the menu fetch (default: 10)
//! - `MENU_FETCH_ATTEMPTS` - Total menu fetch attempts (default: 3)
//! - `MENU_FETCH_BACKOFF_MS` - Delay before the second attempt, grows linearly (default: 500)
//! - `CART_SESSION_IDLE_SECS` - Idle time before a page-session cart is dropped (default: 1800)
//! - `CART_SESSION_CAPACITY` - Maximum number of live page-session carts (default: 10000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Upstream menu source
    pub menu: MenuSourceConfig,
    /// Page-session cart registry
    pub cart_sessions: CartSessionConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry transaction sample rate
    pub sentry_traces_sample_rate: f32,
}

/// Upstream menu endpoint configuration.
#[derive(Debug, Clone)]
pub struct MenuSourceConfig {
    /// Full URL of the `GET` endpoint returning the menu array
    pub url: Url,
    /// Timeout for one attempt
    pub timeout: Duration,
    /// Total attempts, at least 1
    pub attempts: u32,
    /// Base delay between attempts; attempt `n` waits `n * backoff`
    pub backoff: Duration,
}

/// Page-session cart registry configuration.
#[derive(Debug, Clone, Copy)]
pub struct CartSessionConfig {
    /// Carts untouched for this long are dropped
    pub idle_timeout: Duration,
    /// Upper bound on live carts
    pub capacity: u64,
}

impl Default for CartSessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(1800),
            capacity: 10_000,
        }
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let host = env.parse_or("SITE_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = env.parse_or("SITE_PORT", 3000_u16)?;
        let static_dir = env
            .optional("SITE_STATIC_DIR")
            .map_or_else(|| PathBuf::from("crates/site/static"), PathBuf::from);

        let menu = MenuSourceConfig::from_env(&env)?;
        let cart_sessions = CartSessionConfig::from_env(&env)?;

        let sentry_dsn = env.optional("SENTRY_DSN");
        let sentry_environment = env.optional("SENTRY_ENVIRONMENT");
        let sentry_traces_sample_rate = env.parse_or("SENTRY_TRACES_SAMPLE_RATE", 0.0_f32)?;

        Ok(Self {
            host,
            port,
            static_dir,
            menu,
            cart_sessions,
            sentry_dsn,
            sentry_environment,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl MenuSourceConfig {
    fn from_env(env: &Env<'_>) -> Result<Self, ConfigError> {
        let raw_url = env.required("MENU_API_URL")?;
        let url = parse_menu_url(&raw_url)
            .map_err(|reason| ConfigError::InvalidEnvVar("MENU_API_URL".to_string(), reason))?;

        let attempts = env.parse_or("MENU_FETCH_ATTEMPTS", 3_u32)?;
        if attempts == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "MENU_FETCH_ATTEMPTS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            url,
            timeout: Duration::from_secs(env.parse_or("MENU_FETCH_TIMEOUT_SECS", 10_u64)?),
            attempts,
            backoff: Duration::from_millis(env.parse_or("MENU_FETCH_BACKOFF_MS", 500_u64)?),
        })
    }
}

impl CartSessionConfig {
    fn from_env(env: &Env<'_>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            idle_timeout: Duration::from_secs(
                env.parse_or("CART_SESSION_IDLE_SECS", defaults.idle_timeout.as_secs())?,
            ),
            capacity: env.parse_or("CART_SESSION_CAPACITY", defaults.capacity)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Borrowed key lookup with typed accessors.
struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional variable. Empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}

/// Validate the upstream menu URL.
fn parse_menu_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme '{other}'")),
    }
    if url.host_str().is_none() {
        return Err("URL must have a host".to_string());
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<SiteConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        SiteConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("MENU_API_URL", "http://kitchen.local/api/menu")]).unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.menu.attempts, 3);
        assert_eq!(config.menu.timeout, Duration::from_secs(10));
        assert_eq!(config.menu.backoff, Duration::from_millis(500));
        assert_eq!(config.cart_sessions.idle_timeout, Duration::from_secs(1800));
        assert_eq!(config.cart_sessions.capacity, 10_000);
        assert_eq!(config.static_dir, PathBuf::from("crates/site/static"));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_missing_menu_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "MENU_API_URL"));
    }

    #[test]
    fn test_invalid_menu_url_scheme() {
        let err = load(&[("MENU_API_URL", "ftp://kitchen.local/menu")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[
            ("MENU_API_URL", "http://kitchen.local/api/menu"),
            ("SITE_PORT", "not-a-port"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "SITE_PORT"));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let err = load(&[
            ("MENU_API_URL", "http://kitchen.local/api/menu"),
            ("MENU_FETCH_ATTEMPTS", "0"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("MENU_API_URL", "https://kitchen.local/api/menu"),
            ("SITE_HOST", "0.0.0.0"),
            ("SITE_PORT", "8080"),
            ("MENU_FETCH_TIMEOUT_SECS", "2"),
            ("MENU_FETCH_ATTEMPTS", "5"),
            ("CART_SESSION_IDLE_SECS", "60"),
            ("SENTRY_DSN", ""),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.menu.timeout, Duration::from_secs(2));
        assert_eq!(config.menu.attempts, 5);
        assert_eq!(config.cart_sessions.idle_timeout, Duration::from_secs(60));
        // Empty values count as unset
        assert!(config.sentry_dsn.is_none());
    }
}
