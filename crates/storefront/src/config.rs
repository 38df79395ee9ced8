//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SHOWCASE_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOWCASE_PORT` - Listen port (default: 3000)
//! - `SHOWCASE_PRODUCTS_SOURCE` - Product list URL or file path
//!   (default: `crates/storefront/static/products.json`)
//! - `SHOWCASE_PRERENDERED_GRID` - XHTML grid fragment; when set and readable
//!   the page runs markup-driven
//! - `SHOWCASE_STATIC_DIR` - Directory served under `/static`
//!   (default: `crates/storefront/static`)
//! - `SHOWCASE_LOAD_TIMEOUT_MS` - Product load timeout (default: 10000)
//! - `SHOWCASE_SEARCH_DEBOUNCE_MS` - Search input quiet period (default: 250)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::catalog::ProductSource;

const DEFAULT_PRODUCTS_SOURCE: &str = "crates/storefront/static/products.json";
const DEFAULT_STATIC_DIR: &str = "crates/storefront/static";
const DEFAULT_LOAD_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 250;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog server configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Where the product list is read from
    pub products_source: ProductSource,
    /// Optional pre-rendered grid fragment
    pub prerendered_grid: Option<PathBuf>,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Upper bound on the product load
    pub load_timeout: Duration,
    /// Quiet period before a search pass runs
    pub search_debounce: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            products_source: ProductSource::parse(DEFAULT_PRODUCTS_SOURCE),
            prerendered_grid: None,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            load_timeout: Duration::from_millis(DEFAULT_LOAD_TIMEOUT_MS),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let host = env
            .or_default("SHOWCASE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOWCASE_HOST".to_string(), e.to_string()))?;
        let port = env
            .or_default("SHOWCASE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOWCASE_PORT".to_string(), e.to_string()))?;

        let products_source =
            ProductSource::parse(&env.or_default("SHOWCASE_PRODUCTS_SOURCE", DEFAULT_PRODUCTS_SOURCE));
        let prerendered_grid = env.optional("SHOWCASE_PRERENDERED_GRID").map(PathBuf::from);
        let static_dir = PathBuf::from(env.or_default("SHOWCASE_STATIC_DIR", DEFAULT_STATIC_DIR));

        let load_timeout = env.millis("SHOWCASE_LOAD_TIMEOUT_MS", DEFAULT_LOAD_TIMEOUT_MS)?;
        let search_debounce = env.millis("SHOWCASE_SEARCH_DEBOUNCE_MS", DEFAULT_SEARCH_DEBOUNCE_MS)?;

        Ok(Self {
            host,
            port,
            products_source,
            prerendered_grid,
            static_dir,
            load_timeout,
            search_debounce,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<'a, F>(&'a F);

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    /// Get an optional variable; blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Get a millisecond duration with a default value.
    fn millis(&self, key: &str, default: u64) -> Result<Duration, ConfigError> {
        let Some(raw) = self.optional(key) else {
            return Ok(Duration::from_millis(default));
        };
        raw.trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}
