//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::CatalogContext;
use crate::config::CatalogConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; everything inside is read-only once the
/// server is up.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: CatalogConfig,
    catalog: CatalogContext,
}

impl AppState {
    #[must_use]
    pub fn new(config: CatalogConfig, catalog: CatalogContext) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog context.
    #[must_use]
    pub fn catalog(&self) -> &CatalogContext {
        &self.inner.catalog
    }
}
