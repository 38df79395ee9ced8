//! Integration tests for Showcase.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p showcase-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_http` - page, fragment and JSON routes through the router
//! - `catalog_ws` - live sessions over a real WebSocket
//!
//! Servers bind to `127.0.0.1:0`; nothing outside the process is required.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use showcase_storefront::catalog::{CatalogContext, ProductSource};
use showcase_storefront::config::CatalogConfig;
use showcase_storefront::state::AppState;

/// The storefront crate directory.
#[must_use]
pub fn storefront_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront")
}

/// Configuration pointing at the storefront's bundled assets.
///
/// `prerendered_grid` is relative to the storefront's `static/` directory.
#[must_use]
pub fn test_config(prerendered_grid: Option<&str>) -> CatalogConfig {
    let static_dir = storefront_dir().join("static");
    CatalogConfig {
        products_source: ProductSource::File(static_dir.join("products.json")),
        prerendered_grid: prerendered_grid.map(|path| static_dir.join(path)),
        static_dir,
        load_timeout: Duration::from_secs(2),
        search_debounce: Duration::from_millis(50),
        ..CatalogConfig::default()
    }
}

/// Build application state the way the binary does.
pub async fn test_state(config: CatalogConfig) -> AppState {
    let catalog = CatalogContext::initialize(&config, &reqwest::Client::new()).await;
    AppState::new(config, catalog)
}

/// Serve the app on an ephemeral port and return its address.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound.
pub async fn spawn_server(state: AppState) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = showcase_storefront::app(state);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(addr)
}
