//! HTTP route handlers for the catalog.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Catalog page (optional ?search=&category=&sort=)
//! GET  /grid             - Grid fragment for the same query parameters
//! GET  /products.json    - Active product list
//! GET  /ws               - Live session (WebSocket)
//! GET  /health           - Health check
//! ```

pub mod catalog;
pub mod ws;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create all routes for the catalog.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .route("/grid", get(catalog::grid))
        .route("/products.json", get(catalog::products_json))
        .route("/ws", get(ws::ws_handler))
}
