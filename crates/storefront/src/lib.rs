//! Showcase storefront library.
//!
//! A filterable, sortable product catalog served over HTTP. The server keeps
//! one page document per connected tab and drives it over a WebSocket: the
//! browser forwards control events, the server runs the filter/sort pipeline
//! and sends back either a rebuilt grid or visibility/order instructions.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod page;
pub mod protocol;
pub mod render;
pub mod routes;
pub mod session;
pub mod state;

use axum::extract::OriginalUri;
use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use error::AppError;
use state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config().static_dir.clone();

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(&static_dir))
        .nest_service("/images", ServeDir::new(static_dir.join("images")))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::{CatalogContext, ProductStore};
    use crate::config::CatalogConfig;
    use crate::page::Page;

    fn test_app() -> Router {
        let catalog = CatalogContext::new(ProductStore::fallback(), Page::default());
        app(AppState::new(CatalogConfig::default(), catalog))
    }

    async fn get(uri: &str) -> (StatusCode, String) {
        let response = test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        assert_eq!(get("/health").await, (StatusCode::OK, "ok".to_string()));
    }

    #[tokio::test]
    async fn test_fallback_catalog_page() {
        let (status, body) = get("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Showing 6 products"));
        assert!(body.contains(r#"<span class="stock out-of-stock">Out of stock</span>"#));
        assert!(body.contains(r#"<span class="stock in-stock">12 in stock</span>"#));
        assert!(body.contains("★ 4"));
    }

    #[tokio::test]
    async fn test_not_found() {
        let (status, _) = get("/checkout").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
