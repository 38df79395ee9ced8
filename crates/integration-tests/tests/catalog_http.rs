//! Integration tests for the catalog HTTP routes.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use showcase_core::{Product, ProductId, StockStatus};
use showcase_integration_tests::{test_config, test_state};
use showcase_storefront::app;
use tower::ServiceExt;

async fn get(uri: &str, grid: Option<&str>) -> (StatusCode, String) {
    let app = app(test_state(test_config(grid)).await);
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

// =============================================================================
// Data-driven page
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (status, body) = get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_index_renders_every_product() {
    let (status, body) = get("/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Showing 8 products"));
    assert!(body.contains(r#"data-mode="data-driven""#));
    assert!(body.contains("Trail Hiker Boots"));
    assert!(body.contains("₹15,999"));
    // categories in first-seen order after "all"
    let shoes = body.find(r#"<option value="shoes""#).unwrap();
    let watches = body.find(r#"<option value="watches""#).unwrap();
    let phones = body.find(r#"<option value="phones""#).unwrap();
    assert!(shoes < watches && watches < phones);
}

#[tokio::test]
async fn test_index_applies_query_filters() {
    let (status, body) = get("/?category=watches&sort=high-to-low", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Showing 3 products"));
    assert!(!body.contains("Phone Lite"));
    let smart = body.find("Smart Watch Pro").unwrap();
    let minimal = body.find("<h3>Minimal Watch</h3>").unwrap();
    let kids = body.find("<h3>Kids Sport Watch</h3>").unwrap();
    assert!(smart < minimal && minimal < kids);
    assert!(body.contains(r#"<option value="watches" selected>"#));
}

#[tokio::test]
async fn test_index_no_results() {
    let (status, body) = get("/?search=zzz-no-match", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Showing 0 products"));
    assert!(body.contains(r#"id="emptyText" class="empty" aria-hidden="false">"#));
}

#[tokio::test]
async fn test_unknown_sort_is_bad_request() {
    let (status, _) = get("/?sort=rating", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_grid_fragment() {
    let (status, body) = get("/grid?search=phone", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("<html"));
    assert_eq!(body.matches("<article").count(), 2);
}

#[tokio::test]
async fn test_missing_stock_renders_out_of_stock() {
    let (_, body) = get("/grid?search=kids", None).await;
    assert!(body.contains("Out of stock"));
    assert!(body.contains(r#"aria-disabled="true""#));
}

#[tokio::test]
async fn test_products_json() {
    let (status, body) = get("/products.json", None).await;
    assert_eq!(status, StatusCode::OK);
    let products: Vec<Product> = serde_json::from_str(&body).unwrap();
    assert_eq!(products.len(), 8);
    assert_eq!(products[4].id, ProductId::new(5));
    assert_eq!(products[4].name, "Phone Max 5G");
    assert_eq!(products[4].category.as_str(), "phones");
    // Missing stock survives the round trip as unavailable
    assert_eq!(products[7].stock, None);
    assert_eq!(products[7].stock_status(), StockStatus::Unavailable);
}

#[tokio::test]
async fn test_static_assets() {
    let (status, body) = get("/static/js/catalog.js", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("WebSocket"));
    // Acknowledgments block until the shopper dismisses them
    assert!(body.contains("window.alert(message.message)"));
    assert!(!body.contains("setTimeout(() => { notice"));

    let (status, _) = get("/images/phone-lite.svg", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (status, body) = get("/cart", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Not found: /cart");
}

// =============================================================================
// Markup-driven page
// =============================================================================

#[tokio::test]
async fn test_prerendered_page_keeps_markup_units() {
    let (status, body) = get("/?category=watches", Some("prerendered/grid.html")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"data-mode="markup-driven""#));
    assert!(body.contains("Showing 2 products"));
    assert!(body.contains(r#"<div data-key="sku-102" class="card""#));
    assert!(body.contains(r#"<div data-key="sku-101" hidden="" class="card""#));
}

#[tokio::test]
async fn test_prerendered_text_fallback_category() {
    let (_, body) = get("/grid?category=phones", Some("prerendered/grid.html")).await;
    assert!(body.contains(r#"<div data-key="sku-103" class="card""#));
    assert_eq!(body.matches(r#"hidden="""#).count(), 3);
}

#[tokio::test]
async fn test_broken_grid_falls_back_to_data_driven() {
    let (status, body) = get("/", Some("missing/grid.html")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"data-mode="data-driven""#));
    assert!(body.contains("Showing 8 products"));
}
