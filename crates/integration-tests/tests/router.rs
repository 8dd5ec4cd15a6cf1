//! Router behavior driven in-process with `tower::ServiceExt::oneshot`.

#![allow(clippy::unwrap_used)]

use std::path::Path;

use axum::{
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use rust_decimal::Decimal;
use tower::ServiceExt;
use trattoria_core::{MenuItem, MenuItemId};
use trattoria_integration_tests::test_config;
use trattoria_site::menu::{MenuCatalog, MenuClient};
use trattoria_site::WEB_BUNDLE_PATH;
use trattoria_site::state::AppState;
use url::Url;

/// State whose menu fetch never ran; the catalog is whatever the test passes.
fn state_with(catalog: MenuCatalog) -> AppState {
    let url = Url::parse("http://127.0.0.1:9/api/menu").unwrap();
    let config = test_config(&url).unwrap();
    let client = MenuClient::new(&config.menu).unwrap();
    AppState::with_catalog(config, client, catalog)
}

/// Like [`state_with`], serving static files from `static_dir`.
fn state_serving(static_dir: &Path) -> AppState {
    let url = Url::parse("http://127.0.0.1:9/api/menu").unwrap();
    let mut config = test_config(&url).unwrap();
    config.static_dir = static_dir.to_path_buf();
    let client = MenuClient::new(&config.menu).unwrap();
    AppState::with_catalog(config, client, MenuCatalog::new())
}

fn pizza() -> MenuItem {
    serde_json::from_value(serde_json::json!({
        "id": "1",
        "name": "Pizza",
        "description": "Wood-fired margherita",
        "price": 9.5,
        "image": ""
    }))
    .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = trattoria_site::app(state_with(MenuCatalog::new()));
    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_not_ready_while_menu_loads() {
    let app = trattoria_site::app(state_with(MenuCatalog::new()));
    let response = app.oneshot(get("/health/ready")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_ready_once_menu_settles() {
    let catalog = MenuCatalog::new();
    let app = trattoria_site::app(state_with(catalog.clone()));
    catalog.mark_unavailable();

    let response = app.oneshot(get("/health/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_loading_menu_fragment_polls() {
    let app = trattoria_site::app(state_with(MenuCatalog::new()));
    let response = app.oneshot(get("/menu")).await.unwrap();

    let html = body_text(response).await;
    assert!(html.contains("menu-loading"));
    assert!(html.contains("hx-get=\"/menu\""));
}

#[tokio::test]
async fn test_ready_menu_fragment_stops_polling() {
    let app = trattoria_site::app(state_with(MenuCatalog::ready(vec![pizza()])));
    let response = app.oneshot(get("/menu")).await.unwrap();

    let html = body_text(response).await;
    assert!(html.contains("$9.50"));
    assert!(!html.contains("hx-get=\"/menu\""));
}

#[tokio::test]
async fn test_items_require_page_param() {
    let app = trattoria_site::app(state_with(MenuCatalog::new()));
    let response = app.oneshot(get("/cart/items")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_session_renders_empty_cart() {
    let app = trattoria_site::app(state_with(MenuCatalog::new()));
    let page = "6f1c2a4e-8d0b-4c1e-9a51-3b7d2e9f0a11";

    let response = app
        .oneshot(get(&format!("/cart/items?page={page}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Your cart is empty."));
    assert!(html.contains("$0.00"));
}

#[tokio::test]
async fn test_add_then_read_through_router() {
    let state = state_with(MenuCatalog::ready(vec![pizza()]));
    let app = trattoria_site::app(state.clone());
    let page = "6f1c2a4e-8d0b-4c1e-9a51-3b7d2e9f0a11";

    let response = app
        .clone()
        .oneshot(post_form("/cart/add", format!("page={page}&id=1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("hx-trigger").unwrap(),
        "cart-updated"
    );

    let cart = state.carts().snapshot(&page.parse().unwrap()).await;
    let totals = cart.totals();
    assert_eq!(totals.total_item_count, 1);
    assert_eq!(totals.price().display(), "$9.50");
    assert_eq!(
        cart.get(&MenuItemId::from("1")).map(|line| line.quantity()),
        Some(1)
    );

    let response = app
        .oneshot(get(&format!("/cart/count?page={page}")))
        .await
        .unwrap();
    assert!(body_text(response).await.contains(">1<"));
}

#[tokio::test]
async fn test_unknown_action_is_rejected() {
    let app = trattoria_site::app(state_with(MenuCatalog::ready(vec![pizza()])));
    let page = "6f1c2a4e-8d0b-4c1e-9a51-3b7d2e9f0a11";

    let response = app
        .oneshot(post_form(
            "/cart/update",
            format!("page={page}&id=1&action=double"),
        ))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_web_bundle_served_from_static_pkg() {
    let static_dir = tempfile::tempdir().unwrap();
    let pkg = static_dir.path().join("pkg");
    std::fs::create_dir_all(&pkg).unwrap();
    std::fs::write(pkg.join("trattoria_web.js"), "export default async function init() {}").unwrap();
    std::fs::write(pkg.join("trattoria_web_bg.wasm"), b"\0asm\x01\0\0\0").unwrap();
    let app = trattoria_site::app(state_serving(static_dir.path()));

    let response = app.clone().oneshot(get(WEB_BUNDLE_PATH)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers().get(CONTENT_TYPE).unwrap().to_str().unwrap();
    assert!(content_type.contains("javascript"), "{content_type}");

    let response = app
        .clone()
        .oneshot(get("/static/pkg/trattoria_web_bg.wasm"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "application/wasm");

    let html = body_text(app.oneshot(get("/")).await.unwrap()).await;
    assert!(html.contains(&format!("import init from \"{WEB_BUNDLE_PATH}\"")));
}

#[tokio::test]
async fn test_negative_price_is_not_added() {
    let mut item = pizza();
    item.price = Decimal::new(-950, 2);
    let state = state_with(MenuCatalog::ready(vec![item]));
    let app = trattoria_site::app(state.clone());
    let page = "6f1c2a4e-8d0b-4c1e-9a51-3b7d2e9f0a11";

    let response = app
        .oneshot(post_form("/cart/add", format!("page={page}&id=1")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.headers().get("hx-trigger").is_none());
    assert!(state.carts().snapshot(&page.parse().unwrap()).await.is_empty());
}
