//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (mints a page session)
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness: 200 once the menu fetch has settled
//! GET  /menu                   - Menu cards fragment (HTMX)
//!
//! # Cart (HTMX fragments, all keyed by `page`)
//! POST /cart/add               - Add item (returns count badge, triggers cart-updated)
//! POST /cart/update            - Increase/decrease quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! GET  /cart/items             - Cart items fragment
//! GET  /cart/count             - Cart count badge (fragment)
//! ```

pub mod cart;
pub mod health;
pub mod home;
pub mod menu;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/items", get(cart::items))
        .route("/count", get(cart::count))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/menu", get(menu::cards))
        .nest("/cart", cart_routes())
}
