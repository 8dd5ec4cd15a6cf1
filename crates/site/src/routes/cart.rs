//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every request carries the page-session ID minted by the home page; the
//! matching cart lives in [`CartSessions`](crate::carts::CartSessions).
//! Successful mutations answer with `HX-Trigger: cart-updated` so the cart
//! panel and the count badge re-render in full.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{debug, instrument};
use trattoria_core::{Cart, CartAction, CartLineItem, MenuItemId, Price};

use crate::carts::PageSessionId;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// HTMX response header that fires client-side events.
const HX_TRIGGER: &str = "HX-Trigger";

/// Event fired after every cart mutation.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: Option<String>,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&Cart::new())
    }
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let totals = cart.totals();
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            total: totals.price().display(),
            item_count: totals.total_item_count,
        }
    }
}

impl From<&CartLineItem> for CartItemView {
    fn from(line: &CartLineItem) -> Self {
        Self {
            id: line.id.to_string(),
            title: line.title.clone(),
            quantity: line.quantity(),
            price: Price::from_amount(line.unit_price).display(),
            line_price: Price::from_amount(line.line_total()).display(),
            image: Some(line.image_ref.clone()).filter(|url| !url.is_empty()),
        }
    }
}

// =============================================================================
// Request Types
// =============================================================================

/// Page session query for fragment reads.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: String,
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub page: String,
    pub id: String,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub page: String,
    pub id: String,
    pub action: CartAction,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub page: String,
    pub id: String,
}

/// Parse the page-session ID sent by the page.
fn parse_page(raw: &str) -> Result<PageSessionId> {
    raw.parse()
        .map_err(|_| AppError::BadRequest("invalid page session".to_string()))
}

// =============================================================================
// Templates
// =============================================================================

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Fragment response that tells the page the cart changed.
fn updated(fragment: impl IntoResponse) -> Response {
    (AppendHeaders([(HX_TRIGGER, CART_UPDATED_EVENT)]), fragment).into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// Add one unit of a menu item to the cart (HTMX).
///
/// Resolves the ID against the menu snapshot and starts a cart for the page
/// session if it has none. Returns the count badge.
///
/// # Errors
///
/// Returns `NotFound` if the menu has no such item, `BadRequest` for a
/// malformed page session and `Cart` if the item's price is negative.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let page = parse_page(&form.page)?;
    let id = MenuItemId::from(form.id);

    let item = state
        .catalog()
        .find(&id)
        .ok_or_else(|| AppError::NotFound(format!("menu item {id}")))?;

    let cart = state.carts().get_or_create(page).await;
    let count = {
        let mut cart = cart.lock().await;
        cart.add_menu_item(&item)?;
        cart.totals().total_item_count
    };

    add_breadcrumb("cart", "Added item", &[("id", id.as_str())]);
    debug!(%id, count, "Item added to cart");

    Ok(updated(CartCountTemplate { count }))
}

/// Increase or decrease a line's quantity (HTMX).
///
/// A decrease to zero removes the line. An unknown line or page session is a
/// no-op that re-renders the current cart.
///
/// # Errors
///
/// Returns `BadRequest` for a malformed page session.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let page = parse_page(&form.page)?;
    let id = MenuItemId::from(form.id);

    let Some(cart) = state.carts().get(&page).await else {
        return Ok(CartItemsTemplate {
            cart: CartView::empty(),
        }
        .into_response());
    };

    let mut cart = cart.lock().await;
    match cart.apply(&id, form.action) {
        Ok(()) => Ok(updated(CartItemsTemplate {
            cart: CartView::from(&*cart),
        })),
        Err(e) => {
            debug!(error = %e, "Ignoring cart update");
            Ok(CartItemsTemplate {
                cart: CartView::from(&*cart),
            }
            .into_response())
        }
    }
}

/// Remove a line from the cart (HTMX).
///
/// # Errors
///
/// Returns `BadRequest` for a malformed page session.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let page = parse_page(&form.page)?;
    let id = MenuItemId::from(form.id);

    let Some(cart) = state.carts().get(&page).await else {
        return Ok(CartItemsTemplate {
            cart: CartView::empty(),
        }
        .into_response());
    };

    let mut cart = cart.lock().await;
    let removed = cart.remove(&id);
    let fragment = CartItemsTemplate {
        cart: CartView::from(&*cart),
    };

    if removed {
        Ok(updated(fragment))
    } else {
        debug!(%id, "Ignoring removal of item not in cart");
        Ok(fragment.into_response())
    }
}

/// Get the cart items fragment (HTMX).
///
/// # Errors
///
/// Returns `BadRequest` for a malformed page session.
#[instrument(skip(state))]
pub async fn items(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<CartItemsTemplate> {
    let page = parse_page(&query.page)?;
    let cart = state.carts().snapshot(&page).await;
    Ok(CartItemsTemplate {
        cart: CartView::from(&cart),
    })
}

/// Get the cart count badge (HTMX).
///
/// # Errors
///
/// Returns `BadRequest` for a malformed page session.
#[instrument(skip(state))]
pub async fn count(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<CartCountTemplate> {
    let page = parse_page(&query.page)?;
    let count = state.carts().snapshot(&page).await.totals().total_item_count;
    Ok(CartCountTemplate { count })
}
