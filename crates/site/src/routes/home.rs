//! Home page route handler.
//!
//! The whole site is one page: navigation, hero, about, menu cards, stats,
//! contact and the cart panel. Each load mints a new page session, so a
//! reload always starts with an empty cart.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::carts::PageSessionId;
use crate::filters;
use crate::middleware::CspNonce;
use crate::routes::cart::CartView;
use crate::routes::menu::MenuView;
use crate::state::AppState;

/// A section link in the navigation bar.
#[derive(Clone)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

/// Navigation links, top of page first. `#` is the home link.
const NAV_LINKS: [NavLink; 4] = [
    NavLink {
        label: "Home",
        href: "#",
    },
    NavLink {
        label: "About",
        href: "#about",
    },
    NavLink {
        label: "Menu",
        href: "#menu",
    },
    NavLink {
        label: "Contact",
        href: "#contact",
    },
];

/// A count-up figure in the stats section.
#[derive(Clone)]
pub struct StatView {
    pub label: &'static str,
    pub target: u64,
}

/// Figures shown in the stats section.
fn stats() -> Vec<StatView> {
    vec![
        StatView {
            label: "Years of family recipes",
            target: 35,
        },
        StatView {
            label: "Dishes on the menu",
            target: 48,
        },
        StatView {
            label: "Guests served each week",
            target: 1200,
        },
        StatView {
            label: "Awards",
            target: 6,
        },
    ]
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Page session the cart requests carry.
    pub page: String,
    /// CSP nonce for the inline boot script.
    pub nonce: String,
    /// Module the boot script imports.
    pub bundle: &'static str,
    pub nav_links: Vec<NavLink>,
    pub menu: MenuView,
    pub cart: CartView,
    pub stats: Vec<StatView>,
}

/// Display the home page.
#[instrument(skip(state, nonce))]
pub async fn home(State(state): State<AppState>, nonce: CspNonce) -> impl IntoResponse {
    let page = PageSessionId::generate();
    tracing::debug!(%page, "Minted page session");

    HomeTemplate {
        page: page.to_string(),
        nonce: nonce.0,
        bundle: crate::WEB_BUNDLE_PATH,
        nav_links: NAV_LINKS.to_vec(),
        menu: MenuView::from(&state.catalog().snapshot()),
        cart: CartView::empty(),
        stats: stats(),
    }
}
