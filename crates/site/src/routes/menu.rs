//! Menu card route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;
use trattoria_core::MenuItem;

use crate::menu::MenuSnapshot;
use crate::state::AppState;

/// Menu card display data for templates.
#[derive(Clone)]
pub struct MenuCardView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: Option<String>,
    pub category: Option<String>,
}

impl From<&MenuItem> for MenuCardView {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.unit_price().display(),
            image: Some(item.image.clone()).filter(|url| !url.is_empty()),
            category: item.category.clone(),
        }
    }
}

/// Menu section display data for templates.
#[derive(Clone)]
pub struct MenuView {
    pub cards: Vec<MenuCardView>,
    pub loading: bool,
    pub unavailable: bool,
}

impl From<&MenuSnapshot> for MenuView {
    fn from(snapshot: &MenuSnapshot) -> Self {
        Self {
            cards: snapshot.items().iter().map(MenuCardView::from).collect(),
            loading: matches!(snapshot, MenuSnapshot::Loading),
            unavailable: matches!(snapshot, MenuSnapshot::Unavailable),
        }
    }
}

/// Menu cards fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/menu_cards.html")]
pub struct MenuCardsTemplate {
    pub menu: MenuView,
}

/// Menu cards fragment (HTMX).
///
/// While the menu is still loading the fragment polls this endpoint again.
#[instrument(skip(state))]
pub async fn cards(State(state): State<AppState>) -> impl IntoResponse {
    MenuCardsTemplate {
        menu: MenuView::from(&state.catalog().snapshot()),
    }
}
