//! Integration tests for Trattoria.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p trattoria-integration-tests
//! ```
//!
//! Nothing external is required. Each test starts a stub upstream menu
//! service and the real site router on ephemeral local ports.
//!
//! # Test Categories
//!
//! - `router` - Handler behavior through `tower::ServiceExt::oneshot`
//! - `site_flow` - End-to-end page and cart flows over HTTP

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::Value;
use tokio::net::TcpListener;
use trattoria_site::config::{ConfigError, SiteConfig};
use trattoria_site::state::AppState;
use url::Url;

/// Canned behavior of the stub menu service.
#[derive(Clone)]
struct StubBehavior {
    /// Requests answered with 503 before the body is served.
    failures: usize,
    /// Status served once the failures are used up.
    status: StatusCode,
    body: Value,
    hits: Arc<AtomicUsize>,
}

/// A stub upstream `GET /api/menu` endpoint.
pub struct MenuStub {
    pub url: Url,
    hits: Arc<AtomicUsize>,
}

impl MenuStub {
    /// Serve `body` with 200 on every request.
    pub async fn serving(body: Value) -> Self {
        Self::spawn(0, StatusCode::OK, body).await
    }

    /// Answer 503 `failures` times, then serve `body`.
    pub async fn flaky(failures: usize, body: Value) -> Self {
        Self::spawn(failures, StatusCode::OK, body).await
    }

    /// Answer every request with `status`.
    pub async fn failing(status: StatusCode) -> Self {
        Self::spawn(0, status, Value::Null).await
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    async fn spawn(failures: usize, status: StatusCode, body: Value) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let behavior = StubBehavior {
            failures,
            status,
            body,
            hits: Arc::clone(&hits),
        };

        let app = Router::new()
            .route("/api/menu", get(serve_menu))
            .with_state(behavior);
        let base = serve(app).await;
        let url = base.join("/api/menu").unwrap_or(base);

        Self { url, hits }
    }
}

async fn serve_menu(State(stub): State<StubBehavior>) -> impl IntoResponse {
    let attempt = stub.hits.fetch_add(1, Ordering::SeqCst);
    if attempt < stub.failures {
        return (StatusCode::SERVICE_UNAVAILABLE, Json(Value::Null));
    }
    (stub.status, Json(stub.body.clone()))
}

/// Bind an ephemeral port, serve `app` on it and return its base URL.
///
/// # Panics
///
/// Panics if no local port can be bound.
pub async fn serve(app: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap_or_else(|e| panic!("failed to bind test listener: {e}"));
    let addr = listener
        .local_addr()
        .unwrap_or_else(|e| panic!("failed to read test listener address: {e}"));

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Url::parse(&format!("http://{addr}"))
        .unwrap_or_else(|e| panic!("invalid test server URL: {e}"))
}

/// Site configuration pointing at `menu_url`, tuned for fast tests.
///
/// # Errors
///
/// Returns `ConfigError` if the generated values do not validate.
pub fn test_config(menu_url: &Url) -> Result<SiteConfig, ConfigError> {
    let vars: HashMap<&str, String> = HashMap::from([
        ("MENU_API_URL", menu_url.to_string()),
        ("MENU_FETCH_TIMEOUT_SECS", "2".to_string()),
        ("MENU_FETCH_ATTEMPTS", "3".to_string()),
        ("MENU_FETCH_BACKOFF_MS", "10".to_string()),
        ("SITE_PORT", "0".to_string()),
    ]);
    SiteConfig::from_lookup(|key| vars.get(key).cloned())
}

/// Application state with the menu fetch already settled.
///
/// # Panics
///
/// Panics if the configuration or the HTTP client cannot be built.
pub async fn settled_state(menu_url: &Url) -> AppState {
    let config = test_config(menu_url).unwrap_or_else(|e| panic!("invalid test config: {e}"));
    let state = AppState::new(config).unwrap_or_else(|e| panic!("failed to build state: {e}"));
    state
        .start_menu_fetch()
        .await
        .unwrap_or_else(|e| panic!("menu fetch task failed: {e}"));
    state
}

/// A running site plus an HTTP client.
pub struct TestSite {
    pub base_url: Url,
    pub client: reqwest::Client,
    pub state: AppState,
}

impl TestSite {
    /// Start the site against `menu_url` once its menu fetch has settled.
    pub async fn start(menu_url: &Url) -> Self {
        let state = settled_state(menu_url).await;
        let base_url = serve(trattoria_site::app(state.clone())).await;

        Self {
            base_url,
            client: reqwest::Client::new(),
            state,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Load the home page and return its HTML.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn home(&self) -> String {
        self.client
            .get(self.url("/"))
            .send()
            .await
            .unwrap_or_else(|e| panic!("GET / failed: {e}"))
            .text()
            .await
            .unwrap_or_else(|e| panic!("GET / body failed: {e}"))
    }

    /// Load the home page and return the page session it minted.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the page has no session.
    pub async fn new_page_session(&self) -> String {
        page_session(&self.home().await)
            .unwrap_or_else(|| panic!("home page carries no page session"))
    }

    /// `POST` a cart form.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn post_cart(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .unwrap_or_else(|e| panic!("POST {path} failed: {e}"))
    }

    /// `GET` a cart fragment for `page` and return its body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn get_cart(&self, path: &str, page: &str) -> String {
        self.client
            .get(format!("{}?page={page}", self.url(path)))
            .send()
            .await
            .unwrap_or_else(|e| panic!("GET {path} failed: {e}"))
            .text()
            .await
            .unwrap_or_else(|e| panic!("GET {path} body failed: {e}"))
    }
}

/// Extract the `data-page` session ID from a rendered home page.
#[must_use]
pub fn page_session(html: &str) -> Option<String> {
    const MARKER: &str = "data-page=\"";
    let start = html.find(MARKER)? + MARKER.len();
    let end = html.get(start..)?.find('"')? + start;
    html.get(start..end).map(String::from)
}

/// Text of the cart count badge in a fragment.
#[must_use]
pub fn badge_count(html: &str) -> Option<u32> {
    const MARKER: &str = "id=\"cart-count\"";
    let tag = html.get(html.find(MARKER)?..)?;
    let start = tag.find('>')? + 1;
    let end = tag.find("</span>")?;
    tag.get(start..end)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_session_extraction() {
        let html = r#"<body data-page="0b6c" hx-vals='{}'>"#;
        assert_eq!(page_session(html).as_deref(), Some("0b6c"));
        assert!(page_session("<body>").is_none());
    }

    #[test]
    fn test_badge_count_extraction() {
        let html = r#"<span id="cart-count" class="cart-item-count" hx-get="/cart/count">3</span>"#;
        assert_eq!(badge_count(html), Some(3));
    }
}
