//! Restaurant menu, fetched once from the upstream menu service.
//!
//! # Architecture
//!
//! - [`MenuClient`] calls `GET {MENU_API_URL}` with a per-attempt timeout and
//!   bounded retry
//! - [`MenuCatalog`] holds the snapshot; it starts in [`MenuSnapshot::Loading`]
//! - [`load_menu_async`] runs the fetch in a background task at startup and
//!   publishes the result exactly once
//!
//! The app serves pages immediately. Until the fetch settles, the menu area
//! renders a loading state; if every attempt fails it renders an unavailable
//! state. There is no refresh afterwards.

mod client;
mod loader;

use std::sync::{Arc, RwLock};

use thiserror::Error;
use trattoria_core::{MenuItem, MenuItemId};

pub use client::MenuClient;
pub use loader::load_menu_async;

/// Errors that can occur when fetching the menu.
#[derive(Debug, Error)]
pub enum MenuError {
    /// The attempt did not complete within the configured timeout.
    #[error("Menu request timed out")]
    Timeout,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("Menu service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not a JSON array of menu items.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl MenuError {
    /// Whether another attempt might succeed.
    ///
    /// Transport failures, timeouts, 429 and 5xx are retried. A 4xx or a body
    /// that does not decode will not change on retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout | Self::Http(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Parse(_) => false,
        }
    }
}

/// Current state of the menu snapshot.
#[derive(Debug, Clone)]
pub enum MenuSnapshot {
    /// The startup fetch has not settled yet.
    Loading,
    /// The fetch succeeded. Items are in upstream order.
    Ready(Arc<[MenuItem]>),
    /// Every attempt failed.
    Unavailable,
}

impl MenuSnapshot {
    /// Items to render; empty unless ready.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        match self {
            Self::Ready(items) => items,
            Self::Loading | Self::Unavailable => &[],
        }
    }

    /// Whether the startup fetch has finished, successfully or not.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        !matches!(self, Self::Loading)
    }
}

/// Shared menu snapshot.
///
/// Starts as [`MenuSnapshot::Loading`] and is settled once by the loader task.
#[derive(Clone)]
pub struct MenuCatalog {
    inner: Arc<RwLock<MenuSnapshot>>,
}

impl Default for MenuCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuCatalog {
    /// Create a catalog in the loading state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MenuSnapshot::Loading)),
        }
    }

    /// Create a catalog that is already settled with `items`.
    #[must_use]
    pub fn ready(items: Vec<MenuItem>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(MenuSnapshot::Ready(items.into()))),
        }
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> MenuSnapshot {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Look up an item by ID in the current snapshot.
    #[must_use]
    pub fn find(&self, id: &MenuItemId) -> Option<MenuItem> {
        self.snapshot()
            .items()
            .iter()
            .find(|item| &item.id == id)
            .cloned()
    }

    /// Publish the fetched items. Returns `false` if already settled.
    pub fn publish(&self, items: Vec<MenuItem>) -> bool {
        self.settle(MenuSnapshot::Ready(items.into()))
    }

    /// Record that the fetch failed. Returns `false` if already settled.
    pub fn mark_unavailable(&self) -> bool {
        self.settle(MenuSnapshot::Unavailable)
    }

    fn settle(&self, next: MenuSnapshot) -> bool {
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if guard.is_settled() {
            tracing::warn!("Menu snapshot already settled, ignoring update");
            return false;
        }
        *guard = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn item(id: &str, name: &str) -> MenuItem {
        MenuItem {
            id: MenuItemId::from(id),
            name: name.to_string(),
            description: String::new(),
            price: Decimal::from(8),
            image: String::new(),
            category: None,
        }
    }

    #[test]
    fn test_starts_loading() {
        let catalog = MenuCatalog::new();
        let snapshot = catalog.snapshot();
        assert!(matches!(snapshot, MenuSnapshot::Loading));
        assert!(snapshot.items().is_empty());
        assert!(!snapshot.is_settled());
    }

    #[test]
    fn test_publish_once() {
        let catalog = MenuCatalog::new();

        assert!(catalog.publish(vec![item("1", "Pizza")]));
        assert!(!catalog.publish(vec![item("2", "Pasta")]));
        assert!(!catalog.mark_unavailable());

        let snapshot = catalog.snapshot();
        assert_eq!(snapshot.items().len(), 1);
        assert!(catalog.find(&MenuItemId::from("1")).is_some());
        assert!(catalog.find(&MenuItemId::from("2")).is_none());
    }

    #[test]
    fn test_unavailable_renders_empty() {
        let catalog = MenuCatalog::new();
        assert!(catalog.mark_unavailable());

        let snapshot = catalog.snapshot();
        assert!(snapshot.is_settled());
        assert!(snapshot.items().is_empty());
    }

    #[test]
    fn test_retryable_classification() {
        assert!(MenuError::Timeout.is_retryable());
        assert!(
            MenuError::Status {
                status: 503,
                body: String::new()
            }
            .is_retryable()
        );
        assert!(
            MenuError::Status {
                status: 429,
                body: String::new()
            }
            .is_retryable()
        );
        assert!(
            !MenuError::Status {
                status: 404,
                body: String::new()
            }
            .is_retryable()
        );

        let parse = serde_json::from_str::<Vec<MenuItem>>("{}").unwrap_err();
        assert!(!MenuError::Parse(parse).is_retryable());
    }

    #[test]
    fn test_status_error_display() {
        let err = MenuError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "Menu service returned HTTP 502: bad gateway");
    }
}
