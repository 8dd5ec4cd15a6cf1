//! Page-session cart registry.
//!
//! Every full page load mints a fresh [`PageSessionId`] and the page carries
//! it on each cart request. A reload therefore starts from an empty cart;
//! nothing outlives the page that created it. Carts that go idle are evicted
//! by `moka` after the configured timeout.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use moka::future::Cache;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use trattoria_core::Cart;
use uuid::Uuid;

use crate::config::CartSessionConfig;

/// Identifier of one page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageSessionId(Uuid);

impl PageSessionId {
    /// Generate a new random ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PageSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PageSessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A cart shared between concurrent requests of the same page session.
pub type SharedCart = Arc<Mutex<Cart>>;

/// In-memory carts keyed by page session.
///
/// Cheaply cloneable. Each cart sits behind its own lock, so requests from
/// different pages never contend.
#[derive(Clone)]
pub struct CartSessions {
    carts: Cache<PageSessionId, SharedCart>,
}

impl CartSessions {
    /// Create an empty registry.
    #[must_use]
    pub fn new(config: &CartSessionConfig) -> Self {
        let carts = Cache::builder()
            .max_capacity(config.capacity)
            .time_to_idle(config.idle_timeout)
            .build();

        Self { carts }
    }

    /// Get the cart for `id`, creating an empty one if needed.
    pub async fn get_or_create(&self, id: PageSessionId) -> SharedCart {
        self.carts
            .get_with(id, async { Arc::new(Mutex::new(Cart::new())) })
            .await
    }

    /// Get the cart for `id` if the page session is live.
    pub async fn get(&self, id: &PageSessionId) -> Option<SharedCart> {
        self.carts.get(id).await
    }

    /// Snapshot of the cart for `id`; empty for unknown sessions.
    pub async fn snapshot(&self, id: &PageSessionId) -> Cart {
        match self.get(id).await {
            Some(cart) => cart.lock().await.clone(),
            None => Cart::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use rust_decimal::Decimal;
    use trattoria_core::MenuItemId;

    use super::*;

    fn registry() -> CartSessions {
        CartSessions::new(&CartSessionConfig {
            idle_timeout: Duration::from_secs(60),
            capacity: 100,
        })
    }

    #[test]
    fn test_page_session_id_parse() {
        let id = PageSessionId::generate();
        let parsed: PageSessionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);

        assert!("not-a-session".parse::<PageSessionId>().is_err());
    }

    #[test]
    fn test_page_session_ids_are_unique() {
        assert_ne!(PageSessionId::generate(), PageSessionId::generate());
    }

    #[tokio::test]
    async fn test_unknown_session_is_empty() {
        let sessions = registry();
        let id = PageSessionId::generate();

        assert!(sessions.get(&id).await.is_none());
        assert!(sessions.snapshot(&id).await.is_empty());
    }

    #[tokio::test]
    async fn test_get_or_create_returns_same_cart() {
        let sessions = registry();
        let id = PageSessionId::generate();

        {
            let cart = sessions.get_or_create(id).await;
            cart.lock()
                .await
                .add_item(MenuItemId::from("1"), "Pizza", Decimal::new(95, 1), "")
                .unwrap();
        }

        let again = sessions.get_or_create(id).await;
        assert_eq!(again.lock().await.len(), 1);
        assert_eq!(sessions.snapshot(&id).await.totals().total_item_count, 1);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let sessions = registry();
        let first = PageSessionId::generate();
        let second = PageSessionId::generate();

        sessions
            .get_or_create(first)
            .await
            .lock()
            .await
            .add_item(MenuItemId::from("1"), "Pizza", Decimal::new(95, 1), "")
            .unwrap();

        assert!(sessions.snapshot(&second).await.is_empty());
    }
}
