//! Application state shared across handlers.

use std::sync::Arc;

use crate::carts::CartSessions;
use crate::config::SiteConfig;
use crate::menu::{MenuCatalog, MenuClient, MenuError, load_menu_async};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the menu snapshot, the page-session carts and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    menu_client: MenuClient,
    catalog: MenuCatalog,
    carts: CartSessions,
}

impl AppState {
    /// Create a new application state with the menu still loading.
    ///
    /// # Errors
    ///
    /// Returns an error if the menu HTTP client cannot be built.
    pub fn new(config: SiteConfig) -> Result<Self, MenuError> {
        let menu_client = MenuClient::new(&config.menu)?;
        Ok(Self::with_catalog(config, menu_client, MenuCatalog::new()))
    }

    /// Create application state around an existing catalog.
    #[must_use]
    pub fn with_catalog(config: SiteConfig, menu_client: MenuClient, catalog: MenuCatalog) -> Self {
        let carts = CartSessions::new(&config.cart_sessions);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                menu_client,
                catalog,
                carts,
            }),
        }
    }

    /// Start the one-shot background menu fetch.
    pub fn start_menu_fetch(&self) -> tokio::task::JoinHandle<()> {
        load_menu_async(self.inner.catalog.clone(), self.inner.menu_client.clone())
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the menu snapshot.
    #[must_use]
    pub fn catalog(&self) -> &MenuCatalog {
        &self.inner.catalog
    }

    /// Get a reference to the page-session cart registry.
    #[must_use]
    pub fn carts(&self) -> &CartSessions {
        &self.inner.carts
    }
}
