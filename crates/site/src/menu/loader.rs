//! Background menu fetch.

use tracing::{error, info};

use super::{MenuCatalog, MenuClient};

/// Spawn a background task that fetches the menu once.
///
/// The catalog stays in the loading state until the task settles it, either
/// with the fetched items or as unavailable.
pub fn load_menu_async(catalog: MenuCatalog, client: MenuClient) -> tokio::task::JoinHandle<()> {
    info!(url = %client.url(), "Spawning background menu fetch task");
    tokio::spawn(async move {
        match client.fetch_menu().await {
            Ok(items) => {
                let count = items.len();
                if catalog.publish(items) {
                    info!(count, "Menu is now ready and serving requests");
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch menu");
                sentry::capture_error(&e);
                catalog.mark_unavailable();
            }
        }
    })
}
