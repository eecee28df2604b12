//! Site configuration overlay cache.
//!
//! Request handlers read effective settings on every page render; rather than
//! re-merging defaults and overrides each time, the merged view is kept in a
//! shared read/write cell and recomputed after every settings write.

use crate::config::site::SiteDefaults;
use crate::core::settings::load_site_overlay;
use crate::errors::Result;
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Shared handle to the effective site configuration.
pub type SiteOverlayCache = Arc<RwLock<HashMap<String, String>>>;

/// Creates an empty cache; call [`refresh_site_overlay_cache`] to populate it.
#[must_use]
pub fn new_site_overlay_cache() -> SiteOverlayCache {
    Arc::new(RwLock::new(HashMap::new()))
}

/// Recomputes the merged defaults-plus-overrides view and swaps it into the cache.
pub async fn refresh_site_overlay_cache(
    db: &DatabaseConnection,
    defaults: &SiteDefaults,
    cache: &SiteOverlayCache,
) -> Result<()> {
    info!("Refreshing site configuration overlay cache...");
    let overlay = load_site_overlay(db, defaults).await?;

    let mut cache_writer = cache.write().await;
    *cache_writer = overlay;

    info!(
        "Overlay cache refreshed with {} effective settings.",
        cache_writer.len()
    );
    debug!("Overlay cache now contains: {:?}", cache_writer);
    Ok(())
}

/// Effective value for one key from the cached overlay.
pub async fn cached_setting(cache: &SiteOverlayCache, key: &str) -> Option<String> {
    cache.read().await.get(key).cloned()
}
