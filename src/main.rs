//! Back-office bootstrap: prepares the database and configuration the web
//! handlers run against. Creates the schema if needed and primes the site
//! configuration overlay cache.

use agora_admin::{cache, config, errors::Result};
use dotenvy::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load compiled site defaults from config.toml
    let defaults = match config::site::load_default_config() {
        Ok(loaded) => loaded.site,
        Err(e) => {
            warn!("No usable config.toml ({e}); continuing with built-in defaults.");
            config::site::SiteDefaults::default()
        }
    };

    // 4. Initialize database
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database tables ready."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Prime the settings overlay cache
    let overlay = cache::new_site_overlay_cache();
    cache::refresh_site_overlay_cache(&db, &defaults, &overlay).await?;

    info!("Back office ready.");
    Ok(())
}
