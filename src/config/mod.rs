/// Database configuration and connection management
pub mod database;

/// Compiled site defaults loaded from config.toml
pub mod site;
