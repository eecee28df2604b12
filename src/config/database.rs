//! Database configuration module for the back office.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary
//! tables based on the entity definitions. The module uses `SeaORM`'s
//! `Schema::create_table_from_entity` method to automatically generate SQL statements
//! from the entity models, ensuring that the database schema matches the Rust struct
//! definitions without requiring manual SQL.

use crate::entities::{Document, Setting, SiteConfig, Sponsor, User};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/agora_admin.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL`
/// environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
/// This function handles connection errors and provides a clean interface for database
/// access throughout the application.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from
/// entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate proper
/// SQL statements for table creation, ensuring the database schema matches the Rust
/// struct definitions. It creates tables for documents, settings, site config
/// overrides, sponsors, and users.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let document_table = schema.create_table_from_entity(Document);
    let setting_table = schema.create_table_from_entity(Setting);
    let site_config_table = schema.create_table_from_entity(SiteConfig);
    let sponsor_table = schema.create_table_from_entity(Sponsor);
    let user_table = schema.create_table_from_entity(User);

    db.execute(builder.build(&document_table)).await?;
    db.execute(builder.build(&setting_table)).await?;
    db.execute(builder.build(&site_config_table)).await?;
    db.execute(builder.build(&sponsor_table)).await?;
    db.execute(builder.build(&user_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        document::Model as DocumentModel, setting::Model as SettingModel,
        site_config::Model as SiteConfigModel, sponsor::Model as SponsorModel,
        user::Model as UserModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_connection() -> Result<()> {
        // Use in-memory database for testing to avoid schema conflicts with existing database
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that we can execute a query to verify the connection is working
        let _: Vec<DocumentModel> = Document::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<DocumentModel> = Document::find().limit(1).all(&db).await?;
        let _: Vec<SettingModel> = Setting::find().limit(1).all(&db).await?;
        let _: Vec<SiteConfigModel> = SiteConfig::find().limit(1).all(&db).await?;
        let _: Vec<SponsorModel> = Sponsor::find().limit(1).all(&db).await?;
        let _: Vec<UserModel> = User::find().limit(1).all(&db).await?;

        Ok(())
    }
}
