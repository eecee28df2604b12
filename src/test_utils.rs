//! Shared test utilities for the back office.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config::site::SiteDefaults,
    core::{document, featured, sponsor::SponsorStatus},
    entities::{self, setting, sponsor, user},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Compiled defaults used across settings tests: a valid date format, a valid
/// time format, and no analytics property id.
#[must_use]
pub fn test_defaults() -> SiteDefaults {
    SiteDefaults {
        date_format: Some("%Y-%m-%d".to_string()),
        time_format: Some("%H:%M".to_string()),
        google_analytics_property_id: None,
    }
}

/// Creates a non-template test document; the slug is derived from the title.
pub async fn create_test_document(
    db: &DatabaseConnection,
    title: &str,
) -> Result<entities::document::Model> {
    let slug = title.to_lowercase().replace(' ', "-");
    document::create_document(db, title.to_string(), slug, false).await
}

/// Creates a template document, which public listings and the featured list exclude.
pub async fn create_template_document(
    db: &DatabaseConnection,
    title: &str,
) -> Result<entities::document::Model> {
    let slug = title.to_lowercase().replace(' ', "-");
    document::create_document(db, title.to_string(), slug, true).await
}

/// Writes the featured-order setting row directly, bypassing the add path.
/// Use this to start a test from a known order.
pub async fn seed_featured(db: &DatabaseConnection, ids: &[i64]) -> Result<()> {
    let value = ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");

    let row = setting::ActiveModel {
        meta_key: Set(featured::FEATURED_DOCUMENTS_KEY.to_string()),
        meta_value: Set(value),
        updated_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };
    row.insert(db).await?;
    Ok(())
}

/// Creates a test sponsor with the given status.
pub async fn create_test_sponsor(
    db: &DatabaseConnection,
    name: &str,
    status: SponsorStatus,
) -> Result<entities::sponsor::Model> {
    let now = Utc::now().naive_utc();
    let row = sponsor::ActiveModel {
        name: Set(name.to_string()),
        status: Set(status.as_str().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(row.insert(db).await?)
}

/// Creates a test user. The last name defaults to `"Tester"` and the admin
/// flag starts false.
pub async fn create_test_user(
    db: &DatabaseConnection,
    fname: &str,
    email: &str,
) -> Result<entities::user::Model> {
    let now = Utc::now().naive_utc();
    let row = user::ActiveModel {
        fname: Set(fname.to_string()),
        lname: Set("Tester".to_string()),
        email: Set(email.to_string()),
        is_admin: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(row.insert(db).await?)
}
