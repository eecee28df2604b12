//! Document catalog lookups used by the back office.
//!
//! The catalog itself is written by the public-facing document editor; the
//! admin screens only need existence checks and a few listings, plus a
//! creation helper used when seeding.

use crate::{
    entities::{Document, document},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Finds a document by its unique ID.
pub async fn get_document_by_id(
    db: &DatabaseConnection,
    document_id: i64,
) -> Result<Option<document::Model>> {
    Document::find_by_id(document_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a document by id, treating absence as an error.
///
/// This is the existence check the add-featured path runs before touching the
/// featured list.
pub async fn require_document(
    db: &DatabaseConnection,
    document_id: i64,
) -> Result<document::Model> {
    get_document_by_id(db, document_id)
        .await?
        .ok_or(Error::DocumentNotFound { id: document_id })
}

/// Finds a document by its slug.
pub async fn get_document_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<document::Model>> {
    Document::find()
        .filter(document::Column::Slug.eq(slug))
        .one(db)
        .await
        .map_err(Into::into)
}

/// All non-template documents, newest first.
pub async fn get_all_documents(db: &DatabaseConnection) -> Result<Vec<document::Model>> {
    Document::find()
        .filter(document::Column::IsTemplate.eq(false))
        .order_by_desc(document::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a new document, performing input validation.
///
/// Titles and slugs are trimmed; both must be non-empty.
pub async fn create_document(
    db: &DatabaseConnection,
    title: String,
    slug: String,
    is_template: bool,
) -> Result<document::Model> {
    if title.trim().is_empty() {
        return Err(Error::Config {
            message: "Document title cannot be empty".to_string(),
        });
    }
    if slug.trim().is_empty() {
        return Err(Error::Config {
            message: "Document slug cannot be empty".to_string(),
        });
    }

    let now = Utc::now().naive_utc();
    let document = document::ActiveModel {
        title: Set(title.trim().to_string()),
        slug: Set(slug.trim().to_string()),
        is_template: Set(is_template),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = document.insert(db).await?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_document_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_document(&db, String::new(), "slug".to_string(), false).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let result = create_document(&db, "Title".to_string(), "  ".to_string(), false).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_find_document() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_document(
            &db,
            "Clean Air Act".to_string(),
            "clean-air-act".to_string(),
            false,
        )
        .await?;
        assert_eq!(created.title, "Clean Air Act");
        assert!(!created.is_template);

        let by_id = get_document_by_id(&db, created.id).await?;
        assert_eq!(by_id.unwrap().id, created.id);

        let by_slug = get_document_by_slug(&db, "clean-air-act").await?;
        assert_eq!(by_slug.unwrap().id, created.id);

        let missing = get_document_by_id(&db, 9999).await?;
        assert!(missing.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_require_document_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = require_document(&db, 42).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::DocumentNotFound { id: 42 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_documents_excludes_templates() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_document(&db, "Public Document").await?;
        create_document(
            &db,
            "Starter Template".to_string(),
            "starter-template".to_string(),
            true,
        )
        .await?;

        let documents = get_all_documents(&db).await?;
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].title, "Public Document");

        Ok(())
    }
}
