//! Featured-documents ordering business logic.
//!
//! The featured list is a single `settings` row whose value is a comma-joined
//! sequence of document ids, highest priority first. Every mutation reads the
//! full row, reworks an owned copy of the sequence, and writes the whole value
//! back in one conditional update, so a concurrent edit surfaces as
//! [`Error::Conflict`] instead of a silently lost update.

use crate::{
    core::document,
    entities::{Document, Setting, document as document_entity, setting},
    errors::{Error, Result},
    events::Notice,
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::Expr};
use std::collections::HashMap;
use tracing::info;

/// Key of the settings row holding the featured-documents order.
pub const FEATURED_DOCUMENTS_KEY: &str = "featured-documents";

/// Reorder or removal applied to one entry of the featured list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveAction {
    /// Swap the entry with its predecessor
    Up,
    /// Swap the entry with its successor
    Down,
    /// Drop the entry, keeping the relative order of the rest
    Remove,
}

/// Ordered document ids, index 0 = highest priority.
///
/// This is the pure in-memory half of the featured-list logic: parsing,
/// reordering, and re-serialization, with no database access. The persistent
/// operations below wrap it in a read-modify-write cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeaturedList {
    ids: Vec<String>,
}

impl FeaturedList {
    /// Parses the comma-joined persisted form. Empty segments are dropped, so
    /// a blank row yields an empty list.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let ids = raw
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();
        Self { ids }
    }

    /// Re-serializes to the comma-joined persisted form.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.ids.join(",")
    }

    /// Zero-based position of `id`, or `None` when it is not featured.
    #[must_use]
    pub fn locate(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|entry| entry == id)
    }

    /// Number of featured documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is featured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The ids in priority order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Moves `id` one position toward the front.
    pub fn move_up(&mut self, id: &str) -> Result<()> {
        let pos = self.position_of(id)?;
        if pos == 0 {
            return Err(Error::InvalidMove { id: id.to_string() });
        }

        // Swap against an independent copy of the sequence; the displaced id
        // must come from the pre-swap state.
        let mut reordered = self.ids.clone();
        reordered[pos] = self.ids[pos - 1].clone();
        reordered[pos - 1] = self.ids[pos].clone();
        self.ids = reordered;
        Ok(())
    }

    /// Moves `id` one position toward the back.
    pub fn move_down(&mut self, id: &str) -> Result<()> {
        let pos = self.position_of(id)?;
        if pos + 1 == self.ids.len() {
            return Err(Error::InvalidMove { id: id.to_string() });
        }

        let mut reordered = self.ids.clone();
        reordered[pos] = self.ids[pos + 1].clone();
        reordered[pos + 1] = self.ids[pos].clone();
        self.ids = reordered;
        Ok(())
    }

    /// Removes `id`, preserving the relative order of the remaining entries.
    pub fn remove(&mut self, id: &str) -> Result<()> {
        let pos = self.position_of(id)?;
        self.ids.remove(pos);
        Ok(())
    }

    /// Appends `id` as the lowest-priority entry. Ids already present are
    /// rejected rather than silently duplicated.
    pub fn append(&mut self, id: &str) -> Result<()> {
        if self.locate(id).is_some() {
            return Err(Error::AlreadyFeatured { id: id.to_string() });
        }
        self.ids.push(id.to_string());
        Ok(())
    }

    fn apply(&mut self, id: &str, action: MoveAction) -> Result<()> {
        match action {
            MoveAction::Up => self.move_up(id),
            MoveAction::Down => self.move_down(id),
            MoveAction::Remove => self.remove(id),
        }
    }

    fn position_of(&self, id: &str) -> Result<usize> {
        self.locate(id)
            .ok_or_else(|| Error::InvalidReference { id: id.to_string() })
    }
}

/// Result of a successful featured-list mutation.
#[derive(Debug, Clone)]
pub struct FeaturedUpdate {
    /// The new priority order
    pub order: Vec<String>,
    /// Confirmations for the web layer to surface
    pub notices: Vec<Notice>,
}

async fn load_featured_row(db: &DatabaseConnection) -> Result<Option<setting::Model>> {
    Setting::find()
        .filter(setting::Column::MetaKey.eq(FEATURED_DOCUMENTS_KEY))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Ids of all currently featured documents, highest priority first.
pub async fn featured_document_ids(db: &DatabaseConnection) -> Result<Vec<String>> {
    Ok(load_featured_row(db)
        .await?
        .map(|row| FeaturedList::parse(&row.meta_value).ids().to_vec())
        .unwrap_or_default())
}

/// Applies `action` to `document_id` within the featured order.
///
/// The whole list is re-serialized and written back in a single conditional
/// update: either the new sequence is persisted in full or, when another
/// writer got there first, nothing changes and [`Error::Conflict`] is
/// returned for the caller to surface.
pub async fn move_featured(
    db: &DatabaseConnection,
    document_id: i64,
    action: MoveAction,
) -> Result<FeaturedUpdate> {
    let id = document_id.to_string();
    let row = load_featured_row(db)
        .await?
        .ok_or_else(|| Error::InvalidReference { id: id.clone() })?;

    let mut list = FeaturedList::parse(&row.meta_value);
    list.apply(&id, action)?;
    store_featured(db, Some(&row.meta_value), &list).await?;

    info!(document_id, ?action, "featured order updated");
    Ok(FeaturedUpdate {
        order: list.ids().to_vec(),
        notices: vec![Notice::FeaturedDocumentsUpdated],
    })
}

/// Adds a catalog document to the end of the featured list.
///
/// The document must exist in the catalog; ids already featured are rejected
/// with [`Error::AlreadyFeatured`].
pub async fn add_featured(db: &DatabaseConnection, document_id: i64) -> Result<FeaturedUpdate> {
    let doc = document::require_document(db, document_id).await?;
    let id = doc.id.to_string();

    let row = load_featured_row(db).await?;
    let mut list = row
        .as_ref()
        .map(|r| FeaturedList::parse(&r.meta_value))
        .unwrap_or_default();
    list.append(&id)?;
    store_featured(db, row.as_ref().map(|r| r.meta_value.as_str()), &list).await?;

    info!(document_id, "document added to featured list");
    Ok(FeaturedUpdate {
        order: list.ids().to_vec(),
        notices: vec![Notice::FeaturedDocumentsUpdated],
    })
}

/// Persists the new order. `expected` is the serialized value observed when
/// the row was read; the update only applies while the row still holds it.
async fn store_featured(
    db: &DatabaseConnection,
    expected: Option<&str>,
    list: &FeaturedList,
) -> Result<()> {
    let now = Utc::now().naive_utc();

    match expected {
        Some(expected) => {
            let update = Setting::update_many()
                .col_expr(setting::Column::MetaValue, Expr::value(list.serialize()))
                .col_expr(setting::Column::UpdatedAt, Expr::value(now))
                .filter(setting::Column::MetaKey.eq(FEATURED_DOCUMENTS_KEY))
                .filter(setting::Column::MetaValue.eq(expected))
                .exec(db)
                .await?;

            if update.rows_affected == 0 {
                return Err(Error::Conflict);
            }
        }
        None => {
            let fresh = setting::ActiveModel {
                meta_key: Set(FEATURED_DOCUMENTS_KEY.to_string()),
                meta_value: Set(list.serialize()),
                updated_at: Set(now),
                ..Default::default()
            };

            // The row appearing between our read and this insert trips the
            // unique key on meta_key; that is a concurrent first write.
            fresh.insert(db).await.map_err(|err| match err.sql_err() {
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => Error::Conflict,
                _ => Error::Database(err),
            })?;
        }
    }

    Ok(())
}

/// Featured documents as catalog models, in priority order.
///
/// Ids that no longer resolve to a catalog document are skipped.
pub async fn get_featured_documents(
    db: &DatabaseConnection,
) -> Result<Vec<document_entity::Model>> {
    let ids = featured_document_ids(db).await?;
    let numeric: Vec<i64> = ids.iter().filter_map(|id| id.parse().ok()).collect();
    if numeric.is_empty() {
        return Ok(Vec::new());
    }

    let mut by_id: HashMap<i64, document_entity::Model> = Document::find()
        .filter(document_entity::Column::Id.is_in(numeric.clone()))
        .all(db)
        .await?
        .into_iter()
        .map(|doc| (doc.id, doc))
        .collect();

    Ok(numeric.into_iter().filter_map(|id| by_id.remove(&id)).collect())
}

/// Non-template documents that are not currently featured, newest first.
///
/// This feeds the "add a featured document" picker on the curation screen.
pub async fn get_non_featured_documents(
    db: &DatabaseConnection,
) -> Result<Vec<document_entity::Model>> {
    let featured: Vec<i64> = featured_document_ids(db)
        .await?
        .iter()
        .filter_map(|id| id.parse().ok())
        .collect();

    let mut query = Document::find()
        .filter(document_entity::Column::IsTemplate.eq(false))
        .order_by_desc(document_entity::Column::CreatedAt);
    if !featured.is_empty() {
        query = query.filter(document_entity::Column::Id.is_not_in(featured));
    }

    query.all(db).await.map_err(Into::into)
}
