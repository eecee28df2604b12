//! Document entity - a document published on the civic platform.
//!
//! The admin back office only reads this table: the featured list references
//! documents by id and the curation screens list what can still be featured.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Document database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    /// Unique identifier for the document
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Title shown in listings and on the document page
    pub title: String,
    /// URL slug, unique across the catalog
    #[sea_orm(unique)]
    pub slug: String,
    /// Templates are starting points for new documents and never appear in
    /// public listings or the featured list
    pub is_template: bool,
    /// When the document was created
    pub created_at: DateTime,
    /// When the document was last modified
    pub updated_at: DateTime,
}

/// Documents are referenced by id from the featured-order setting row,
/// so there are no foreign-key relationships to declare here
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
