//! Sponsor entity - an organization that sponsors documents on the platform.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sponsor database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sponsors")]
pub struct Model {
    /// Unique identifier for the sponsor
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the sponsoring organization
    pub name: String,
    /// Lifecycle status, one of the strings produced by
    /// [`crate::core::sponsor::SponsorStatus::as_str`]
    pub status: String,
    /// When the sponsor was created
    pub created_at: DateTime,
    /// When the sponsor was last modified
    pub updated_at: DateTime,
}

/// `Sponsor` has no relationships the back office needs
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
