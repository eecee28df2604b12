//! Site config entity - persisted overrides of the compiled site defaults.
//!
//! One row per overridden setting, addressed by its (group, key) pair. The
//! absence of a row means "use the compiled default from config.toml".

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Site config database model - one override per (group, key)
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "site_config")]
pub struct Model {
    /// Configuration group, the part of the dotted key before the first dot
    #[sea_orm(primary_key, auto_increment = false)]
    pub group: String,
    /// Configuration key within the group
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// The overriding value
    pub value: String,
    /// When this override was last modified
    pub updated_at: DateTime,
}

/// `SiteConfig` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
