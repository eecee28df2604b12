//! User entity - a registered account on the platform.
//!
//! The back office manages the admin flag and lists accounts; registration
//! and authentication are handled elsewhere.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// First name
    pub fname: String,
    /// Last name
    pub lname: String,
    /// Email address, unique across accounts
    #[sea_orm(unique)]
    pub email: String,
    /// Whether the user can access the admin screens
    pub is_admin: bool,
    /// When the account was created
    pub created_at: DateTime,
    /// When the account was last modified
    pub updated_at: DateTime,
}

/// `User` has no relationships the back office needs
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
