//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables backing the admin screens.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod document;
pub mod setting;
pub mod site_config;
pub mod sponsor;
pub mod user;

// Re-export specific types to avoid conflicts
pub use document::{Column as DocumentColumn, Entity as Document, Model as DocumentModel};
pub use setting::{Column as SettingColumn, Entity as Setting, Model as SettingModel};
pub use site_config::{
    Column as SiteConfigColumn, Entity as SiteConfig, Model as SiteConfigModel,
};
pub use sponsor::{Column as SponsorColumn, Entity as Sponsor, Model as SponsorModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
