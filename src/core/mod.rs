//! Core business logic - framework-agnostic admin operations.
//!
//! Each submodule owns one area of the back office. Functions take a
//! [`sea_orm::DatabaseConnection`] and return plain data plus the notices and
//! events the web layer should dispatch; nothing here renders views or talks
//! to the HTTP framework.

/// Document catalog lookups
pub mod document;
/// Featured-documents ordering
pub mod featured;
/// Shared listing parameters and pagination for the index pages
pub mod listing;
/// Site setting declarations, overlay resolution, and override writes
pub mod settings;
/// Sponsor management
pub mod sponsor;
/// User management
pub mod user;
