//! Unified error type for all back-office operations.
//!
//! Every failure is request-scoped: callers surface it to the user and redirect,
//! nothing here is fatal to the process and nothing is retried automatically.
//! Database errors propagate unchanged through the `#[from]` conversion.

use thiserror::Error;

/// Errors produced by the back-office core.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file missing, unreadable, or malformed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// The referenced document is not part of the featured list
    #[error("Document {id} is not in the featured list")]
    InvalidReference {
        /// Document id as it appears in the list
        id: String,
    },

    /// The requested move would push the document past either end of the list
    #[error("Document {id} cannot be moved any further in that direction")]
    InvalidMove {
        /// Document id as it appears in the list
        id: String,
    },

    /// The document is already present in the featured list
    #[error("Document {id} is already featured")]
    AlreadyFeatured {
        /// Document id as it appears in the list
        id: String,
    },

    /// The document does not exist in the catalog
    #[error("Document not found: {id}")]
    DocumentNotFound {
        /// Catalog primary key
        id: i64,
    },

    /// The sponsor does not exist
    #[error("Sponsor not found: {id}")]
    SponsorNotFound {
        /// Sponsor primary key
        id: i64,
    },

    /// The user does not exist
    #[error("User not found: {id}")]
    UserNotFound {
        /// User primary key
        id: i64,
    },

    /// A status string that is not one of the declared sponsor statuses
    #[error("Unknown sponsor status: {status}")]
    UnknownStatus {
        /// The rejected input
        status: String,
    },

    /// A concurrent writer changed the featured list between read and write
    #[error("The featured list was modified concurrently")]
    Conflict,

    /// Underlying store failed to read or write
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem error, typically while reading the configuration file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience `Result` type
/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
