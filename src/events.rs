//! Side-channel events and notices returned by core operations.
//!
//! The original admin screens fire framework events and flash messages from
//! inside the controllers. Here the core stays framework-free: a successful
//! operation returns the events and notices it wants dispatched, and the web
//! layer decides how to deliver them.

/// Domain events emitted by successful state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminEvent {
    /// A sponsor moved from one lifecycle status to another.
    SponsorStatusChanged {
        /// Sponsor primary key
        sponsor_id: i64,
        /// Status before the change
        old_status: String,
        /// Status after the change
        new_status: String,
        /// Admin user who made the change, when known
        changed_by: Option<i64>,
    },
}

/// User-visible confirmations and warnings produced by core operations.
/// The web layer turns these into flash messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The featured-documents order changed
    FeaturedDocumentsUpdated,
    /// Site settings were saved
    SettingsUpdated,
    /// A sponsor's status changed
    SponsorStatusUpdated,
    /// A user's admin flag changed
    AdminFlagUpdated,
    /// Relevance ordering was requested without a search query
    RelevanceOrderingUnavailable,
}

impl Notice {
    /// Default English message for this notice.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::FeaturedDocumentsUpdated => "Featured documents updated.",
            Self::SettingsUpdated => "Settings updated.",
            Self::SponsorStatusUpdated => "Sponsor status updated.",
            Self::AdminFlagUpdated => "User permissions updated.",
            Self::RelevanceOrderingUnavailable => {
                "Relevance ordering requires a search query; sorted by last update instead."
            }
        }
    }
}
