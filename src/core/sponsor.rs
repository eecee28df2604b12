//! Sponsor management business logic.
//!
//! Sponsors move through a small lifecycle (pending, active, deactivated).
//! Status changes are the one transition with side effects: an event for the
//! notification pipeline and a confirmation notice. The index listing supports
//! name search, status filtering, and the shared ordering rules.

use crate::{
    core::listing::{ListQuery, ORDER_RELEVANCE, OrderDir, Page},
    entities::{Sponsor, sponsor},
    errors::{Error, Result},
    events::{AdminEvent, Notice},
};
use chrono::Utc;
use sea_orm::{PaginatorTrait, QueryOrder, Select, Set, prelude::*};
use tracing::info;

/// Lifecycle status of a sponsoring organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SponsorStatus {
    /// Applied but not yet approved
    Pending,
    /// Approved and visible on the platform
    Active,
    /// Retired; documents stay but the sponsor can no longer publish
    Deactivated,
}

impl SponsorStatus {
    /// The stored string form of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Deactivated => "deactivated",
        }
    }

    /// Parses a stored or submitted status string.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "deactivated" => Ok(Self::Deactivated),
            _ => Err(Error::UnknownStatus {
                status: raw.to_string(),
            }),
        }
    }

    /// All statuses, in the order the filter dropdown lists them.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Pending, Self::Active, Self::Deactivated]
    }
}

/// Result of a status transition.
#[derive(Debug, Clone)]
pub struct StatusChange {
    /// Whether anything was persisted; setting the current status is a no-op
    pub changed: bool,
    /// Events for the notification pipeline
    pub events: Vec<AdminEvent>,
    /// Confirmations for the web layer to surface
    pub notices: Vec<Notice>,
}

/// Finds a sponsor by its unique ID.
pub async fn get_sponsor_by_id(
    db: &DatabaseConnection,
    sponsor_id: i64,
) -> Result<Option<sponsor::Model>> {
    Sponsor::find_by_id(sponsor_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Moves a sponsor to `new_status`.
///
/// Setting the status the sponsor already has persists nothing and emits
/// nothing. A real transition updates the row and returns a
/// [`AdminEvent::SponsorStatusChanged`] for the notification pipeline.
pub async fn change_sponsor_status(
    db: &DatabaseConnection,
    sponsor_id: i64,
    new_status: SponsorStatus,
    changed_by: Option<i64>,
) -> Result<StatusChange> {
    let sponsor = get_sponsor_by_id(db, sponsor_id)
        .await?
        .ok_or(Error::SponsorNotFound { id: sponsor_id })?;

    if sponsor.status == new_status.as_str() {
        return Ok(StatusChange {
            changed: false,
            events: Vec::new(),
            notices: Vec::new(),
        });
    }

    let old_status = sponsor.status.clone();
    let mut active: sponsor::ActiveModel = sponsor.into();
    active.status = Set(new_status.as_str().to_string());
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(db).await?;

    info!(
        sponsor_id,
        old = %old_status,
        new = new_status.as_str(),
        "sponsor status changed"
    );
    Ok(StatusChange {
        changed: true,
        events: vec![AdminEvent::SponsorStatusChanged {
            sponsor_id,
            old_status,
            new_status: new_status.as_str().to_string(),
            changed_by,
        }],
        notices: vec![Notice::SponsorStatusUpdated],
    })
}

/// Sponsors index listing: optional name search, optional status filter,
/// explicit ordering with the relevance fallback rule.
pub async fn list_sponsors(
    db: &DatabaseConnection,
    query: &ListQuery,
    status: Option<SponsorStatus>,
) -> Result<Page<sponsor::Model>> {
    let mut finder = Sponsor::find();

    if let Some(term) = query.search_term() {
        finder = finder.filter(sponsor::Column::Name.contains(term));
    }
    if let Some(status) = status {
        finder = finder.filter(sponsor::Column::Status.eq(status.as_str()));
    }

    let (finder, notices) = apply_order(finder, query);

    let paginator = finder.paginate(db, query.per_page());
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(query.page_number() - 1).await?;

    Ok(Page {
        items,
        total,
        page: query.page_number(),
        per_page: query.per_page(),
        notices,
    })
}

/// Relevance ordering belongs to the external search layer; requesting it
/// without a search query degrades to the default ordering with a warning.
fn apply_order(
    finder: Select<Sponsor>,
    query: &ListQuery,
) -> (Select<Sponsor>, Vec<Notice>) {
    let mut notices = Vec::new();
    let has_search = query.search_term().is_some();

    match query.order.as_deref() {
        Some(ORDER_RELEVANCE) if !has_search => {
            notices.push(Notice::RelevanceOrderingUnavailable);
            (finder.order_by_desc(sponsor::Column::UpdatedAt), notices)
        }
        Some(ORDER_RELEVANCE) | None => {
            (finder.order_by_desc(sponsor::Column::UpdatedAt), notices)
        }
        Some(field) => {
            let column = match field {
                "name" => sponsor::Column::Name,
                "status" => sponsor::Column::Status,
                "created_at" => sponsor::Column::CreatedAt,
                _ => sponsor::Column::UpdatedAt,
            };
            let ordered = match query.order_dir {
                OrderDir::Asc => finder.order_by_asc(column),
                OrderDir::Desc => finder.order_by_desc(column),
            };
            (ordered, notices)
        }
    }
}
