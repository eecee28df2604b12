//! User management business logic.
//!
//! The back office grants and revokes the admin flag and lists accounts.
//! Registration, authentication, and profile editing happen elsewhere.

use crate::{
    core::listing::{ListQuery, ORDER_RELEVANCE, OrderDir, Page},
    entities::{User, user},
    errors::{Error, Result},
    events::Notice,
};
use chrono::Utc;
use sea_orm::{Condition, PaginatorTrait, QueryOrder, Select, Set, prelude::*};
use tracing::info;

/// Result of an admin-flag change.
#[derive(Debug, Clone)]
pub struct AdminFlagChange {
    /// Whether the flag actually flipped
    pub changed: bool,
    /// Confirmations for the web layer to surface
    pub notices: Vec<Notice>,
}

/// Finds a user by its unique ID.
pub async fn get_user_by_id(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Grants or revokes the admin flag.
///
/// The confirmation notice is returned either way; `changed` records whether
/// a write actually happened.
pub async fn set_admin(
    db: &DatabaseConnection,
    user_id: i64,
    admin: bool,
) -> Result<AdminFlagChange> {
    let user = get_user_by_id(db, user_id)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })?;

    if user.is_admin == admin {
        return Ok(AdminFlagChange {
            changed: false,
            notices: vec![Notice::AdminFlagUpdated],
        });
    }

    let mut active: user::ActiveModel = user.into();
    active.is_admin = Set(admin);
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(db).await?;

    info!(user_id, admin, "user admin flag updated");
    Ok(AdminFlagChange {
        changed: true,
        notices: vec![Notice::AdminFlagUpdated],
    })
}

/// Users index listing: substring search over names and email, explicit
/// ordering with the relevance fallback rule.
pub async fn list_users(db: &DatabaseConnection, query: &ListQuery) -> Result<Page<user::Model>> {
    let mut finder = User::find();

    if let Some(term) = query.search_term() {
        finder = finder.filter(
            Condition::any()
                .add(user::Column::Fname.contains(term))
                .add(user::Column::Lname.contains(term))
                .add(user::Column::Email.contains(term)),
        );
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

/// Same fallback rule as the sponsors listing: relevance ordering without a
/// search query degrades to last-update order with a warning.
fn apply_order(finder: Select<User>, query: &ListQuery) -> (Select<User>, Vec<Notice>) {
    let mut notices = Vec::new();
    let has_search = query.search_term().is_some();

    match query.order.as_deref() {
        Some(ORDER_RELEVANCE) if !has_search => {
            notices.push(Notice::RelevanceOrderingUnavailable);
            (finder.order_by_desc(user::Column::UpdatedAt), notices)
        }
        Some(ORDER_RELEVANCE) | None => (finder.order_by_desc(user::Column::UpdatedAt), notices),
        Some(field) => {
            let column = match field {
                "fname" => user::Column::Fname,
                "lname" => user::Column::Lname,
                "email" => user::Column::Email,
                "created_at" => user::Column::CreatedAt,
                _ => user::Column::UpdatedAt,
            };
            let ordered = match query.order_dir {
                OrderDir::Asc => finder.order_by_asc(column),
                OrderDir::Desc => finder.order_by_desc(column),
            };
            (ordered, notices)
        }
    }
}
