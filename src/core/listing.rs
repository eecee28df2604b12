//! Shared listing parameters for the back-office index pages.
//!
//! The users and sponsors screens accept the same query-string shape: an
//! optional search term, an order field with direction, and page/limit
//! pagination. Relevance ordering belongs to the external search layer; the
//! rule that "relevance without a query falls back to last-update order with
//! a warning" lives with the callers in [`crate::core::sponsor`] and
//! [`crate::core::user`].

use crate::events::Notice;

/// Order field value requesting search-relevance ordering.
pub const ORDER_RELEVANCE: &str = "relevance";

/// Default page size of the index listings.
pub const DEFAULT_PAGE_SIZE: u64 = 12;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderDir {
    /// Ascending
    Asc,
    /// Descending, the listing default
    #[default]
    Desc,
}

/// Parameters accepted by the index listings.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Substring to search for; empty and absent are equivalent
    pub search: Option<String>,
    /// Field to order by; [`ORDER_RELEVANCE`] only applies together with `search`
    pub order: Option<String>,
    /// Direction applied to an explicit `order` field
    pub order_dir: OrderDir,
    /// Page size, defaults to [`DEFAULT_PAGE_SIZE`]
    pub limit: Option<u64>,
    /// 1-based page number, defaults to 1
    pub page: Option<u64>,
}

impl ListQuery {
    /// The search term, with empty strings normalized away.
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|term| !term.trim().is_empty())
    }

    /// Effective page size.
    #[must_use]
    pub fn per_page(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1)
    }

    /// Effective 1-based page number.
    #[must_use]
    pub fn page_number(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }
}

/// One page of an index listing.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Rows of the requested page
    pub items: Vec<T>,
    /// Total rows matching the filters across all pages
    pub total: u64,
    /// 1-based page number that was fetched
    pub page: u64,
    /// Page size used
    pub per_page: u64,
    /// Warnings raised while interpreting the query, if any
    pub notices: Vec<Notice>,
}
