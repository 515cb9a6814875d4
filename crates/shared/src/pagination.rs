//! Offset-based pagination utilities.

use serde::{Deserialize, Serialize};

/// Default page when the query string omits one.
pub const DEFAULT_PAGE: u32 = 1;

/// Pagination metadata returned alongside every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Builds pagination metadata for `total_count` records split into pages
    /// of `limit` entries. `page` and `limit` are clamped to at least 1.
    pub fn new(page: u32, limit: u32, total_count: u64) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total_pages = (total_count.div_ceil(limit as u64)) as u32;
        Self {
            current_page: page,
            total_pages,
            total_count,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// Computes the row offset for a 1-based page number.
pub fn offset(page: u32, limit: u32) -> u64 {
    let page = page.max(1) as u64;
    let limit = limit.max(1) as u64;
    (page - 1) * limit
}
