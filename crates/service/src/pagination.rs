//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct and helpers to normalize inputs.

/// Rows per page of the employee listing.
pub const PAGE_SIZE: u64 = 10;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u64,
    /// items per page
    pub per_page: u64,
}

impl Pagination {
    pub fn new(page: u64) -> Self {
        Self { page: page.max(1), per_page: PAGE_SIZE }
    }

    /// Parse a raw `page` query value; anything that is not a positive
    /// integer falls back to the first page.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let page = raw
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .map(|p| p as u64)
            .unwrap_or(1);
        Self::new(page)
    }

    /// Number of rows skipped before this page.
    pub fn offset(self) -> u64 {
        self.per_page.saturating_mul(self.page - 1)
    }

    /// `ceil(total / per_page)`
    pub fn total_pages(self, total: u64) -> u64 {
        total.div_ceil(self.per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: PAGE_SIZE } }
}
