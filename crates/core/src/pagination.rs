//! Page/limit pagination shared by every listing endpoint.
//!
//! Pages are 1-based. Limits are clamped to `1..=MAX_LIMIT` so a client can
//! never request an unbounded result set.

use serde::{Deserialize, Serialize};

/// Default page size when the client omits `limit`.
pub const DEFAULT_LIMIT: i64 = 20;

/// Upper bound on `limit`.
pub const MAX_LIMIT: i64 = 100;

/// Query parameters `?page=&limit=`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    /// Clamped 1-based page number.
    pub fn page(&self) -> i64 {
        clamp_page(self.page)
    }

    /// Clamped page size.
    pub fn limit(&self) -> i64 {
        clamp_limit(self.limit, DEFAULT_LIMIT, MAX_LIMIT)
    }

    /// Row offset for the clamped page and limit.
    pub fn offset(&self) -> i64 {
        offset(self.page(), self.limit())
    }
}

/// Clamp a user-provided limit to `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided page to at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Row offset for a 1-based page.
pub fn offset(page: i64, limit: i64) -> i64 {
    (page - 1).saturating_mul(limit)
}

/// Pagination metadata returned alongside every listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let total = total.max(0);
        let total_pages = if total == 0 {
            0
        } else {
            (total + limit - 1) / limit
        };
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    pub fn from_params(params: &PageParams, total: i64) -> Self {
        Self::new(params.page(), params.limit(), total)
    }

    /// Number of items the page at `self.page` should contain.
    pub fn expected_len(&self) -> i64 {
        let start = offset(self.page, self.limit);
        (self.total - start).clamp(0, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_absent() {
        let params = PageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), DEFAULT_LIMIT);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(clamp_limit(Some(500), 20, 100), 100);
        assert_eq!(clamp_limit(Some(0), 20, 100), 1);
        assert_eq!(clamp_limit(Some(-3), 20, 100), 1);
        assert_eq!(clamp_limit(Some(35), 20, 100), 35);
    }

    #[test]
    fn page_is_floored_at_one() {
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(Some(-7)), 1);
        assert_eq!(clamp_page(Some(4)), 4);
    }

    #[test]
    fn offset_for_third_page() {
        let params = PageParams {
            page: Some(3),
            limit: Some(10),
        };
        assert_eq!(params.offset(), 20);
    }

    #[test]
    fn total_pages_rounds_up() {
        let p = Pagination::new(1, 10, 25);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next);
        assert!(!p.has_prev);
    }

    #[test]
    fn last_page_has_no_next() {
        let p = Pagination::new(3, 10, 25);
        assert!(!p.has_next);
        assert!(p.has_prev);
        assert_eq!(p.expected_len(), 5);
    }

    #[test]
    fn empty_result_set() {
        let p = Pagination::new(1, 20, 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next);
        assert_eq!(p.expected_len(), 0);
    }

    #[test]
    fn page_past_the_end_expects_nothing() {
        let p = Pagination::new(9, 10, 25);
        assert_eq!(p.expected_len(), 0);
        assert!(!p.has_next);
    }
}
