// ABOUTME: Pagination utilities for the listing endpoints
// ABOUTME: Query parameters plus the page metadata block returned to clients

use serde::{Deserialize, Serialize};

/// Default page size for paginated queries
pub const DEFAULT_PAGE_LENGTH: i64 = 10;

/// Maximum page size to prevent performance issues
pub const MAX_PAGE_LENGTH: i64 = 100;

/// Minimum page number (1-indexed)
pub const MIN_PAGE: i64 = 1;

/// Pagination query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-indexed, defaults to 1)
    #[serde(default = "default_page")]
    pub page: i64,

    /// Number of items per page (defaults to DEFAULT_PAGE_LENGTH, max MAX_PAGE_LENGTH)
    #[serde(rename = "pageLength", default = "default_page_length")]
    pub page_length: i64,
}

fn default_page() -> i64 {
    MIN_PAGE
}

fn default_page_length() -> i64 {
    DEFAULT_PAGE_LENGTH
}

impl PaginationParams {
    pub fn new() -> Self {
        Self {
            page: MIN_PAGE,
            page_length: DEFAULT_PAGE_LENGTH,
        }
    }

    pub fn with_page_and_length(page: i64, page_length: i64) -> Self {
        Self { page, page_length }
    }

    /// Validate and normalize pagination parameters.
    /// Returns (limit, offset) suitable for SQL queries.
    pub fn validate(&self) -> (i64, i64) {
        let page = self.page.max(MIN_PAGE);
        let limit = self.page_length.clamp(1, MAX_PAGE_LENGTH);
        let offset = (page - 1) * limit;

        (limit, offset)
    }

    /// Get SQL LIMIT clause value
    pub fn limit(&self) -> i64 {
        self.validate().0
    }

    /// Get SQL OFFSET clause value
    pub fn offset(&self) -> i64 {
        self.validate().1
    }

    /// Get the current page number
    pub fn page(&self) -> i64 {
        self.page.max(MIN_PAGE)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Metadata describing a page's position in the whole result set.
/// Serialized verbatim into the `pagination` block of list responses.
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub current_page: i64,
    pub last_page: i64,
    pub per_page: i64,
    pub total: i64,
}

impl PageMeta {
    /// Create page metadata from params and total count. `last_page` is
    /// never below 1, even for an empty result set.
    pub fn new(params: &PaginationParams, total: i64) -> Self {
        let current_page = params.page();
        let per_page = params.limit();
        let last_page = if total > 0 {
            (total + per_page - 1) / per_page
        } else {
            1
        };

        Self {
            current_page,
            last_page,
            per_page,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pagination_params() {
        let params = PaginationParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), DEFAULT_PAGE_LENGTH);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_pagination_params_validation() {
        // Negative page
        let params = PaginationParams::with_page_and_length(-5, 10);
        assert_eq!(params.page(), 1);
        assert_eq!(params.offset(), 0);

        // Zero page
        let params = PaginationParams::with_page_and_length(0, 10);
        assert_eq!(params.page(), 1);

        // Oversized page length
        let params = PaginationParams::with_page_and_length(1, 500);
        assert_eq!(params.limit(), MAX_PAGE_LENGTH);

        // Non-positive page length
        let params = PaginationParams::with_page_and_length(1, 0);
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn test_offset_calculation() {
        let params = PaginationParams::with_page_and_length(1, 10);
        assert_eq!(params.offset(), 0);

        let params = PaginationParams::with_page_and_length(2, 10);
        assert_eq!(params.offset(), 10);

        let params = PaginationParams::with_page_and_length(3, 4);
        assert_eq!(params.offset(), 8);
    }

    #[test]
    fn test_page_meta() {
        let params = PaginationParams::with_page_and_length(1, 10);
        let meta = PageMeta::new(&params, 35);

        assert_eq!(meta.current_page, 1);
        assert_eq!(meta.per_page, 10);
        assert_eq!(meta.total, 35);
        assert_eq!(meta.last_page, 4);
    }

    #[test]
    fn test_page_meta_empty_result() {
        let params = PaginationParams::new();
        let meta = PageMeta::new(&params, 0);

        assert_eq!(meta.total, 0);
        assert_eq!(meta.last_page, 1);
    }

    #[test]
    fn test_page_meta_exact_multiple() {
        let params = PaginationParams::with_page_and_length(2, 10);
        let meta = PageMeta::new(&params, 20);

        assert_eq!(meta.current_page, 2);
        assert_eq!(meta.last_page, 2);
    }
}
