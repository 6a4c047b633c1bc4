//! Offset/limit window passed to repository list queries

/// Pagination parameters for limiting query results
///
/// # Example
///
/// ```rust
/// use pa_donde::repository::Pagination;
///
/// let page2 = Pagination::page(2, 20);
/// assert_eq!(page2.offset, 20);
/// assert_eq!(page2.limit, 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Number of results to skip
    pub offset: u64,
    /// Maximum number of results to return
    pub limit: u64,
}

impl Pagination {
    /// Create new pagination parameters
    #[must_use]
    pub const fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// Create pagination for a specific page number (1-indexed)
    #[must_use]
    pub const fn page(page_number: u64, page_size: u64) -> Self {
        let offset = page_number.saturating_sub(1).saturating_mul(page_size);
        Self {
            offset,
            limit: page_size,
        }
    }

    /// Offset as a signed SQL bind value
    #[must_use]
    pub fn sql_offset(&self) -> i64 {
        i64::try_from(self.offset).unwrap_or(i64::MAX)
    }

    /// Limit as a signed SQL bind value
    #[must_use]
    pub fn sql_limit(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_new() {
        let pagination = Pagination::new(10, 25);
        assert_eq!(pagination.offset, 10);
        assert_eq!(pagination.limit, 25);
    }

    #[test]
    fn test_pagination_page() {
        assert_eq!(Pagination::page(1, 20), Pagination::new(0, 20));
        assert_eq!(Pagination::page(3, 20), Pagination::new(40, 20));
    }

    #[test]
    fn test_pagination_page_zero_handling() {
        assert_eq!(Pagination::page(0, 20).offset, 0);
    }

    #[test]
    fn test_sql_bounds_saturate() {
        let pagination = Pagination::new(u64::MAX, u64::MAX);
        assert_eq!(pagination.sql_offset(), i64::MAX);
        assert_eq!(pagination.sql_limit(), i64::MAX);
    }
}
