//! Pagination resolution for list endpoints
//!
//! Turns the raw, untrusted `page` / `page_size` inputs of a request into a
//! bounded [`PageWindow`]. Resolution is permissive: malformed or out-of-range
//! input silently falls back to the configured defaults, and the page size is
//! always clamped to `max_page_size`. Pagination never fails a request, it only
//! decides how much data a request gets back.
//!
//! # Example
//!
//! ```rust
//! use pa_donde::pagination::{resolve, PaginationConfig};
//!
//! let config = PaginationConfig::default(); // 1 / 10 / 50
//!
//! let window = resolve(Some("3"), Some("100"), &config);
//! assert_eq!(window.offset(), 100);
//! assert_eq!(window.limit(), 50);
//!
//! let fallback = resolve(Some("abc"), None, &config);
//! assert_eq!(fallback.page, 1);
//! assert_eq!(fallback.limit(), 10);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::repository::Pagination;

/// Process-wide pagination settings, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page used when the request omits or garbles `page`
    #[serde(default = "default_page")]
    pub default_page: u64,

    /// Page size used when the request omits or garbles `page_size`
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,

    /// Upper bound for any resolved page size
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: default_page(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl PaginationConfig {
    /// Create a pagination configuration
    #[must_use]
    pub const fn new(default_page: u64, default_page_size: u64, max_page_size: u64) -> Self {
        Self {
            default_page,
            default_page_size,
            max_page_size,
        }
    }

    /// Check the invariants the resolver relies on
    ///
    /// Fails with [`Error::InvalidConfig`] naming the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidConfig(message));

        if self.default_page < 1 {
            return invalid("pagination.default_page must be at least 1".to_string());
        }
        if self.default_page_size < 1 {
            return invalid("pagination.default_page_size must be at least 1".to_string());
        }
        if self.max_page_size < 1 {
            return invalid("pagination.max_page_size must be at least 1".to_string());
        }
        if self.default_page_size > self.max_page_size {
            return invalid(format!(
                "pagination.default_page_size ({}) exceeds pagination.max_page_size ({})",
                self.default_page_size, self.max_page_size
            ));
        }
        Ok(())
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    10
}

fn default_max_page_size() -> u64 {
    50
}

/// A resolved, request-scoped page selection
///
/// `page` is 1-based. Both fields are always at least 1 once produced by
/// [`resolve`] with a valid [`PaginationConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// 1-based page number
    pub page: u64,
    /// Number of records per page
    pub page_size: u64,
}

impl PageWindow {
    /// Number of records to skip
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Maximum number of records to return
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.page_size
    }
}

impl From<PageWindow> for Pagination {
    fn from(window: PageWindow) -> Self {
        Pagination::page(window.page, window.page_size)
    }
}

/// Resolve raw `page` / `page_size` inputs against the configuration
///
/// 1. `page` that is absent, non-numeric or below 1 becomes `default_page`.
/// 2. `page_size` that is absent, non-numeric or below 1 becomes `default_page_size`.
/// 3. `page_size` above `max_page_size` is clamped to `max_page_size`.
#[must_use]
pub fn resolve(
    raw_page: Option<&str>,
    raw_page_size: Option<&str>,
    config: &PaginationConfig,
) -> PageWindow {
    let page = parse_positive(raw_page).unwrap_or(config.default_page);
    let page_size = parse_positive(raw_page_size)
        .unwrap_or(config.default_page_size)
        .min(config.max_page_size);

    PageWindow { page, page_size }
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw?.parse::<i64>()
        .ok()
        .filter(|value| *value >= 1)
        .map(|value| value as u64)
}
