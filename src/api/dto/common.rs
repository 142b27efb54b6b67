//! Common API DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard API response envelope
///
/// Every REST endpoint returns its payload in this wrapper.
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload. `null` on failure
    pub data: Option<T>,
    /// Error description. `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Empty response for operations without return data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

/// Pagination parameters for list endpoints
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct PaginationParams {
    /// Page number (1-based). Default: 1
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page (1-100). Default: 50
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    50
}

/// Paginated response
///
/// Holds one page of items plus page metadata.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    /// Items on the current page
    pub items: Vec<T>,
    /// Total item count across all pages
    pub total: u64,
    /// Current page (1-based)
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Total page count
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    /// Builds the envelope for one page of results.
    ///
    /// `page` and `limit` are clamped to the same window the storage layer
    /// uses (page >= 1, limit 1-100), so the echoed metadata always matches
    /// the rows that were actually fetched.
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);
        let total_pages = total.div_ceil(limit as u64) as u32;
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_metadata_rounds_up() {
        let resp = PaginatedResponse::new(vec![1, 2, 3], 101, 1, 50);
        assert_eq!(resp.total_pages, 3);
        assert_eq!(resp.limit, 50);
        assert_eq!(resp.page, 1);
    }

    #[test]
    fn zero_limit_is_clamped_to_storage_window() {
        let resp = PaginatedResponse::new(vec![1], 5, 0, 0);
        assert_eq!(resp.limit, 1);
        assert_eq!(resp.page, 1);
        assert_eq!(resp.total_pages, 5);
    }

    #[test]
    fn oversized_limit_is_capped() {
        let resp = PaginatedResponse::<u32>::new(vec![], 250, 2, 1000);
        assert_eq!(resp.limit, 100);
        assert_eq!(resp.total_pages, 3);
    }
}
