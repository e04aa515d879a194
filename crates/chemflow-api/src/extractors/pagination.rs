//! Query-string pagination and date-range parameters.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use chemflow_core::types::pagination::PageRequest;

/// `?page=&limit=` query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub limit: Option<u64>,
}

impl PaginationParams {
    /// Convert into a clamped [`PageRequest`].
    pub fn into_page_request(self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest::new(
            self.page.unwrap_or(defaults.page),
            self.limit.unwrap_or(defaults.page_size),
        )
    }
}

/// `?startDate=&endDate=` query parameters (RFC 3339 timestamps).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeParams {
    /// Inclusive window start.
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive window end.
    pub end_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let params = PaginationParams {
            page: None,
            limit: None,
        };
        let page = params.into_page_request();
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 20);
    }

    #[test]
    fn test_camel_case_date_params() {
        let params: DateRangeParams =
            serde_json::from_str(r#"{"startDate":"2025-03-01T00:00:00Z"}"#).unwrap();
        assert!(params.start_date.is_some());
        assert!(params.end_date.is_none());
    }
}
