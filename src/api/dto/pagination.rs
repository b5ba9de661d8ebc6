//! Pagination and sorting query parameters.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::listing::{ListQuery, SortDirection, SortField};

/// Sortable columns as they appear on the wire.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    CreatedAt,
    UpdatedAt,
    ClickCount,
    Order,
}

impl From<SortBy> for SortField {
    fn from(sort: SortBy) -> Self {
        match sort {
            SortBy::CreatedAt => SortField::CreatedAt,
            SortBy::UpdatedAt => SortField::UpdatedAt,
            SortBy::ClickCount => SortField::ClickCount,
            SortBy::Order => SortField::Position,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl From<SortOrder> for SortDirection {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => SortDirection::Asc,
            SortOrder::Desc => SortDirection::Desc,
        }
    }
}

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<u32>,

    #[serde(default, rename = "sortBy")]
    pub sort_by: Option<SortBy>,

    #[serde(default, rename = "sortOrder")]
    pub sort_order: Option<SortOrder>,
}

impl PageParams {
    /// Validates the parameters and converts them to a repository query.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `limit`: 20
    /// - `sortBy`: order (display position)
    /// - `sortOrder`: asc
    ///
    /// # Validation
    ///
    /// - Page must be ≥ 1
    /// - Limit must be between 1 and 100
    pub fn validate_and_into_query(&self) -> Result<ListQuery, String> {
        let page = self.page.unwrap_or(1);
        let limit = self.limit.unwrap_or(20);

        if page == 0 {
            return Err("page must be greater than 0".to_string());
        }

        if !(1..=100).contains(&limit) {
            return Err("limit must be between 1 and 100".to_string());
        }

        Ok(ListQuery {
            offset: ((page - 1) * limit) as i64,
            limit: limit as i64,
            sort: self.sort_by.map(SortField::from).unwrap_or_default(),
            direction: self.sort_order.map(SortDirection::from).unwrap_or_default(),
        })
    }

    /// Effective page number after defaulting.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    /// Effective page size after defaulting.
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(20)
    }
}

/// Pagination block included in list responses.
#[derive(Debug, Serialize)]
pub struct PageInfo {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<u32>, limit: Option<u32>) -> PageParams {
        PageParams {
            page,
            limit,
            ..PageParams::default()
        }
    }

    #[test]
    fn test_defaults() {
        let q = params(None, None).validate_and_into_query().unwrap();
        assert_eq!(q.offset, 0);
        assert_eq!(q.limit, 20);
        assert_eq!(q.order_by(), "position ASC");
    }

    #[test]
    fn test_page_2_offset() {
        let q = params(Some(2), Some(50)).validate_and_into_query().unwrap();
        assert_eq!(q.offset, 50);
        assert_eq!(q.limit, 50);
    }

    #[test]
    fn test_page_zero_is_error() {
        assert!(params(Some(0), None).validate_and_into_query().is_err());
    }

    #[test]
    fn test_limit_bounds() {
        assert!(params(None, Some(0)).validate_and_into_query().is_err());
        assert!(params(None, Some(1)).validate_and_into_query().is_ok());
        assert!(params(None, Some(100)).validate_and_into_query().is_ok());
        assert!(params(None, Some(101)).validate_and_into_query().is_err());
    }

    #[test]
    fn test_sort_params_parse_from_wire_strings() {
        // Query-string values arrive as strings; DisplayFromStr covers the
        // numeric fields.
        let p: PageParams = serde_json::from_value(serde_json::json!({
            "page": "2",
            "limit": "10",
            "sortBy": "clickCount",
            "sortOrder": "desc",
        }))
        .unwrap();

        let q = p.validate_and_into_query().unwrap();
        assert_eq!(q.offset, 10);
        assert_eq!(q.order_by(), "click_count DESC");
    }

    #[test]
    fn test_sort_by_order_maps_to_position() {
        let p: PageParams =
            serde_json::from_value(serde_json::json!({ "sortBy": "order" })).unwrap();
        let q = p.validate_and_into_query().unwrap();
        assert_eq!(q.order_by(), "position ASC");
    }

    #[test]
    fn test_unknown_sort_by_is_rejected() {
        let result: Result<PageParams, _> =
            serde_json::from_value(serde_json::json!({ "sortBy": "password" }));
        assert!(result.is_err());
    }
}
