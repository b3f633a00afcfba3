use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::serde::deserialize_optional_i64;

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

/// Metadata attached to every paginated response.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub total: i64,
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    pub has_more: bool,
}

/// Pagination query parameters.
///
/// Accepts either `page` or `offset` (page wins when both are given), with
/// empty query-string values treated as absent.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

impl PaginationParams {
    /// Effective page size, clamped to `1..=100`.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Effective row offset. Derived from `page` when present, otherwise the
    /// raw `offset`, floored at zero.
    pub fn offset(&self) -> i64 {
        match self.page {
            Some(page) => (page.max(1) - 1) * self.limit(),
            None => self.offset.unwrap_or(0).max(0),
        }
    }

    pub fn page(&self) -> Option<i64> {
        self.page.map(|p| p.max(1))
    }

    /// Builds the response metadata for a page of `returned` rows out of
    /// `total`.
    pub fn meta(&self, total: i64, returned: usize) -> PaginationMeta {
        let offset = self.offset();
        PaginationMeta {
            total,
            limit: self.limit(),
            offset: Some(offset),
            page: self.page(),
            has_more: offset + (returned as i64) < total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
        assert_eq!(params.page(), None);
    }

    #[test]
    fn test_limit_is_clamped() {
        let cases = [(Some(0), 1), (Some(-3), 1), (Some(250), 100), (Some(25), 25)];
        for (input, expected) in cases {
            let params = PaginationParams {
                limit: input,
                ..Default::default()
            };
            assert_eq!(params.limit(), expected);
        }
    }

    #[test]
    fn test_negative_offset_floors_at_zero() {
        let params = PaginationParams {
            offset: Some(-20),
            ..Default::default()
        };
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_page_overrides_offset() {
        let params = PaginationParams {
            limit: Some(20),
            offset: Some(5),
            page: Some(3),
        };
        assert_eq!(params.offset(), 40);
        assert_eq!(params.page(), Some(3));
    }

    #[test]
    fn test_empty_query_values_deserialize_as_absent() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"limit":"","offset":"","page":""}"#).unwrap();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_string_query_values_parse() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"limit":"25","offset":"50"}"#).unwrap();
        assert_eq!(params.limit(), 25);
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn test_meta_has_more() {
        let params = PaginationParams {
            limit: Some(10),
            ..Default::default()
        };
        let meta = params.meta(25, 10);
        assert_eq!(meta.total, 25);
        assert!(meta.has_more);

        let last_page = PaginationParams {
            limit: Some(10),
            offset: Some(20),
            page: None,
        };
        assert!(!last_page.meta(25, 5).has_more);
    }
}
