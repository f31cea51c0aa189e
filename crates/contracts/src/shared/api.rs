//! Backend REST envelope shared by every endpoint.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Standard response envelope: `{success, message, data}`.
///
/// Write endpoints and failures may omit `data` or send `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: T,
}

/// Paginated list payload (Laravel-style, `current_page` is 1-based).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedData<T> {
    pub current_page: usize,
    pub data: Vec<T>,
    #[serde(default)]
    pub from: Option<usize>,
    #[serde(default)]
    pub to: Option<usize>,
    pub last_page: usize,
    pub per_page: usize,
    pub total: usize,
}

impl<T> Default for PaginatedData<T> {
    /// No rows, as returned for an empty table.
    fn default() -> Self {
        Self {
            current_page: 1,
            data: Vec::new(),
            from: None,
            to: None,
            last_page: 0,
            per_page: 0,
            total: 0,
        }
    }
}

/// Query string of every list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// 1-based page number
    pub page: usize,
    pub per_page: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ListQuery {
    pub fn new(page: usize, per_page: usize, search: Option<&str>) -> Self {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Self {
            page,
            per_page,
            search,
        }
    }
}

/// Error body carried by 400/422 responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginated_envelope_decodes() {
        let json = r#"{
            "success": true,
            "message": "ok",
            "data": {
                "current_page": 2,
                "data": [1, 2, 3],
                "from": 11,
                "to": 13,
                "last_page": 3,
                "per_page": 10,
                "total": 23
            }
        }"#;
        let resp: ApiResponse<PaginatedData<i32>> = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.current_page, 2);
        assert_eq!(resp.data.data, vec![1, 2, 3]);
        assert_eq!(resp.data.last_page, 3);
    }

    #[test]
    fn test_missing_message_and_null_bounds() {
        let json = r#"{"success": true, "data": {
            "current_page": 1, "data": [], "from": null, "to": null,
            "last_page": 0, "per_page": 10, "total": 0
        }}"#;
        let resp: ApiResponse<PaginatedData<i32>> = serde_json::from_str(json).unwrap();
        assert_eq!(resp.message, "");
        assert_eq!(resp.data.from, None);
    }

    #[test]
    fn test_missing_data_defaults_to_empty_page() {
        let resp: ApiResponse<PaginatedData<i32>> =
            serde_json::from_str(r#"{"success": false, "message": "Table not found"}"#).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.data.total, 0);
        assert_eq!(resp.data.current_page, 1);
        assert!(resp.data.data.is_empty());
    }

    #[test]
    fn test_list_query_drops_blank_search() {
        assert_eq!(ListQuery::new(1, 10, Some("  ")).search, None);
        assert_eq!(
            ListQuery::new(1, 10, Some(" abc ")).search.as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn test_validation_body_decodes() {
        let json = r#"{"message": "The given data was invalid.",
            "errors": {"phone": ["The phone has already been taken."]}}"#;
        let body: ValidationErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.errors["phone"].len(), 1);
    }
}
