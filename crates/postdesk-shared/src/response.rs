//! Standardized API response types (RFC 7807 compliant for errors).

use serde::{Deserialize, Serialize};

use postdesk_core::ports::Page;

/// One page of a collection, with the counts needed to walk the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub items_per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    /// Project a repository page through `view`.
    pub fn from_page<E>(page: &Page<E>, view: impl Fn(&E) -> T) -> Self {
        Self {
            items: page.items.iter().map(view).collect(),
            page: page.page,
            items_per_page: page.per_page,
            total_items: page.total_items,
            total_pages: page.total_pages(),
        }
    }

    /// A page with no items.
    pub fn empty(page: u64, items_per_page: u64) -> Self {
        Self {
            items: Vec::new(),
            page,
            items_per_page,
            total_items: 0,
            total_pages: 0,
        }
    }
}

/// A single rejected field of a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub property_path: String,
    pub message: String,
}

impl Violation {
    pub fn new(property_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property_path: property_path.into(),
            message: message.into(),
        }
    }
}

/// RFC 7807 Problem Details for HTTP APIs.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,

    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Field-level violations of a rejected write.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
            violations: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_violations(mut self, violations: Vec<Violation>) -> Self {
        self.violations = violations;
        self
    }

    // Common error constructors
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_detail(detail)
    }

    pub fn unauthorized() -> Self {
        Self::new(401, "Unauthorized")
    }

    pub fn forbidden() -> Self {
        Self::new(403, "Forbidden")
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "Not Found").with_detail(detail)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violations_serialize_with_property_path() {
        let body = ErrorResponse::new(422, "Validation Failed")
            .with_violations(vec![Violation::new("title", "The title cannot be blank")]);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["type"], "about:blank");
        assert_eq!(json["violations"][0]["propertyPath"], "title");
        assert!(json.get("detail").is_none());
    }

    #[test]
    fn test_paginated_from_page() {
        let page = Page {
            items: vec![1, 2, 3],
            page: 2,
            per_page: 3,
            total_items: 7,
        };

        let paginated = Paginated::from_page(&page, |n| n * 10);
        assert_eq!(paginated.items, vec![10, 20, 30]);
        assert_eq!(paginated.total_pages, 3);
    }
}
