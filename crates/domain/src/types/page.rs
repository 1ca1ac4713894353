//! Paginated list envelope
//!
//! Collection endpoints wrap their results in a fixed envelope:
//! `{count, next, previous, results}`. `next`/`previous` are absolute URLs
//! to the adjacent pages, or null at either end of the collection.

use serde::{Deserialize, Serialize};

/// One page of a paginated collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of items across all pages.
    pub count: u64,
    /// URL of the next page, if any.
    pub next: Option<String>,
    /// URL of the previous page, if any.
    pub previous: Option<String>,
    /// Items on this page.
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Returns true when a further page exists.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns true when this is not the first page.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Number of items on this page (not the collection total).
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true when this page carries no items.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserializes_backend_envelope() {
        let json = r#"{
            "count": 42,
            "next": "https://api.clubflow.app/customers/?page=3",
            "previous": "https://api.clubflow.app/customers/?page=1",
            "results": [1, 2, 3]
        }"#;

        let page: Page<i64> = serde_json::from_str(json).unwrap();
        assert_eq!(page.count, 42);
        assert!(page.has_next());
        assert!(page.has_previous());
        assert_eq!(page.len(), 3);
    }

    #[test]
    fn test_single_page_has_no_neighbours() {
        let json = r#"{"count": 1, "next": null, "previous": null, "results": ["only"]}"#;

        let page: Page<String> = serde_json::from_str(json).unwrap();
        assert!(!page.has_next());
        assert!(!page.has_previous());
        assert!(!page.is_empty());
    }

    #[test]
    fn test_empty_page() {
        let json = r#"{"count": 0, "next": null, "previous": null, "results": []}"#;

        let page: Page<i64> = serde_json::from_str(json).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.len(), 0);
    }
}
