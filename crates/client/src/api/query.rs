//! List endpoint query parameters
//!
//! List endpoints share a common parameter vocabulary: `page` and
//! `page_size` for pagination, `search` for text lookup, `ordering` for
//! sort order, plus endpoint-specific filters. `ListQuery` assembles them
//! and writes them onto a request URL.

use url::Url;

/// Query parameters accepted by list endpoints.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    page: Option<u32>,
    page_size: Option<u32>,
    search: Option<String>,
    ordering: Option<String>,
    filters: Vec<(String, String)>,
}

impl ListQuery {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a result page (1-based).
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size.
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Set the free-text search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Set the ordering expression (e.g. `-starts_at`).
    pub fn ordering(mut self, ordering: impl Into<String>) -> Self {
        self.ordering = Some(ordering.into());
        self
    }

    /// Add an endpoint-specific filter such as `status=active`.
    pub fn filter(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((key.into(), value.to_string()));
        self
    }

    /// True when no parameter has been set.
    pub fn is_empty(&self) -> bool {
        self.page.is_none()
            && self.page_size.is_none()
            && self.search.is_none()
            && self.ordering.is_none()
            && self.filters.is_empty()
    }

    pub(crate) fn apply(&self, url: &mut Url) {
        if self.is_empty() {
            return;
        }

        let mut pairs = url.query_pairs_mut();
        if let Some(page) = self.page {
            pairs.append_pair("page", &page.to_string());
        }
        if let Some(size) = self.page_size {
            pairs.append_pair("page_size", &size.to_string());
        }
        if let Some(term) = &self.search {
            pairs.append_pair("search", term);
        }
        if let Some(ordering) = &self.ordering {
            pairs.append_pair("ordering", ordering);
        }
        for (key, value) in &self.filters {
            pairs.append_pair(key, value);
        }
    }
}
