//! Invoices
//!
//! Invoices are generated server-side from memberships and purchases; the
//! client reads them and records payment. Money arrives as decimal strings
//! and is never parsed into floats.

use std::sync::Arc;

use clubflow_domain::{Invoice, Page};
use tracing::{debug, instrument};

use super::client::ApiClient;
use super::query::ListQuery;
use crate::errors::ApiError;

/// Invoice operations.
pub struct InvoicesApi {
    client: Arc<ApiClient>,
}

impl InvoicesApi {
    /// Create a new invoices API instance.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List invoices; filter by `customer` or `status` via the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, query))]
    pub async fn list(&self, query: &ListQuery) -> Result<Page<Invoice>, ApiError> {
        let page: Page<Invoice> = self.client.get_with("/invoices/", query).await?;
        debug!(count = page.results.len(), "invoices listed");
        Ok(page)
    }

    /// Fetch an invoice by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` with status 404 for an unknown id.
    #[instrument(skip(self), fields(invoice_id = id))]
    pub async fn get(&self, id: i64) -> Result<Invoice, ApiError> {
        self.client.get(&format!("/invoices/{id}/")).await
    }

    /// Record an invoice as paid.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` when the invoice is already paid or void.
    #[instrument(skip(self), fields(invoice_id = id))]
    pub async fn mark_paid(&self, id: i64) -> Result<Invoice, ApiError> {
        let invoice: Invoice =
            self.client.post_empty(&format!("/invoices/{id}/mark-paid/")).await?;
        debug!(invoice_id = id, "invoice marked paid");
        Ok(invoice)
    }
}
