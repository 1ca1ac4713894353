//! Contact messages
//!
//! The public website form posts here without authentication; staff read
//! and triage the inbox through the admin endpoints.

use std::sync::Arc;

use clubflow_domain::{ContactMessage, Page};
use serde::Serialize;
use tracing::{debug, instrument};

use super::client::ApiClient;
use super::query::ListQuery;
use crate::errors::ApiError;

/// Payload for the public contact form (`POST /contact/`).
#[derive(Debug, Clone, Serialize)]
pub struct NewContactMessage {
    /// Sender's name.
    pub name: String,
    /// Sender's email for the reply.
    pub email: String,
    /// Optional subject line.
    pub subject: Option<String>,
    /// Message body.
    pub message: String,
}

#[derive(Debug, Serialize)]
struct MarkReadRequest {
    is_read: bool,
}

/// Contact form and inbox operations.
pub struct ContactApi {
    client: Arc<ApiClient>,
}

impl ContactApi {
    /// Create a new contact API instance.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Submit the public contact form. No authentication.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` for validation failures.
    #[instrument(skip_all)]
    pub async fn submit(&self, message: &NewContactMessage) -> Result<ContactMessage, ApiError> {
        let created: ContactMessage = self.client.post_public("/contact/", message).await?;
        debug!(message_id = created.id, "contact message submitted");
        Ok(created)
    }

    /// List inbox messages (staff only).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` for non-staff sessions.
    #[instrument(skip(self, query))]
    pub async fn inbox(&self, query: &ListQuery) -> Result<Page<ContactMessage>, ApiError> {
        self.client.get_with("/admin/contact-messages/", query).await
    }

    /// Mark an inbox message as read.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(message_id = id))]
    pub async fn mark_read(&self, id: i64) -> Result<ContactMessage, ApiError> {
        let updated: ContactMessage = self
            .client
            .patch(&format!("/admin/contact-messages/{id}/"), &MarkReadRequest { is_read: true })
            .await?;
        debug!(message_id = id, "contact message marked read");
        Ok(updated)
    }
}
