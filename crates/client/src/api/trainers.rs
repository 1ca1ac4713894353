//! Trainers
//!
//! Read-only roster access for timetable display and filtering.

use std::sync::Arc;

use clubflow_domain::{Page, Trainer};
use tracing::instrument;

use super::client::ApiClient;
use super::query::ListQuery;
use crate::errors::ApiError;

/// Trainer operations.
pub struct TrainersApi {
    client: Arc<ApiClient>,
}

impl TrainersApi {
    /// Create a new trainers API instance.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List trainers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, query))]
    pub async fn list(&self, query: &ListQuery) -> Result<Page<Trainer>, ApiError> {
        self.client.get_with("/trainers/", query).await
    }

    /// Fetch a trainer by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` with status 404 for an unknown id.
    #[instrument(skip(self), fields(trainer_id = id))]
    pub async fn get(&self, id: i64) -> Result<Trainer, ApiError> {
        self.client.get(&format!("/trainers/{id}/")).await
    }
}
