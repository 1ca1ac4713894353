//! Class schedules
//!
//! Read-only timetable access; schedule maintenance stays with the backend
//! admin. Date-range and trainer filters go through [`ListQuery`].

use std::sync::Arc;

use clubflow_domain::{ClassSchedule, Page};
use tracing::{debug, instrument};

use super::client::ApiClient;
use super::query::ListQuery;
use crate::errors::ApiError;

/// Class schedule operations.
pub struct SchedulesApi {
    client: Arc<ApiClient>,
}

impl SchedulesApi {
    /// Create a new schedules API instance.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List scheduled classes; filter by `date_from`, `date_to`, or
    /// `trainer` via the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, query))]
    pub async fn list(&self, query: &ListQuery) -> Result<Page<ClassSchedule>, ApiError> {
        let page: Page<ClassSchedule> = self.client.get_with("/class-schedules/", query).await?;
        debug!(count = page.results.len(), "class schedules listed");
        Ok(page)
    }

    /// Fetch a scheduled class by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` with status 404 for an unknown id.
    #[instrument(skip(self), fields(schedule_id = id))]
    pub async fn get(&self, id: i64) -> Result<ClassSchedule, ApiError> {
        self.client.get(&format!("/class-schedules/{id}/")).await
    }
}
