//! Admin dashboard
//!
//! Aggregated counters for the staff overview screen.

use std::sync::Arc;

use clubflow_domain::DashboardStats;
use tracing::instrument;

use super::client::ApiClient;
use crate::errors::ApiError;

/// Admin operations.
pub struct AdminApi {
    client: Arc<ApiClient>,
}

impl AdminApi {
    /// Create a new admin API instance.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetch the dashboard counters.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` for non-staff sessions.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<DashboardStats, ApiError> {
        self.client.get("/admin/stats/").await
    }
}
