//! Customer records
//!
//! CRUD over `/customers/` plus the nested membership listing.

use std::sync::Arc;

use chrono::NaiveDate;
use clubflow_domain::{Customer, Membership, Page};
use serde::Serialize;
use tracing::{debug, instrument};

use super::client::ApiClient;
use super::query::ListQuery;
use crate::errors::ApiError;

/// Payload for `POST /customers/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewCustomer {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email, unique per club.
    pub email: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// Free-form emergency contact details.
    pub emergency_contact: Option<String>,
    /// Staff notes.
    pub notes: Option<String>,
}

/// Partial update for `PATCH /customers/{id}/`. Unset fields are left
/// unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerUpdate {
    /// New given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// New contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New contact phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// New emergency contact details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    /// New staff notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Activate or deactivate the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Customer operations.
pub struct CustomersApi {
    client: Arc<ApiClient>,
}

impl CustomersApi {
    /// Create a new customers API instance.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List customers, with search and pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, query))]
    pub async fn list(&self, query: &ListQuery) -> Result<Page<Customer>, ApiError> {
        let page: Page<Customer> = self.client.get_with("/customers/", query).await?;
        debug!(count = page.results.len(), total = page.count, "customers listed");
        Ok(page)
    }

    /// Register a new customer.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` for validation failures (e.g. duplicate
    /// email).
    #[instrument(skip(self, customer), fields(email = %customer.email))]
    pub async fn create(&self, customer: &NewCustomer) -> Result<Customer, ApiError> {
        let created: Customer = self.client.post("/customers/", customer).await?;
        debug!(customer_id = created.id, "customer created");
        Ok(created)
    }

    /// Fetch a customer by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` with status 404 for an unknown id.
    #[instrument(skip(self), fields(customer_id = id))]
    pub async fn get(&self, id: i64) -> Result<Customer, ApiError> {
        self.client.get(&format!("/customers/{id}/")).await
    }

    /// Apply a partial update to a customer record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, update), fields(customer_id = id))]
    pub async fn update(&self, id: i64, update: &CustomerUpdate) -> Result<Customer, ApiError> {
        self.client.patch(&format!("/customers/{id}/"), update).await
    }

    /// Delete a customer record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(customer_id = id))]
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/customers/{id}/")).await?;
        debug!(customer_id = id, "customer deleted");
        Ok(())
    }

    /// List the memberships held by a customer, newest first. The route is
    /// paginated like every other collection endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(customer_id = id))]
    pub async fn memberships(&self, id: i64) -> Result<Page<Membership>, ApiError> {
        self.client.get(&format!("/customers/{id}/memberships/")).await
    }
}
