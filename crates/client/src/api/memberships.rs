//! Membership plans and memberships
//!
//! Plans are the catalogue; memberships bind a customer to a plan for a
//! date range. Freeze and cancel are action endpoints that return the
//! updated membership.

use std::sync::Arc;

use chrono::NaiveDate;
use clubflow_domain::{Membership, MembershipPlan, Page};
use serde::Serialize;
use tracing::{debug, instrument};

use super::client::ApiClient;
use super::query::ListQuery;
use crate::errors::ApiError;

/// Payload for `POST /memberships/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewMembership {
    /// Customer taking the membership.
    pub customer: i64,
    /// Plan id from the catalogue.
    pub plan: i64,
    /// First day the membership is valid.
    pub start_date: NaiveDate,
    /// Whether to renew automatically at the end of the term.
    pub auto_renew: bool,
}

#[derive(Debug, Serialize)]
struct FreezeRequest {
    until: NaiveDate,
}

/// Membership plan catalogue operations.
pub struct MembershipPlansApi {
    client: Arc<ApiClient>,
}

impl MembershipPlansApi {
    /// Create a new plans API instance.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List available plans.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, query))]
    pub async fn list(&self, query: &ListQuery) -> Result<Page<MembershipPlan>, ApiError> {
        self.client.get_with("/membership-plans/", query).await
    }
}

/// Membership operations.
pub struct MembershipsApi {
    client: Arc<ApiClient>,
}

impl MembershipsApi {
    /// Create a new memberships API instance.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List memberships; filter by `customer` or `status` via the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, query))]
    pub async fn list(&self, query: &ListQuery) -> Result<Page<Membership>, ApiError> {
        let page: Page<Membership> = self.client.get_with("/memberships/", query).await?;
        debug!(count = page.results.len(), "memberships listed");
        Ok(page)
    }

    /// Sign a customer up for a plan.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` when the backend rejects the combination
    /// (e.g. overlapping active membership).
    #[instrument(skip(self, membership), fields(customer_id = membership.customer))]
    pub async fn create(&self, membership: &NewMembership) -> Result<Membership, ApiError> {
        let created: Membership = self.client.post("/memberships/", membership).await?;
        debug!(membership_id = created.id, "membership created");
        Ok(created)
    }

    /// Fetch a membership by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` with status 404 for an unknown id.
    #[instrument(skip(self), fields(membership_id = id))]
    pub async fn get(&self, id: i64) -> Result<Membership, ApiError> {
        self.client.get(&format!("/memberships/{id}/")).await
    }

    /// Freeze a membership until the given date.
    ///
    /// The end date is pushed out by the frozen period server-side.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` if the membership cannot be frozen (not
    /// active, date in the past).
    #[instrument(skip(self), fields(membership_id = id, until = %until))]
    pub async fn freeze(&self, id: i64, until: NaiveDate) -> Result<Membership, ApiError> {
        let updated: Membership =
            self.client.post(&format!("/memberships/{id}/freeze/"), &FreezeRequest { until }).await?;
        debug!(membership_id = id, "membership frozen");
        Ok(updated)
    }

    /// Cancel a membership immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(membership_id = id))]
    pub async fn cancel(&self, id: i64) -> Result<Membership, ApiError> {
        let updated: Membership =
            self.client.post_empty(&format!("/memberships/{id}/cancel/")).await?;
        debug!(membership_id = id, "membership cancelled");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use clubflow_domain::MembershipStatus;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::auth::{MemoryTokenStore, TokenStore};

    async fn client_for(server: &MockServer) -> Arc<ApiClient> {
        let store = Arc::new(MemoryTokenStore::new());
        store.set_tokens("access-1", "refresh-1").await.unwrap();
        Arc::new(
            ApiClient::builder()
                .base_url(server.uri())
                .max_attempts(1)
                .token_store(store)
                .build()
                .expect("api client"),
        )
    }

    fn membership_json(id: i64, status: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "customer": 31,
            "plan": {
                "id": 2,
                "name": "Unlimited Monthly",
                "description": "All classes, no booking cap",
                "duration_days": 30,
                "price": "149.00",
                "class_credits": null,
                "is_trial": false
            },
            "status": status,
            "start_date": "2025-07-01",
            "end_date": "2025-07-31",
            "frozen_until": null,
            "auto_renew": true,
            "remaining_credits": null
        })
    }

    #[tokio::test]
    async fn test_list_plans_decodes_catalogue() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/membership-plans/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 2,
                "next": null,
                "previous": null,
                "results": [
                    {
                        "id": 1,
                        "name": "Trial Week",
                        "description": null,
                        "duration_days": 7,
                        "price": "0.00",
                        "class_credits": 3,
                        "is_trial": true
                    },
                    {
                        "id": 2,
                        "name": "Unlimited Monthly",
                        "description": null,
                        "duration_days": 30,
                        "price": "149.00",
                        "class_credits": null,
                        "is_trial": false
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = MembershipPlansApi::new(client_for(&server).await);
        let page = api.list(&ListQuery::new()).await.unwrap();

        assert_eq!(page.count, 2);
        assert!(page.results[0].is_trial);
        assert_eq!(page.results[1].price, "149.00");
    }

    #[tokio::test]
    async fn test_create_membership() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/memberships/"))
            .and(body_json(serde_json::json!({
                "customer": 31,
                "plan": 2,
                "start_date": "2025-07-01",
                "auto_renew": true
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(membership_json(4, "active")))
            .expect(1)
            .mount(&server)
            .await;

        let api = MembershipsApi::new(client_for(&server).await);
        let membership = api
            .create(&NewMembership {
                customer: 31,
                plan: 2,
                start_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
                auto_renew: true,
            })
            .await
            .unwrap();

        assert_eq!(membership.id, 4);
        assert_eq!(membership.status, MembershipStatus::Active);
    }

    #[tokio::test]
    async fn test_list_memberships_filtered_by_customer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/memberships/"))
            .and(query_param("customer", "31"))
            .and(query_param("status", "active"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 1,
                "next": null,
                "previous": null,
                "results": [membership_json(4, "active")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = MembershipsApi::new(client_for(&server).await);
        let query = ListQuery::new().filter("customer", 31).filter("status", "active");
        let page = api.list(&query).await.unwrap();

        assert_eq!(page.results.len(), 1);
    }

    #[tokio::test]
    async fn test_freeze_sends_until_date() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/memberships/4/freeze/"))
            .and(body_json(serde_json::json!({"until": "2025-08-15"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(membership_json(4, "frozen")))
            .expect(1)
            .mount(&server)
            .await;

        let api = MembershipsApi::new(client_for(&server).await);
        let membership =
            api.freeze(4, NaiveDate::from_ymd_opt(2025, 8, 15).unwrap()).await.unwrap();

        assert_eq!(membership.status, MembershipStatus::Frozen);
    }

    #[tokio::test]
    async fn test_cancel_posts_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/memberships/4/cancel/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(membership_json(4, "cancelled")))
            .expect(1)
            .mount(&server)
            .await;

        let api = MembershipsApi::new(client_for(&server).await);
        let membership = api.cancel(4).await.unwrap();

        assert_eq!(membership.status, MembershipStatus::Cancelled);
        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].body.is_empty());
    }
}
