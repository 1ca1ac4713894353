//! Core request pipeline
//!
//! `ApiClient` joins paths onto the configured base URL, attaches the bearer
//! token, dispatches through the retrying transport, and recovers from a 401
//! by running one token refresh and redispatching the original request once.
//! Non-401 failures are mapped straight to [`ApiError`] without touching the
//! refresh machinery.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use super::query::ListQuery;
use crate::auth::interceptor::with_bearer;
use crate::auth::{
    AuthInterceptor, LogSessionEvents, MemoryTokenStore, RefreshCoordinator, SessionEventHandler,
    TokenStore,
};
use crate::config::ClientConfig;
use crate::errors::{error_detail, ApiError};
use crate::http::HttpClient;

const REFRESH_PATH: &str = "auth/token/refresh/";

/// HTTP API client with transparent token refresh.
///
/// Shared as `Arc<ApiClient>` by the typed resource APIs; every dispatch
/// through it follows the pipeline described in the module docs.
pub struct ApiClient {
    http: Arc<HttpClient>,
    store: Arc<dyn TokenStore>,
    interceptor: AuthInterceptor,
    refresher: Arc<RefreshCoordinator>,
    base_url: Url,
}

impl ApiClient {
    /// Create a client from a configuration, token store, and event handler.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the base URL is malformed or the
    /// transport cannot be initialized.
    pub fn new(
        config: ClientConfig,
        store: Arc<dyn TokenStore>,
        events: Arc<dyn SessionEventHandler>,
    ) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(&config.base_url)?;

        let http = Arc::new(
            HttpClient::builder()
                .timeout(config.timeout)
                .max_attempts(config.max_attempts)
                .base_backoff(config.base_backoff)
                .user_agent(config.user_agent)
                .build()?,
        );

        let refresh_url = base_url
            .join(REFRESH_PATH)
            .map_err(|err| ApiError::Config(format!("invalid refresh endpoint: {err}")))?;

        let interceptor = AuthInterceptor::new(store.clone());
        let refresher =
            Arc::new(RefreshCoordinator::new(http.clone(), store.clone(), events, refresh_url));

        Ok(Self { http, store, interceptor, refresher, base_url })
    }

    /// Start building a client with fluent configuration.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Shared token store handle, for login/logout flows and host inspection.
    pub fn token_store(&self) -> Arc<dyn TokenStore> {
        self.store.clone()
    }

    /// Base URL every path is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Execute an authenticated GET request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the session cannot be
    /// recovered after a 401, or the response cannot be decoded.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        self.execute(Method::GET, url, None).await
    }

    /// Execute an authenticated GET request with list parameters.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> Result<T, ApiError> {
        let mut url = self.endpoint(path)?;
        query.apply(&mut url);
        self.execute(Method::GET, url, None).await
    }

    /// Execute an authenticated POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`], plus `ApiError::Config` if the body
    /// cannot be encoded as JSON.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        self.execute(Method::POST, url, Some(encode_body(body)?)).await
    }

    /// Execute an authenticated POST request without a body.
    ///
    /// Used by action endpoints such as booking cancellation.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    #[instrument(skip(self), fields(path = %path))]
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        self.execute(Method::POST, url, None).await
    }

    /// Execute an authenticated PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::post`].
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        self.execute(Method::PATCH, url, Some(encode_body(body)?)).await
    }

    /// Execute an authenticated DELETE request.
    ///
    /// The backend answers deletes with `204 No Content`, so the response
    /// body is discarded rather than decoded into a caller-chosen type.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.endpoint(path)?;
        self.execute(Method::DELETE, url, None).await
    }

    /// Execute an unauthenticated GET request.
    ///
    /// No bearer header is attached and a 401 is surfaced directly; the
    /// refresh coordinator is never consulted.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// decoded.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get_public<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        self.execute_public(Method::GET, url, None).await
    }

    /// Execute an unauthenticated POST request with a JSON body.
    ///
    /// Login and other credential submissions go through here so that a
    /// rejected sign-in can never trigger a refresh cycle.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get_public`], plus `ApiError::Config` if the
    /// body cannot be encoded as JSON.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post_public<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        self.execute_public(Method::POST, url, Some(encode_body(body)?)).await
    }

    /// Bearer-authenticated POST that surfaces a 401 instead of refreshing.
    ///
    /// The logout call uses this so a dying session never spawns a refresh
    /// cycle or fires a session-expired event.
    pub(crate) async fn post_without_recovery<B, T>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let payload = encode_body(body)?;
        let request = self.build_request(Method::POST, url.clone(), Some(&payload));
        let request = self.interceptor.authorize(request).await;
        let response = self.http.send(request).await?;
        decode_response(response, &url).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| ApiError::Config(format!("invalid API path {path:?}: {err}")))
    }

    fn build_request(&self, method: Method, url: Url, body: Option<&Value>) -> RequestBuilder {
        let mut request = self.http.request(method, url);
        if let Some(payload) = body {
            request = request.json(payload);
        }
        request
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let response = self.dispatch_authed(method, url.clone(), body).await?;
        decode_response(response, &url).await
    }

    async fn execute_public<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let request = self.build_request(method, url.clone(), body.as_ref());
        let response = self.http.send(request).await?;
        decode_response(response, &url).await
    }

    async fn dispatch_authed(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<Response, ApiError> {
        let request = self.build_request(method.clone(), url.clone(), body.as_ref());
        let request = self.interceptor.authorize(request).await;
        let response = self.http.send(request).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!(%method, %url, "request returned 401, running token refresh");
        let access = self.refresher.refresh_access_token().await?;

        // One redispatch with the fresh token; a second 401 falls through
        // to the status mapper like any other failure.
        let retry = self.build_request(method, url, body.as_ref());
        self.http.send(with_bearer(retry, &access)).await
    }
}

/// Builder for [`ApiClient`].
#[derive(Default)]
pub struct ApiClientBuilder {
    config: ClientConfig,
    store: Option<Arc<dyn TokenStore>>,
    events: Option<Arc<dyn SessionEventHandler>>,
}

impl ApiClientBuilder {
    /// Replace the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the base URL requests are joined onto.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the total transport attempts per dispatch.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.config.max_attempts = attempts;
        self
    }

    /// Set the base delay for transport retry backoff.
    pub fn base_backoff(mut self, backoff: std::time::Duration) -> Self {
        self.config.base_backoff = backoff;
        self
    }

    /// Set the user agent reported on every request.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Install a token store; defaults to [`MemoryTokenStore`].
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Install a session event handler; defaults to [`LogSessionEvents`].
    pub fn session_events(mut self, events: Arc<dyn SessionEventHandler>) -> Self {
        self.events = Some(events);
        self
    }

    /// Build the configured client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the base URL is malformed or the
    /// transport cannot be initialized.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let store = self.store.unwrap_or_else(|| Arc::new(MemoryTokenStore::new()));
        let events = self.events.unwrap_or_else(|| Arc::new(LogSessionEvents));
        ApiClient::new(self.config, store, events)
    }
}

fn normalize_base_url(raw: &str) -> Result<Url, ApiError> {
    // A trailing slash makes Url::join append path segments instead of
    // replacing the last one.
    let normalized = format!("{}/", raw.trim_end_matches('/'));
    Url::parse(&normalized)
        .map_err(|err| ApiError::Config(format!("invalid base URL {raw:?}: {err}")))
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body)
        .map_err(|err| ApiError::Config(format!("request body cannot be encoded as JSON: {err}")))
}

async fn decode_response<T: DeserializeOwned>(response: Response, url: &Url) -> Result<T, ApiError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(map_status_error(status, url, &body));
    }

    // 204/205 carry no body; decode as JSON null so unit responses work.
    if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
        return serde_json::from_value(Value::Null).map_err(|_| {
            ApiError::Decode(format!(
                "no-content response (HTTP {}) cannot populate the expected type",
                status.as_u16()
            ))
        });
    }

    response
        .json()
        .await
        .map_err(|err| ApiError::Decode(format!("failed to parse response body: {err}")))
}

fn map_status_error(status: StatusCode, url: &Url, body: &str) -> ApiError {
    let detail = error_detail(body);

    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthenticated(detail),
        StatusCode::FORBIDDEN => ApiError::Forbidden(detail),
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimit(detail),
        _ if status.is_server_error() => ApiError::Server {
            status: status.as_u16(),
            message: format!("{url} returned {status}: {detail}"),
        },
        _ if status.is_client_error() => {
            ApiError::Client { status: status.as_u16(), message: detail }
        }
        _ => ApiError::Network(format!("{url} returned unexpected status {status}")),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde::Deserialize;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Payload {
        message: String,
    }

    async fn client_for(server: &MockServer) -> (Arc<ApiClient>, Arc<MemoryTokenStore>) {
        let store = Arc::new(MemoryTokenStore::new());
        let client = ApiClient::builder()
            .base_url(server.uri())
            .max_attempts(1)
            .base_backoff(Duration::from_millis(5))
            .token_store(store.clone())
            .build()
            .expect("api client");
        (Arc::new(client), store)
    }

    #[test]
    fn test_base_url_normalization_appends_segments() {
        let base = normalize_base_url("https://api.clubflow.app/v1").unwrap();
        assert_eq!(base.as_str(), "https://api.clubflow.app/v1/");
        assert_eq!(base.join("customers/").unwrap().as_str(), "https://api.clubflow.app/v1/customers/");

        assert!(matches!(normalize_base_url("not a url"), Err(ApiError::Config(_))));
    }

    #[tokio::test]
    async fn test_get_attaches_bearer_and_decodes_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me/"))
            .and(header("authorization", "Bearer access-1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "hello"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (client, store) = client_for(&server).await;
        store.set_tokens("access-1", "refresh-1").await.unwrap();

        let payload: Payload = client.get("/auth/me/").await.unwrap();
        assert_eq!(payload.message, "hello");
    }

    /// Validates the recovery pipeline: a 401 runs one refresh and the
    /// original request is redispatched once with the fresh token.
    #[tokio::test]
    async fn test_401_refreshes_and_redispatches_once() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/me/"))
            .and(header("authorization", "Bearer stale"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/auth/token/refresh/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"access": "fresh"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/auth/me/"))
            .and(header("authorization", "Bearer fresh"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "welcome"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (client, store) = client_for(&server).await;
        store.set_tokens("stale", "refresh-1").await.unwrap();

        let payload: Payload = client.get("/auth/me/").await.unwrap();
        assert_eq!(payload.message, "welcome");
        assert_eq!(store.access_token().await.unwrap().as_deref(), Some("fresh"));
    }

    /// Validates the no-infinite-retry guarantee: when the redispatch is
    /// rejected again, the caller gets the auth error and no second refresh
    /// cycle starts.
    #[tokio::test]
    async fn test_second_401_surfaces_without_second_refresh() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/me/"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"detail": "User inactive"})),
            )
            .expect(2)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/auth/token/refresh/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"access": "fresh"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (client, store) = client_for(&server).await;
        store.set_tokens("stale", "refresh-1").await.unwrap();

        let result: Result<Payload, ApiError> = client.get("/auth/me/").await;
        match result {
            Err(ApiError::Unauthenticated(msg)) => assert!(msg.contains("User inactive")),
            other => panic!("expected Unauthenticated, got {:?}", other),
        }
        // The refresh itself succeeded, so the fresh token is persisted.
        assert_eq!(store.access_token().await.unwrap().as_deref(), Some("fresh"));
    }

    /// Validates that non-auth failures never touch the refresh endpoint.
    #[tokio::test]
    async fn test_non_auth_errors_bypass_refresh() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/class-schedules/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/auth/token/refresh/"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (client, store) = client_for(&server).await;
        store.set_tokens("access-1", "refresh-1").await.unwrap();

        let result: Result<Payload, ApiError> = client.get("/class-schedules/").await;
        assert!(matches!(result, Err(ApiError::Server { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_delete_decodes_204_as_unit() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/waitlist/9/"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let (client, store) = client_for(&server).await;
        store.set_tokens("access-1", "refresh-1").await.unwrap();

        client.delete("/waitlist/9/").await.unwrap();
    }

    #[tokio::test]
    async fn test_drf_detail_messages_surface_in_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/stats/"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(
                    serde_json::json!({"detail": "You do not have permission to perform this action."}),
                ),
            )
            .mount(&server)
            .await;

        let (client, store) = client_for(&server).await;
        store.set_tokens("access-1", "refresh-1").await.unwrap();

        let result: Result<Payload, ApiError> = client.get("/admin/stats/").await;
        match result {
            Err(ApiError::Forbidden(msg)) => {
                assert_eq!(msg, "You do not have permission to perform this action.");
            }
            other => panic!("expected Forbidden, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_with_applies_list_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customers/"))
            .and(query_param("page", "2"))
            .and(query_param("search", "smith"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "page 2"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (client, store) = client_for(&server).await;
        store.set_tokens("access-1", "refresh-1").await.unwrap();

        let query = ListQuery::new().page(2).search("smith");
        let payload: Payload = client.get_with("/customers/", &query).await.unwrap();
        assert_eq!(payload.message, "page 2");
    }

    /// Validates that public dispatch carries no bearer header and a public
    /// 401 surfaces directly instead of starting a refresh cycle.
    #[tokio::test]
    async fn test_public_dispatch_skips_auth_entirely() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login/"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"detail": "Invalid credentials"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/auth/token/refresh/"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (client, store) = client_for(&server).await;
        store.set_tokens("access-1", "refresh-1").await.unwrap();

        let body = serde_json::json!({"email": "a@b.c", "password": "nope"});
        let result: Result<Payload, ApiError> = client.post_public("/auth/login/", &body).await;
        match result {
            Err(ApiError::Unauthenticated(msg)) => assert!(msg.contains("Invalid credentials")),
            other => panic!("expected Unauthenticated, got {:?}", other),
        }

        let requests = server.received_requests().await.unwrap();
        assert!(requests.iter().all(|req| req.headers.get("authorization").is_none()));
    }

    #[test]
    fn test_builder_rejects_invalid_base_url() {
        let result = ApiClient::builder().base_url("definitely not a url").build();
        assert!(matches!(result, Err(ApiError::Config(_))));
    }
}
