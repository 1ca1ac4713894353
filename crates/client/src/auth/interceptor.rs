//! Request-side bearer attachment
//!
//! Runs before transport dispatch on every authenticated request. A missing
//! token is not an error: public endpoints and the login call itself go out
//! bare, and the server's 401 drives recovery from the response side.

use std::sync::Arc;

use reqwest::RequestBuilder;
use tracing::warn;

use super::store::TokenStore;

/// Attaches `Authorization: Bearer <access>` when a token is present.
pub struct AuthInterceptor {
    store: Arc<dyn TokenStore>,
}

impl AuthInterceptor {
    /// Create an interceptor over the shared token store.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Attach the stored access token to `builder`, if one exists.
    ///
    /// Storage read failures degrade to an unauthenticated request: the
    /// request must never fail here, only at the server.
    pub async fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.store.access_token().await {
            Ok(Some(token)) => builder.bearer_auth(token),
            Ok(None) => builder,
            Err(err) => {
                warn!(error = %err, "token store read failed; sending request unauthenticated");
                builder
            }
        }
    }
}

/// Attach an explicit token, bypassing the store.
///
/// Used when redispatching after a refresh: the waiter was resolved with
/// the new token and must use exactly that value.
pub(crate) fn with_bearer(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.bearer_auth(token)
}
