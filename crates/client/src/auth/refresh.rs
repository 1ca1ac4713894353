//! Single-flight token refresh
//!
//! At most one refresh network call is ever outstanding. The first request
//! to observe a 401 starts the cycle; every other 401 victim parks a waiter
//! in a FIFO queue and suspends. When the refresh settles, the whole queue
//! is drained with the same outcome: the fresh access token on success, the
//! refresh error on failure.
//!
//! State lives behind a `parking_lot::Mutex` and the lock is only ever held
//! for synchronous check-and-set, enqueue, and drain steps, never across an
//! await. The network call itself runs on a spawned task, so a caller that
//! gets cancelled mid-wait can never strand the queue.

use std::sync::Arc;

use parking_lot::Mutex;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::events::{SessionEventHandler, SessionExpiredReason};
use super::store::TokenStore;
use crate::errors::{error_detail, ApiError};
use crate::http::HttpClient;

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

/// Refresh endpoint payload. The backend returns only a new access token;
/// a rotated refresh token is accepted if one ever appears.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
}

type RefreshOutcome = Result<String, ApiError>;

/// Coordinator state: the in-flight flag plus the FIFO waiter queue.
///
/// Enqueue and drain both happen under the one mutex, so they are mutually
/// exclusive phases of a cycle by construction.
struct RefreshState {
    refreshing: bool,
    waiters: Vec<oneshot::Sender<RefreshOutcome>>,
}

/// Single-flight refresh coordinator.
///
/// One instance per client, shared by every in-flight request. See the
/// module docs for the protocol.
pub struct RefreshCoordinator {
    http: Arc<HttpClient>,
    store: Arc<dyn TokenStore>,
    events: Arc<dyn SessionEventHandler>,
    refresh_url: Url,
    state: Mutex<RefreshState>,
}

impl RefreshCoordinator {
    /// Create a coordinator posting to `refresh_url`.
    pub fn new(
        http: Arc<HttpClient>,
        store: Arc<dyn TokenStore>,
        events: Arc<dyn SessionEventHandler>,
        refresh_url: Url,
    ) -> Self {
        Self {
            http,
            store,
            events,
            refresh_url,
            state: Mutex::new(RefreshState { refreshing: false, waiters: Vec::new() }),
        }
    }

    /// Obtain a fresh access token after a 401.
    ///
    /// Joins the in-flight refresh if one exists, otherwise starts one. The
    /// caller redispatches its original request with the returned token,
    /// exactly once.
    ///
    /// # Errors
    /// - `ApiError::Unauthenticated` when no refresh token is stored (the
    ///   cycle fails without a network call).
    /// - `ApiError::SessionExpired` when the refresh endpoint rejects the
    ///   token or is unreachable.
    /// - `ApiError::Storage` when the new tokens cannot be persisted.
    #[instrument(level = "debug", skip(self))]
    pub async fn refresh_access_token(self: &Arc<Self>) -> RefreshOutcome {
        let (tx, rx) = oneshot::channel();
        let is_driver = {
            let mut state = self.state.lock();
            state.waiters.push(tx);
            if state.refreshing {
                false
            } else {
                state.refreshing = true;
                true
            }
        };

        if is_driver {
            debug!("starting token refresh cycle");
            tokio::spawn(Arc::clone(self).drive());
        } else {
            debug!("queueing behind in-flight token refresh");
        }

        match rx.await {
            Ok(outcome) => outcome,
            // The driver task never drops a sender without settling; this
            // covers a torn-down runtime.
            Err(_) => Err(ApiError::Network("token refresh task terminated unexpectedly".into())),
        }
    }

    /// Runs the refresh cycle to completion and settles every waiter.
    async fn drive(self: Arc<Self>) {
        let outcome = self.execute_refresh().await;

        if let Err(err) = &outcome {
            if let Err(clear_err) = self.store.clear_tokens().await {
                warn!(error = %clear_err, "failed to clear tokens after refresh failure");
            }
            let reason = expiry_reason(err);
            warn!(error = %err, ?reason, "token refresh failed; ending session");
            self.events.on_session_expired(reason).await;
        }

        let waiters = {
            let mut state = self.state.lock();
            state.refreshing = false;
            std::mem::take(&mut state.waiters)
        };

        debug!(waiters = waiters.len(), "settling refresh waiters");
        for waiter in waiters {
            // A dropped receiver means that caller went away; the rest of
            // the queue still settles.
            let _ = waiter.send(outcome.clone());
        }
    }

    async fn execute_refresh(&self) -> RefreshOutcome {
        let refresh_token = match self.store.refresh_token().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                return Err(ApiError::Unauthenticated(
                    "no refresh token stored; sign-in required".into(),
                ));
            }
            Err(err) => {
                warn!(error = %err, "refresh token unreadable; treating as absent");
                return Err(ApiError::Unauthenticated(
                    "refresh token unavailable; sign-in required".into(),
                ));
            }
        };

        // The refresh call carries no bearer header and is never retried:
        // a transient failure ends the session just like a rejection.
        let request = self
            .http
            .request(Method::POST, self.refresh_url.clone())
            .json(&RefreshRequest { refresh: &refresh_token });

        let response = match self.http.send_once(request).await {
            Ok(response) => response,
            Err(err) => return Err(ApiError::SessionExpired(format!("token refresh failed: {err}"))),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::SessionExpired(format!(
                "token refresh rejected (HTTP {}): {}",
                status.as_u16(),
                error_detail(&body)
            )));
        }

        let payload: RefreshResponse = response.json().await.map_err(|err| {
            ApiError::SessionExpired(format!("token refresh returned an unreadable payload: {err}"))
        })?;

        // Keep the old refresh token unless the backend rotated it.
        let next_refresh = payload.refresh.as_deref().unwrap_or(&refresh_token);
        self.store.set_tokens(&payload.access, next_refresh).await?;

        info!(rotated = payload.refresh.is_some(), "access token refreshed");
        Ok(payload.access)
    }
}

fn expiry_reason(err: &ApiError) -> SessionExpiredReason {
    match err {
        ApiError::Unauthenticated(_) => SessionExpiredReason::MissingRefreshToken,
        ApiError::Storage(_) => SessionExpiredReason::StorageFailure,
        _ => SessionExpiredReason::RefreshRejected,
    }
}
