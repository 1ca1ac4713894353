//! Session lifecycle events
//!
//! When the refresh protocol declares a session dead, the client emits one
//! event through this seam instead of forcing any navigation itself. The
//! hosting application decides what "go to login" means for it.

use async_trait::async_trait;
use tracing::warn;

/// Why the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExpiredReason {
    /// A 401 arrived and no refresh token was stored.
    MissingRefreshToken,
    /// The refresh endpoint rejected the refresh token (or was unreachable).
    RefreshRejected,
    /// Tokens could not be read from or written to the store.
    StorageFailure,
}

/// Host hook invoked on fatal authentication failure.
///
/// Called at most once per refresh cycle, after local tokens are cleared
/// and before queued requests are rejected. Implementations should return
/// quickly; long work belongs on the host's own tasks.
#[async_trait]
pub trait SessionEventHandler: Send + Sync {
    /// The session is over; the user must sign in again.
    async fn on_session_expired(&self, reason: SessionExpiredReason);
}

/// Default handler: records the expiry in the log and nothing else.
#[derive(Debug, Default)]
pub struct LogSessionEvents;

#[async_trait]
impl SessionEventHandler for LogSessionEvents {
    async fn on_session_expired(&self, reason: SessionExpiredReason) {
        warn!(?reason, "session expired; sign-in required");
    }
}
