//! Authentication stack: token storage, bearer attachment, and recovery
//!
//! Every authenticated request flows through this module twice: once on the
//! way out (bearer attachment) and, on a 401, once on the way back (token
//! refresh and redispatch).
//!
//! # Features
//!
//! - **Pluggable Storage**: memory, owner-only JSON file, or OS keychain
//! - **Single-Flight Refresh**: concurrent 401s share one refresh call
//! - **FIFO Waiter Queue**: queued requests settle in enqueue order
//! - **Session Events**: fatal auth failures surface as one host callback
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │    ApiClient     │  Request pipeline (crate::api)
//! └────────┬─────────┘
//!          │
//!          ├──► AuthInterceptor     (attach bearer if stored)
//!          │         │
//!          │         └──► TokenStore        (memory / file / keychain)
//!          │
//!          └──► RefreshCoordinator  (single-flight refresh on 401)
//!                    │
//!                    ├──► TokenStore        (read refresh, persist pair)
//!                    └──► SessionEventHandler  (fatal-failure hook)
//! ```
//!
//! The refresh POST bypasses the interceptor: it must never carry a bearer
//! header and its failure ends the session rather than retrying.

pub mod events;
pub mod interceptor;
pub mod keyring;
pub mod refresh;
pub mod store;

pub use events::{LogSessionEvents, SessionEventHandler, SessionExpiredReason};
pub use interceptor::AuthInterceptor;
pub use keyring::KeyringTokenStore;
pub use refresh::RefreshCoordinator;
pub use store::{
    FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreError, ACCESS_TOKEN_KEY,
    REFRESH_TOKEN_KEY,
};
