//! # ClubFlow Client
//!
//! Typed async client for the ClubFlow studio-management backend.
//!
//! This crate contains:
//! - The authenticated request pipeline with transparent token refresh
//! - Pluggable token storage (memory, file, OS keychain)
//! - Typed resource APIs for every backend endpoint
//! - Session lifecycle events for host applications
//!
//! ## Authentication model
//!
//! A bearer token is attached from the configured [`auth::TokenStore`]; a
//! 401 triggers exactly one single-flight token refresh shared by every
//! concurrent request, and the original request is redispatched once with
//! the fresh token. When the refresh itself fails the session ends: tokens
//! are cleared and the [`auth::SessionEventHandler`] is notified so the
//! host can return to its sign-in screen.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use clubflow_client::api::{ApiClient, AuthApi, ListQuery, SchedulesApi};
//! use clubflow_client::auth::FileTokenStore;
//! use clubflow_client::config::ClientConfig;
//!
//! # async fn run() -> Result<(), clubflow_client::errors::ApiError> {
//! let client = Arc::new(
//!     ApiClient::builder()
//!         .config(ClientConfig::from_env()?)
//!         .token_store(Arc::new(FileTokenStore::new("/var/lib/clubflow/tokens.json")))
//!         .build()?,
//! );
//!
//! let auth = AuthApi::new(client.clone());
//! let user = auth.login("owner@studio.example", "secret").await?;
//!
//! let schedules = SchedulesApi::new(client.clone());
//! let page = schedules.list(&ListQuery::new().filter("date_from", "2025-07-15")).await?;
//! println!("{}: {} classes scheduled", user.full_name(), page.count);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{ApiClient, ApiClientBuilder, ListQuery};
pub use config::ClientConfig;
pub use errors::{ApiError, ApiErrorCategory};
