//! # ClubFlow Domain
//!
//! Data types shared across the ClubFlow client stack.
//!
//! This crate contains:
//! - Entity models (customers, memberships, bookings, invoices, ...)
//! - Status enums matching the backend's wire values
//! - The paginated list envelope returned by every collection endpoint
//!
//! ## Architecture
//! - No dependencies on other ClubFlow crates
//! - Only external dependencies allowed
//! - Pure data models and serde contracts; no IO, no HTTP

pub mod types;

// Re-export commonly used items
pub use types::*;
