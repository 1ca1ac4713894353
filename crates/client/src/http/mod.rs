//! HTTP transport layer
//!
//! Wraps `reqwest` with default headers, timeouts, and bounded retry of
//! transient failures. Auth semantics live a layer up in [`crate::api`].

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
