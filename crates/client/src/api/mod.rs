//! ClubFlow API surface
//!
//! HTTP access to the ClubFlow backend: the core request pipeline with
//! transparent token refresh, plus a typed resource API per backend app.
//!
//! # Architecture
//!
//! - Every request flows through [`ApiClient`]; resource APIs never touch
//!   reqwest directly
//! - Bearer attachment and 401 recovery live in the pipeline, so resource
//!   code stays free of auth concerns
//! - Credential submissions (login, password reset, public forms) use the
//!   public dispatch path and can never trigger a refresh cycle
//! - List endpoints share the [`ListQuery`] parameter vocabulary and the
//!   `Page<T>` envelope

pub mod admin;
pub mod auth;
pub mod billing;
pub mod bookings;
pub mod client;
pub mod contact;
pub mod customers;
pub mod memberships;
pub mod query;
pub mod schedules;
pub mod trainers;

pub use admin::AdminApi;
pub use auth::{AuthApi, AuthStatus, UserProfileUpdate};
pub use billing::InvoicesApi;
pub use bookings::{BookingsApi, NewTrialBooking, TrialBookingsApi, WaitlistApi};
pub use client::{ApiClient, ApiClientBuilder};
pub use contact::{ContactApi, NewContactMessage};
pub use customers::{CustomerUpdate, CustomersApi, NewCustomer};
pub use memberships::{MembershipPlansApi, MembershipsApi, NewMembership};
pub use query::ListQuery;
pub use schedules::SchedulesApi;
pub use trainers::TrainersApi;
