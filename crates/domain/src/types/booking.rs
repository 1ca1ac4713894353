//! Bookings, trial bookings, and waitlist entries
//!
//! Waitlist promotion and trial-to-member conversion run server-side; the
//! client only reads the resulting records and invokes the documented
//! endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/* -------------------------------------------------------------------------- */
/* Member Bookings */
/* -------------------------------------------------------------------------- */

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Attended,
    NoShow,
}

/// A member's booking of a class session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub customer: i64,
    /// Booked schedule entry id.
    pub schedule: i64,
    /// Class name, denormalized by the backend for list rendering.
    pub class_name: String,
    pub starts_at: DateTime<Utc>,
    pub status: BookingStatus,
    pub booked_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

/* -------------------------------------------------------------------------- */
/* Trial Bookings */
/* -------------------------------------------------------------------------- */

/// Lifecycle state of a trial booking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrialStatus {
    Pending,
    Confirmed,
    Attended,
    Converted,
    Cancelled,
}

/// A prospect's trial class booking, created from the public site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBooking {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub schedule: i64,
    pub class_name: String,
    pub starts_at: DateTime<Utc>,
    pub status: TrialStatus,
    pub created_at: DateTime<Utc>,
    /// Customer created by conversion, once it happened.
    pub converted_customer: Option<i64>,
}

/* -------------------------------------------------------------------------- */
/* Waitlist */
/* -------------------------------------------------------------------------- */

/// A member's place in a full session's waitlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: i64,
    pub customer: i64,
    pub schedule: i64,
    pub class_name: String,
    /// 1-based position; recomputed server-side as entries leave.
    pub position: i64,
    pub joined_at: DateTime<Utc>,
    pub notified_at: Option<DateTime<Utc>>,
}
