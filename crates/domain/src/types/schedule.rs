//! Class schedule entries
//!
//! A schedule entry is one concrete session of a class (not a weekly
//! template). Capacity accounting happens server-side; `booked_count` is a
//! read-only projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scheduled class session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSchedule {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Assigned trainer id.
    pub trainer: i64,
    /// Trainer display name, denormalized by the backend.
    pub trainer_name: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub capacity: i64,
    pub booked_count: i64,
    pub location: Option<String>,
    pub is_active: bool,
}

impl ClassSchedule {
    /// Remaining open spots, never negative.
    pub fn spots_left(&self) -> i64 {
        (self.capacity - self.booked_count).max(0)
    }

    /// Returns true when the session has no open spots.
    pub fn is_full(&self) -> bool {
        self.booked_count >= self.capacity
    }
}
