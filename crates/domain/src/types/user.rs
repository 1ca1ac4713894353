//! Account profile types
//!
//! The profile returned by the login payload and the `/auth/me/` endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role assigned to an authenticated account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Member,
    Staff,
    Admin,
}

/// Authenticated account profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
}

impl UserProfile {
    /// First and last name joined for display.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
