//! Customer records managed by the back office

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A studio customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub emergency_contact: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub joined_at: DateTime<Utc>,
}

impl Customer {
    /// First and last name joined for display.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
