//! Contact messages submitted from the public site

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message from the public contact form, triaged in the back office.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
}
