//! Trainer profiles

use serde::{Deserialize, Serialize};

/// A trainer on the studio's roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trainer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub bio: Option<String>,
    pub specialties: Vec<String>,
    pub is_active: bool,
}

impl Trainer {
    /// First and last name joined for display.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
