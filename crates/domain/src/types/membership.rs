//! Membership plans and customer memberships
//!
//! Lifecycle transitions (activation, expiry, freezing, cancellation) are
//! enforced server-side; these types only carry the resulting state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/* -------------------------------------------------------------------------- */
/* Plans */
/* -------------------------------------------------------------------------- */

/// A purchasable membership plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipPlan {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub duration_days: i64,
    /// Decimal string as serialized by the backend, e.g. `"89.00"`.
    pub price: String,
    /// Class credits included per cycle; `None` means unlimited.
    pub class_credits: Option<i64>,
    pub is_trial: bool,
}

/* -------------------------------------------------------------------------- */
/* Memberships */
/* -------------------------------------------------------------------------- */

/// Lifecycle state of a membership.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    Active,
    Expired,
    Frozen,
    Cancelled,
}

/// A customer's membership in a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub id: i64,
    /// Owning customer id.
    pub customer: i64,
    /// Plan details are nested for display.
    pub plan: MembershipPlan,
    pub status: MembershipStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub frozen_until: Option<NaiveDate>,
    pub auto_renew: bool,
    /// Credits left this cycle; `None` mirrors an unlimited plan.
    pub remaining_credits: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_values() {
        assert_eq!(serde_json::to_string(&MembershipStatus::Active).unwrap(), "\"active\"");
        assert_eq!(serde_json::to_string(&MembershipStatus::Cancelled).unwrap(), "\"cancelled\"");
        let status: MembershipStatus = serde_json::from_str("\"frozen\"").unwrap();
        assert_eq!(status, MembershipStatus::Frozen);
    }

    #[test]
    fn test_membership_deserializes() {
        let json = r#"{
            "id": 7,
            "customer": 12,
            "plan": {
                "id": 2,
                "name": "Unlimited Monthly",
                "description": null,
                "duration_days": 30,
                "price": "129.00",
                "class_credits": null,
                "is_trial": false
            },
            "status": "frozen",
            "start_date": "2026-01-01",
            "end_date": "2026-01-31",
            "frozen_until": "2026-01-20",
            "auto_renew": true,
            "remaining_credits": null
        }"#;

        let membership: Membership = serde_json::from_str(json).unwrap();
        assert_eq!(membership.status, MembershipStatus::Frozen);
        assert_eq!(membership.plan.price, "129.00");
        assert!(membership.plan.class_credits.is_none());
    }
}
