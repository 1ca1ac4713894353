//! Dashboard statistics

use serde::{Deserialize, Serialize};

/// Counters shown on the admin dashboard.
///
/// All values are computed server-side; the revenue figure arrives as a
/// decimal string like every other money field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    /// Customers with an active membership.
    pub active_members: i64,
    /// Classes scheduled today.
    pub classes_today: i64,
    /// Confirmed bookings for today's classes.
    pub bookings_today: i64,
    /// Customers who joined this calendar month.
    pub new_customers_this_month: i64,
    /// Trial bookings converted to memberships this calendar month.
    pub trial_conversions_this_month: i64,
    /// Month-to-date paid invoice total.
    pub revenue_this_month: String,
    /// Invoices issued or overdue but not yet paid.
    pub unpaid_invoices: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_stats_deserialization() {
        let json = r#"{
            "active_members": 184,
            "classes_today": 6,
            "bookings_today": 47,
            "new_customers_this_month": 12,
            "trial_conversions_this_month": 4,
            "revenue_this_month": "18250.00",
            "unpaid_invoices": 9
        }"#;

        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.active_members, 184);
        assert_eq!(stats.revenue_this_month, "18250.00");
    }
}
