//! Domain types and models
//!
//! Every struct here mirrors a backend payload field-for-field. The wire
//! format is snake_case JSON with integer primary keys; money fields arrive
//! as decimal strings and are kept as strings (display, never arithmetic).

pub mod billing;
pub mod booking;
pub mod contact;
pub mod customer;
pub mod membership;
pub mod page;
pub mod schedule;
pub mod stats;
pub mod trainer;
pub mod user;

// Re-export for convenience
pub use billing::{Invoice, InvoiceLine, InvoiceStatus};
pub use booking::{Booking, BookingStatus, TrialBooking, TrialStatus, WaitlistEntry};
pub use contact::ContactMessage;
pub use customer::Customer;
pub use membership::{Membership, MembershipPlan, MembershipStatus};
pub use page::Page;
pub use schedule::ClassSchedule;
pub use stats::DashboardStats;
pub use trainer::Trainer;
pub use user::{UserProfile, UserRole};
