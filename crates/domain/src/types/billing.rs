//! Invoices
//!
//! All amounts (including GST) are computed server-side and serialized as
//! decimal strings. The client renders them verbatim and never does money
//! arithmetic.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an invoice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Issued,
    Paid,
    Overdue,
    Void,
}

/// One line item of an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub description: String,
    pub quantity: i64,
    /// Decimal string, e.g. `"25.00"`.
    pub unit_price: String,
    /// Decimal string; quantity times unit price as computed server-side.
    pub amount: String,
}

/// An invoice issued to a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    /// Human-facing invoice number, e.g. `"INV-2026-0042"`.
    pub number: String,
    pub customer: i64,
    pub customer_name: String,
    pub status: InvoiceStatus,
    pub issued_at: NaiveDate,
    pub due_date: NaiveDate,
    /// Decimal string.
    pub subtotal: String,
    /// GST portion as a decimal string.
    pub gst_amount: String,
    /// Decimal string; subtotal plus GST.
    pub total: String,
    pub lines: Vec<InvoiceLine>,
    pub paid_at: Option<DateTime<Utc>>,
}
