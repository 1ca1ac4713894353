//! Class bookings, trial bookings, and the waitlist
//!
//! Bookings tie a customer to a scheduled class. Trial bookings come in
//! from the public marketing form without authentication and can later be
//! converted into full customers. The waitlist holds overflow for classes
//! at capacity.

use std::sync::Arc;

use clubflow_domain::{Booking, Customer, Page, TrialBooking, WaitlistEntry};
use serde::Serialize;
use tracing::{debug, instrument};

use super::client::ApiClient;
use super::query::ListQuery;
use crate::errors::ApiError;

#[derive(Debug, Serialize)]
struct BookingRequest {
    customer: i64,
    schedule: i64,
}

#[derive(Debug, Serialize)]
struct WaitlistRequest {
    schedule: i64,
}

/// Payload for the public trial-booking form (`POST /trial-bookings/`).
#[derive(Debug, Clone, Serialize)]
pub struct NewTrialBooking {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Class the prospect wants to try.
    pub schedule: i64,
}

// === Bookings ===

/// Booking operations.
pub struct BookingsApi {
    client: Arc<ApiClient>,
}

impl BookingsApi {
    /// Create a new bookings API instance.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List bookings; filter by `customer`, `schedule`, or `status` via the
    /// query.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, query))]
    pub async fn list(&self, query: &ListQuery) -> Result<Page<Booking>, ApiError> {
        let page: Page<Booking> = self.client.get_with("/bookings/", query).await?;
        debug!(count = page.results.len(), "bookings listed");
        Ok(page)
    }

    /// Book a customer into a scheduled class.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` when the class is full or the customer is
    /// already booked.
    #[instrument(skip(self), fields(customer_id = customer, schedule_id = schedule))]
    pub async fn create(&self, customer: i64, schedule: i64) -> Result<Booking, ApiError> {
        let booking: Booking =
            self.client.post("/bookings/", &BookingRequest { customer, schedule }).await?;
        debug!(booking_id = booking.id, "booking created");
        Ok(booking)
    }

    /// Fetch a booking by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` with status 404 for an unknown id.
    #[instrument(skip(self), fields(booking_id = id))]
    pub async fn get(&self, id: i64) -> Result<Booking, ApiError> {
        self.client.get(&format!("/bookings/{id}/")).await
    }

    /// Cancel a booking, freeing the spot.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(booking_id = id))]
    pub async fn cancel(&self, id: i64) -> Result<Booking, ApiError> {
        let booking: Booking = self.client.post_empty(&format!("/bookings/{id}/cancel/")).await?;
        debug!(booking_id = id, "booking cancelled");
        Ok(booking)
    }
}

// === Trial bookings ===

/// Trial booking operations.
pub struct TrialBookingsApi {
    client: Arc<ApiClient>,
}

impl TrialBookingsApi {
    /// Create a new trial bookings API instance.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Submit the public trial form. No authentication.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` for validation failures.
    #[instrument(skip(self, trial), fields(schedule_id = trial.schedule))]
    pub async fn submit(&self, trial: &NewTrialBooking) -> Result<TrialBooking, ApiError> {
        let created: TrialBooking = self.client.post_public("/trial-bookings/", trial).await?;
        debug!(trial_id = created.id, "trial booking submitted");
        Ok(created)
    }

    /// List trial bookings (staff view).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, query))]
    pub async fn list(&self, query: &ListQuery) -> Result<Page<TrialBooking>, ApiError> {
        self.client.get_with("/trial-bookings/", query).await
    }

    /// Convert an attended trial into a full customer record.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` when the trial is not in a convertible
    /// state.
    #[instrument(skip(self), fields(trial_id = id))]
    pub async fn convert(&self, id: i64) -> Result<Customer, ApiError> {
        let customer: Customer =
            self.client.post_empty(&format!("/trial-bookings/{id}/convert/")).await?;
        debug!(trial_id = id, customer_id = customer.id, "trial converted to customer");
        Ok(customer)
    }
}

// === Waitlist ===

/// Waitlist operations.
pub struct WaitlistApi {
    client: Arc<ApiClient>,
}

impl WaitlistApi {
    /// Create a new waitlist API instance.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List waitlist entries for a schedule, in position order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(schedule_id = schedule))]
    pub async fn for_schedule(&self, schedule: i64) -> Result<Page<WaitlistEntry>, ApiError> {
        self.client.get_with("/waitlist/", &ListQuery::new().filter("schedule", schedule)).await
    }

    /// Join the waitlist for a full class.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` when the class still has open spots or
    /// the customer is already queued.
    #[instrument(skip(self), fields(schedule_id = schedule))]
    pub async fn join(&self, schedule: i64) -> Result<WaitlistEntry, ApiError> {
        let entry: WaitlistEntry =
            self.client.post("/waitlist/", &WaitlistRequest { schedule }).await?;
        debug!(entry_id = entry.id, position = entry.position, "joined waitlist");
        Ok(entry)
    }

    /// Leave the waitlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(entry_id = id))]
    pub async fn leave(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/waitlist/{id}/")).await?;
        debug!(entry_id = id, "left waitlist");
        Ok(())
    }
}
