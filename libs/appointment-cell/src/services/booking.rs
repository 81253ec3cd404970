use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use shared_database::{AppState, Collection, DocumentStore};
use shared_models::document::{Filter, JsonDocument};

use crate::models::{BookingKey, BookingOutcome};

pub struct AppointmentBookingService {
    store: Arc<dyn DocumentStore>,
}

impl AppointmentBookingService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn find_appointments(&self, filter: Filter) -> Result<Vec<JsonDocument>> {
        debug!("Searching appointments with filter: {:?}", filter);

        self.store.find(Collection::Appointments, filter, None).await
    }

    /// Inserts `request` unless the same patient already booked the same
    /// service on the same date.
    ///
    /// The existence check and the insert are separate operations, so two
    /// identical requests racing each other can both be inserted.
    pub async fn book(&self, request: JsonDocument) -> Result<BookingOutcome> {
        let key = BookingKey::from_request(&request);

        if let Some(existing) = self
            .store
            .find_one(Collection::Appointments, key.to_filter())
            .await?
        {
            debug!("Appointment already exists for {:?}", key);
            return Ok(BookingOutcome::AlreadyBooked(existing));
        }

        let result = self.store.insert_one(Collection::Appointments, request).await?;
        info!("Appointment booked for {} on {}", key.email, key.date);

        Ok(BookingOutcome::Booked(result))
    }
}
