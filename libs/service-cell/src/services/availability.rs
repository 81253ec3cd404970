use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use serde_json::{json, Value};
use tracing::debug;

use shared_database::{AppState, Collection, DocumentStore};
use shared_models::document::{Filter, JsonDocument};

pub struct AvailabilityService {
    store: Arc<dyn DocumentStore>,
}

impl AvailabilityService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    /// Every service with the slots still free on `date`.
    pub async fn available_on(&self, date: &str) -> Result<Vec<JsonDocument>> {
        debug!("Computing availability for {}", date);

        let services = self.store.find(Collection::Services, Filter::new(), None).await?;

        let mut filter = Filter::new();
        filter.insert("date".to_string(), json!(date));
        let bookings = self.store.find(Collection::Appointments, filter, None).await?;

        debug!("{} services, {} bookings on {}", services.len(), bookings.len(), date);

        Ok(compute_availability(services, &bookings))
    }
}

/// Adds an `available` array to each service: its `slots` minus every time
/// booked for that service. Bookings are expected to be for a single date
/// already. Only string names, services and times take part in matching; a
/// service without a `slots` array gets `available: []`.
pub fn compute_availability(services: Vec<JsonDocument>, bookings: &[JsonDocument]) -> Vec<JsonDocument> {
    services
        .into_iter()
        .map(|mut service| {
            let name = service.get("name").and_then(Value::as_str);
            let booked: HashSet<&str> = bookings
                .iter()
                .filter(|booking| name.is_some() && booking.get("service").and_then(Value::as_str) == name)
                .filter_map(|booking| booking.get("time").and_then(Value::as_str))
                .collect();

            let available: Vec<Value> = service
                .get("slots")
                .and_then(Value::as_array)
                .map(|slots| {
                    slots
                        .iter()
                        .filter(|slot| slot.as_str().map_or(true, |label| !booked.contains(label)))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();

            service.insert("available".to_string(), Value::Array(available));
            service
        })
        .collect()
}
