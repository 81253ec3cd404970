use serde_json::{json, Value};

use shared_models::document::{Filter, InsertOutcome, JsonDocument};

/// Fields that identify a patient's booking for one service on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingKey {
    pub service: Value,
    pub date: Value,
    pub email: Value,
}

impl BookingKey {
    /// Absent fields become `null` predicates, which match bookings that
    /// also lack them.
    pub fn from_request(request: &JsonDocument) -> Self {
        let field = |name: &str| request.get(name).cloned().unwrap_or(Value::Null);

        Self {
            service: field("service"),
            date: field("date"),
            email: field("email"),
        }
    }

    pub fn to_filter(&self) -> Filter {
        let mut filter = Filter::new();
        filter.insert("service".to_string(), self.service.clone());
        filter.insert("date".to_string(), self.date.clone());
        filter.insert("email".to_string(), self.email.clone());
        filter
    }
}

/// Outcome of `POST /appointment`.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    AlreadyBooked(JsonDocument),
    Booked(InsertOutcome),
}

impl BookingOutcome {
    pub fn to_response(&self) -> Value {
        match self {
            BookingOutcome::AlreadyBooked(existing) => json!({
                "success": false,
                "appointment": existing
            }),
            BookingOutcome::Booked(result) => json!({
                "success": true,
                "result": result
            }),
        }
    }
}
