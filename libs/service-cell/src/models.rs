use serde::Deserialize;

/// Date used by `/available` when the caller does not pass one.
pub const DEFAULT_AVAILABILITY_DATE: &str = "May 18, 2022";

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<String>,
}

impl AvailabilityQuery {
    /// Falls back to the default date when absent or empty.
    pub fn date_or_default(&self) -> &str {
        match self.date.as_deref() {
            Some(date) if !date.is_empty() => date,
            _ => DEFAULT_AVAILABILITY_DATE,
        }
    }
}
