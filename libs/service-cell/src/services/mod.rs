pub mod availability;
pub mod catalog;

pub use availability::{compute_availability, AvailabilityService};
pub use catalog::CatalogService;
