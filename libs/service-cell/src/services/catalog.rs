use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use shared_database::{AppState, Collection, DocumentStore};
use shared_models::document::{Filter, JsonDocument};

const NAME_ONLY: &[&str] = &["name"];

pub struct CatalogService {
    store: Arc<dyn DocumentStore>,
}

impl CatalogService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    /// Service names matching `filter`, in storage order.
    pub async fn list_names(&self, filter: Filter) -> Result<Vec<JsonDocument>> {
        debug!("Listing service names with filter: {:?}", filter);

        self.store
            .find(Collection::Services, filter, Some(NAME_ONLY))
            .await
    }
}
