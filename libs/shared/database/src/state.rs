use std::sync::Arc;

use shared_config::AppConfig;

use crate::store::DocumentStore;

/// Everything a request handler may touch: configuration (including the
/// token secret) and the shared store handle.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    pub fn token_secret(&self) -> &str {
        &self.config.access_token_secret
    }
}
