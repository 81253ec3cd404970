use axum::{routing::get, Router};

use shared_database::AppState;

use crate::handlers;

pub fn service_routes(state: AppState) -> Router {
    Router::new()
        .route("/service", get(handlers::list_services))
        .route("/available", get(handlers::list_available))
        .with_state(state)
}
