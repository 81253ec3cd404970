use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Json,
};

use shared_database::AppState;
use shared_models::document::{filter_from_query, JsonDocument};
use shared_models::error::AppError;

use crate::models::AvailabilityQuery;
use crate::services::{AvailabilityService, CatalogService};

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<JsonDocument>>, AppError> {
    let services = CatalogService::new(&state)
        .list_names(filter_from_query(params))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(services))
}

#[axum::debug_handler]
pub async fn list_available(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<JsonDocument>>, AppError> {
    let services = AvailabilityService::new(&state)
        .available_on(query.date_or_default())
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(services))
}
