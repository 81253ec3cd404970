use std::collections::HashMap;

use axum::{
    extract::{Extension, Query, State},
    Json,
};
use serde_json::Value;
use tracing::warn;

use shared_database::AppState;
use shared_models::auth::AuthClaims;
use shared_models::document::{filter_from_query, JsonDocument};
use shared_models::error::AppError;

use crate::services::booking::AppointmentBookingService;

/// A patient's own appointments. The `email` query parameter must name the
/// token holder; every query parameter is applied as a filter.
#[axum::debug_handler]
pub async fn get_my_appointments(
    State(state): State<AppState>,
    Extension(claims): Extension<AuthClaims>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<JsonDocument>>, AppError> {
    if params.get("email") != Some(&claims.email) {
        warn!("{} requested appointments of another patient", claims.email);
        return Err(AppError::forbidden_access());
    }

    let appointments = AppointmentBookingService::new(&state)
        .find_appointments(filter_from_query(params))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<AppState>,
    Json(request): Json<JsonDocument>,
) -> Result<Json<Value>, AppError> {
    let outcome = AppointmentBookingService::new(&state)
        .book(request)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(outcome.to_response()))
}
