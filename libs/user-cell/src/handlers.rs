use std::collections::HashMap;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};

use shared_database::AppState;
use shared_models::auth::AuthClaims;
use shared_models::document::{filter_from_query, JsonDocument};
use shared_models::error::AppError;
use shared_utils::jwt::issue_token;

use crate::models::{AdminPromotionResponse, AdminStatus, UserError, UserUpsertResponse};
use crate::services::UserService;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound { .. } => AppError::NotFound("User not found".to_string()),
            UserError::NotAdmin { .. } => AppError::Forbidden("forbidden".to_string()),
            UserError::Database(e) => AppError::Database(e.to_string()),
        }
    }
}

/// Saves the user and hands back a fresh access token. There is no
/// credential check on this route. A request without a JSON content type
/// upserts an empty field set.
#[axum::debug_handler]
pub async fn upsert_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
    body: Option<Json<JsonDocument>>,
) -> Result<Json<UserUpsertResponse>, AppError> {
    let fields = body.map(|Json(fields)| fields).unwrap_or_default();
    let result = UserService::new(&state)
        .upsert_user(&email, fields)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let token = issue_token(&email, state.token_secret()).map_err(AppError::Internal)?;

    Ok(Json(UserUpsertResponse { token, result }))
}

#[axum::debug_handler]
pub async fn make_admin(
    State(state): State<AppState>,
    Extension(claims): Extension<AuthClaims>,
    Path(email): Path<String>,
) -> Result<Json<AdminPromotionResponse>, AppError> {
    let result = UserService::new(&state)
        .promote_to_admin(&claims.email, &email)
        .await?;

    Ok(Json(AdminPromotionResponse { success: true, result }))
}

#[axum::debug_handler]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<JsonDocument>>, AppError> {
    let users = UserService::new(&state)
        .find_users(filter_from_query(params))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(users))
}

#[axum::debug_handler]
pub async fn check_admin(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<AdminStatus>, AppError> {
    let admin = UserService::new(&state).is_admin(&email).await?;

    Ok(Json(AdminStatus { admin }))
}
