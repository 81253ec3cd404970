use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use shared_database::AppState;
use shared_models::error::AppError;

use crate::jwt::validate_token;

// Missing header is 401; anything wrong with a header that is present is 403.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(AppError::unauthorized_access)?;

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|value| value.split(' ').nth(1))
        .ok_or_else(|| {
            debug!("Authorization header carries no bearer token");
            AppError::forbidden_access()
        })?;

    let claims = validate_token(token, state.token_secret())
        .map_err(|_| AppError::forbidden_access())?;

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
