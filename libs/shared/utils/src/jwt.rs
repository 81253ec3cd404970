use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use shared_models::auth::AuthClaims;

/// Signs a non-expiring HS256 token for `email`.
///
/// Tokens never expire unless the claims carry `exp`, which this function
/// does not set. A leaked token therefore stays valid until the secret
/// rotates.
pub fn issue_token(email: &str, jwt_secret: &str) -> Result<String, String> {
    if jwt_secret.is_empty() {
        return Err("JWT secret is not set".to_string());
    }

    let claims = AuthClaims {
        email: email.to_string(),
        iat: Utc::now().timestamp() as u64,
        exp: None,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .map_err(|e| format!("Failed to sign token: {}", e))
}

pub fn validate_token(token: &str, jwt_secret: &str) -> Result<AuthClaims, String> {
    if jwt_secret.is_empty() {
        return Err("JWT secret is not set".to_string());
    }

    let mut validation = Validation::new(Algorithm::HS256);
    // exp is optional, but still checked when present
    validation.required_spec_claims.clear();

    let data = decode::<AuthClaims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        debug!("Token validation failed: {}", e);
        format!("Invalid token: {}", e)
    })?;

    debug!("Token validated successfully for: {}", data.claims.email);
    Ok(data.claims)
}
