use serde::{Deserialize, Serialize};
use serde_json::Value;

use shared_models::document::{JsonDocument, UpdateOutcome};

pub const ADMIN_ROLE: &str = "admin";

/// Only the literal string `"admin"` in `role` grants admin rights.
pub fn has_admin_role(user: &JsonDocument) -> bool {
    matches!(user.get("role"), Some(Value::String(role)) if role == ADMIN_ROLE)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpsertResponse {
    pub token: String,
    pub result: UpdateOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminPromotionResponse {
    pub success: bool,
    pub result: UpdateOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStatus {
    pub admin: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User not found: {email}")]
    NotFound { email: String },

    #[error("{email} is not allowed to grant admin rights")]
    NotAdmin { email: String },

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
