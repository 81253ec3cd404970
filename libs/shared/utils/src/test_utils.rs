use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

use shared_config::{AppConfig, DEFAULT_DB_CLUSTER, DEFAULT_DB_NAME, DEFAULT_PORT};
use shared_database::{AppState, DocumentStore};
use shared_models::auth::AuthClaims;
use shared_models::document::JsonDocument;

pub struct TestConfig {
    pub jwt_secret: String,
    pub mongodb_uri: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            mongodb_uri: "mongodb://localhost:27017".to_string(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            port: DEFAULT_PORT,
            db_user: String::new(),
            db_pass: String::new(),
            db_cluster: DEFAULT_DB_CLUSTER.to_string(),
            db_name: DEFAULT_DB_NAME.to_string(),
            mongodb_uri: Some(self.mongodb_uri.clone()),
            access_token_secret: self.jwt_secret.clone(),
        }
    }

    pub fn to_state(&self, store: Arc<dyn DocumentStore>) -> AppState {
        AppState::new(self.to_app_config(), store)
    }
}

pub struct TestUser {
    pub email: String,
    pub role: Option<String>,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            email: "test@example.com".to_string(),
            role: None,
        }
    }
}

impl TestUser {
    pub fn patient(email: &str) -> Self {
        Self {
            email: email.to_string(),
            role: None,
        }
    }

    pub fn admin(email: &str) -> Self {
        Self {
            email: email.to_string(),
            role: Some("admin".to_string()),
        }
    }

    /// The user as it would be stored in the `users` collection.
    pub fn to_document(&self) -> JsonDocument {
        let mut document = json_doc(json!({ "email": self.email }));
        if let Some(role) = &self.role {
            document.insert("role".to_string(), json!(role));
        }
        document
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let claims = AuthClaims {
            email: user.email.clone(),
            iat: now.timestamp() as u64,
            exp: exp_hours.map(|hours| (now + Duration::hours(hours)).timestamp() as u64),
        };

        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
            .expect("HMAC can take key of any size")
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-2))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", None)
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

/// Unwraps a `json!` object literal into a document.
pub fn json_doc(value: Value) -> JsonDocument {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}
