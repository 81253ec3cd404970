use std::sync::Arc;

use anyhow::Result;
use serde_json::json;
use tracing::{debug, info, warn};

use shared_database::{AppState, Collection, DocumentStore};
use shared_models::document::{Filter, JsonDocument, UpdateOutcome};

use crate::models::{has_admin_role, UserError, ADMIN_ROLE};

pub struct UserService {
    store: Arc<dyn DocumentStore>,
}

fn by_email(email: &str) -> Filter {
    let mut filter = Filter::new();
    filter.insert("email".to_string(), json!(email));
    filter
}

impl UserService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    /// Creates the user keyed by `email` or overwrites the given fields.
    pub async fn upsert_user(&self, email: &str, fields: JsonDocument) -> Result<UpdateOutcome> {
        debug!("Upserting user: {}", email);

        self.store
            .update_one(Collection::Users, by_email(email), fields, true)
            .await
    }

    pub async fn find_users(&self, filter: Filter) -> Result<Vec<JsonDocument>> {
        debug!("Searching users with filter: {:?}", filter);

        self.store.find(Collection::Users, filter, None).await
    }

    pub async fn is_admin(&self, email: &str) -> Result<bool, UserError> {
        let user = self
            .store
            .find_one(Collection::Users, by_email(email))
            .await?
            .ok_or_else(|| UserError::NotFound { email: email.to_string() })?;

        Ok(has_admin_role(&user))
    }

    /// Grants the admin role to `target` when `requester` already holds it.
    /// The target is not created if it does not exist.
    pub async fn promote_to_admin(&self, requester: &str, target: &str) -> Result<UpdateOutcome, UserError> {
        if !self.is_admin(requester).await? {
            warn!("{} tried to promote {} without admin rights", requester, target);
            return Err(UserError::NotAdmin { email: requester.to_string() });
        }

        let mut fields = JsonDocument::new();
        fields.insert("role".to_string(), json!(ADMIN_ROLE));

        let result = self
            .store
            .update_one(Collection::Users, by_email(target), fields, false)
            .await?;
        info!("{} promoted {} to admin", requester, target);

        Ok(result)
    }
}
