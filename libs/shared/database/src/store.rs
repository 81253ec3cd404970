use anyhow::Result;
use async_trait::async_trait;

use shared_models::document::{Filter, InsertOutcome, JsonDocument, UpdateOutcome};

/// The three collections the portal reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Services,
    Appointments,
    Users,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Services => "services",
            Collection::Appointments => "appointments",
            Collection::Users => "users",
        }
    }
}

/// Document database operations used by the route handlers.
///
/// Filters are equality predicates; a `null` predicate matches a missing
/// field, and a scalar predicate also matches an array field containing it.
/// Returned documents carry their id as a hex string under `_id`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All matching documents in natural order. With a projection only `_id`
    /// and the listed fields are returned.
    async fn find(
        &self,
        collection: Collection,
        filter: Filter,
        projection: Option<&'static [&'static str]>,
    ) -> Result<Vec<JsonDocument>>;

    async fn find_one(&self, collection: Collection, filter: Filter) -> Result<Option<JsonDocument>>;

    async fn insert_one(&self, collection: Collection, document: JsonDocument) -> Result<InsertOutcome>;

    /// Applies `$set: fields` to the first match, inserting when `upsert` is
    /// set and nothing matched.
    async fn update_one(
        &self,
        collection: Collection,
        filter: Filter,
        fields: JsonDocument,
        upsert: bool,
    ) -> Result<UpdateOutcome>;
}
