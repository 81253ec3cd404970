use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use tokio::sync::RwLock;

use shared_models::document::{Filter, InsertOutcome, JsonDocument, UpdateOutcome};

use crate::store::{Collection, DocumentStore};

/// In-process `DocumentStore` with the same filter semantics as the
/// MongoDB store. Used to drive the routers in tests and local demos.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<JsonDocument>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts documents as-is, assigning an `_id` where one is missing.
    pub async fn seed(&self, collection: Collection, documents: Vec<JsonDocument>) {
        let mut collections = self.collections.write().await;
        let entries = collections.entry(collection).or_default();
        for mut document in documents {
            ensure_id(&mut document);
            entries.push(document);
        }
    }

    pub async fn count(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(
        &self,
        collection: Collection,
        filter: Filter,
        projection: Option<&'static [&'static str]>,
    ) -> Result<Vec<JsonDocument>> {
        let collections = self.collections.read().await;
        let Some(documents) = collections.get(&collection) else {
            return Ok(Vec::new());
        };

        Ok(documents
            .iter()
            .filter(|document| matches_filter(document, &filter))
            .map(|document| match projection {
                Some(fields) => project(document, fields),
                None => document.clone(),
            })
            .collect())
    }

    async fn find_one(&self, collection: Collection, filter: Filter) -> Result<Option<JsonDocument>> {
        let collections = self.collections.read().await;

        Ok(collections
            .get(&collection)
            .and_then(|documents| documents.iter().find(|document| matches_filter(document, &filter)))
            .cloned())
    }

    async fn insert_one(&self, collection: Collection, mut document: JsonDocument) -> Result<InsertOutcome> {
        let inserted_id = ensure_id(&mut document);
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(document);

        Ok(InsertOutcome {
            acknowledged: true,
            inserted_id,
        })
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Filter,
        fields: JsonDocument,
        upsert: bool,
    ) -> Result<UpdateOutcome> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();

        if let Some(document) = documents.iter_mut().find(|document| matches_filter(document, &filter)) {
            let mut modified = false;
            for (key, value) in fields {
                if document.get(&key) != Some(&value) {
                    document.insert(key, value);
                    modified = true;
                }
            }

            return Ok(UpdateOutcome {
                acknowledged: true,
                matched_count: 1,
                modified_count: u64::from(modified),
                upserted_count: 0,
                upserted_id: None,
            });
        }

        if !upsert {
            return Ok(UpdateOutcome {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
                upserted_count: 0,
                upserted_id: None,
            });
        }

        // The new document starts from the filter's equality fields.
        let mut document: JsonDocument = filter
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .collect();
        document.extend(fields);
        let upserted_id = ensure_id(&mut document);
        documents.push(document);

        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id: Some(upserted_id),
        })
    }
}

fn ensure_id(document: &mut JsonDocument) -> Value {
    document
        .entry("_id")
        .or_insert_with(|| Value::String(ObjectId::new().to_hex()))
        .clone()
}

fn matches_filter(document: &JsonDocument, filter: &Filter) -> bool {
    filter
        .iter()
        .all(|(key, expected)| matches_value(document.get(key), expected))
}

fn matches_value(actual: Option<&Value>, expected: &Value) -> bool {
    match (actual, expected) {
        (None, Value::Null) => true,
        (None, _) => false,
        (Some(Value::Array(items)), expected) if !expected.is_array() => {
            items.iter().any(|item| item == expected)
        }
        (Some(actual), expected) => actual == expected,
    }
}

fn project(document: &JsonDocument, fields: &[&str]) -> JsonDocument {
    document
        .iter()
        .filter(|(key, _)| key.as_str() == "_id" || fields.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
