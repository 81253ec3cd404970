use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A schema-less document as it crosses the store boundary.
pub type JsonDocument = Map<String, Value>;

/// Field -> value equality predicates.
pub type Filter = Map<String, Value>;

/// Builds an equality filter from flat query-string parameters.
pub fn filter_from_query(params: HashMap<String, String>) -> Filter {
    params
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}

/// Result of a single-document insert, shaped like the driver acknowledgement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub acknowledged: bool,
    pub inserted_id: Value,
}

/// Result of a single-document update or upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<Value>,
}
