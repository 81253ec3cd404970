use anyhow::Result;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, Bson, Document},
    options::{ClientOptions, FindOptions, ServerApi, ServerApiVersion, UpdateOptions},
    Client, Database,
};
use serde_json::Value;
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_models::document::{Filter, InsertOutcome, JsonDocument, UpdateOutcome};

use crate::store::{Collection, DocumentStore};

pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Builds a pooled client for the configured deployment. The driver
    /// connects lazily, so an unreachable server surfaces on first use.
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        let mut options = ClientOptions::parse(config.mongo_uri()).await?;
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        options.app_name = Some("doctors-portal-api".to_string());

        let client = Client::with_options(options)?;
        info!("MongoDB client ready for database {}", config.db_name);

        Ok(Self {
            database: client.database(&config.db_name),
        })
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.database.collection(collection.name())
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(
        &self,
        collection: Collection,
        filter: Filter,
        projection: Option<&'static [&'static str]>,
    ) -> Result<Vec<JsonDocument>> {
        debug!("find on {} with filter {:?}", collection.name(), filter);

        let options = projection.map(|fields| {
            FindOptions::builder()
                .projection(projection_document(fields))
                .build()
        });

        let cursor = self
            .collection(collection)
            .find(bson::to_document(&filter)?, options)
            .await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(to_json_document).collect())
    }

    async fn find_one(&self, collection: Collection, filter: Filter) -> Result<Option<JsonDocument>> {
        debug!("find_one on {} with filter {:?}", collection.name(), filter);

        let found = self
            .collection(collection)
            .find_one(bson::to_document(&filter)?, None)
            .await?;

        Ok(found.map(to_json_document))
    }

    async fn insert_one(&self, collection: Collection, document: JsonDocument) -> Result<InsertOutcome> {
        debug!("insert_one on {}", collection.name());

        let result = self
            .collection(collection)
            .insert_one(bson::to_document(&document)?, None)
            .await?;

        Ok(InsertOutcome {
            acknowledged: true,
            inserted_id: bson_to_json(result.inserted_id),
        })
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Filter,
        fields: JsonDocument,
        upsert: bool,
    ) -> Result<UpdateOutcome> {
        debug!("update_one on {} (upsert: {})", collection.name(), upsert);

        let update = doc! { "$set": bson::to_document(&fields)? };
        let options = UpdateOptions::builder().upsert(upsert).build();

        let result = self
            .collection(collection)
            .update_one(bson::to_document(&filter)?, update, options)
            .await?;

        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: u64::from(result.upserted_id.is_some()),
            upserted_id: result.upserted_id.map(bson_to_json),
        })
    }
}

fn projection_document(fields: &[&str]) -> Document {
    let mut projection = Document::new();
    for field in fields {
        projection.insert(*field, 1);
    }
    projection
}

fn to_json_document(document: Document) -> JsonDocument {
    document
        .into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect()
}

/// Relaxed extended JSON, except object ids which render as bare hex strings.
fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(id) => Value::String(id.to_hex()),
        Bson::Document(document) => Value::Object(to_json_document(document)),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}
