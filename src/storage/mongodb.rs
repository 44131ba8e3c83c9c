//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides a `MongoDataService<T>` implementation backed by a MongoDB
//! database via `mongodb::Database`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! bureau = { version = "0.1", features = ["mongodb_backend"] }
//! ```
//!
//! # Storage model
//!
//! A **collection-per-entity-type** pattern: each `MongoDataService<T>`
//! operates on a collection named after `T::resource_name()` (e.g.,
//! "customers", "projects").
//!
//! # Serialization strategy
//!
//! Entities are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON documents. This ensures consistent handling of
//! UUID (stored as strings) and DateTime (stored as ISO 8601 strings) types.
//! The `id` field is mapped to MongoDB's `_id` convention.

use crate::core::{DataService, Document};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{Bson, Document as BsonDocument, doc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an Object) into a BSON
/// document, renaming `id` → `_id` for MongoDB convention.
fn json_to_document(json: serde_json::Value) -> Result<BsonDocument> {
    let bson_val = mongodb::bson::to_bson(&json)
        .map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => return Err(anyhow!("Expected BSON document, got non-object")),
    };

    // MongoDB convention: rename id → _id
    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Convert a BSON document back into a serde_json::Value,
/// renaming `_id` → `id` for domain entity convention.
fn document_to_json(mut doc: BsonDocument) -> serde_json::Value {
    // MongoDB convention: rename _id → id
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

/// Convert a UUID to its BSON string representation for queries.
fn uuid_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

// ---------------------------------------------------------------------------
// MongoDataService<T>
// ---------------------------------------------------------------------------

/// Generic document storage service backed by MongoDB.
///
/// Each entity type gets its own collection, named by `T::resource_name()`
/// (the pluralized entity name, e.g., "customers", "projects").
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use bureau::storage::MongoDataService;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let db = client.database("bureau");
/// let customers = MongoDataService::<Customer>::new(db);
/// let customer = customers.create(new_customer).await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoDataService<T> {
    database: Database,
    _marker: std::marker::PhantomData<T>,
}

impl<T> MongoDataService<T> {
    /// Create a new `MongoDataService` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self {
            database,
            _marker: std::marker::PhantomData,
        }
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }
}

impl<T: Document + Serialize + DeserializeOwned> MongoDataService<T> {
    /// Get the MongoDB collection for this entity type.
    fn collection(&self) -> mongodb::Collection<BsonDocument> {
        self.database.collection(T::resource_name())
    }

    /// Convert a domain entity into a MongoDB document.
    fn entity_to_document(entity: &T) -> Result<BsonDocument> {
        let json = serde_json::to_value(entity)
            .map_err(|e| anyhow!("Failed to serialize entity: {}", e))?;
        json_to_document(json)
    }

    /// Convert a MongoDB document back into a domain entity.
    fn document_to_entity(doc: BsonDocument) -> Result<T> {
        let json = document_to_json(doc);
        serde_json::from_value(json)
            .map_err(|e| anyhow!("Failed to deserialize entity from document: {}", e))
    }
}

#[async_trait]
impl<T: Document + Serialize + DeserializeOwned> DataService<T> for MongoDataService<T> {
    /// Insert a new entity into the collection.
    ///
    /// Inserts the document and reads it back to return the stored version.
    async fn create(&self, entity: T) -> Result<T> {
        let doc = Self::entity_to_document(&entity)?;
        let id_bson = uuid_bson(&entity.id());

        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to create entity: {}", e))?;

        // Read back the inserted entity
        let result = self
            .collection()
            .find_one(doc! { "_id": id_bson })
            .await
            .map_err(|e| anyhow!("Failed to read back created entity: {}", e))?
            .ok_or_else(|| anyhow!("Entity not found after insert"))?;

        Self::document_to_entity(result)
    }

    /// Fetch an entity by UUID.
    ///
    /// Returns `Ok(None)` if the entity does not exist.
    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to get entity: {}", e))?;

        match doc {
            Some(d) => Ok(Some(Self::document_to_entity(d)?)),
            None => Ok(None),
        }
    }

    /// List all entities, ordered by creation time (newest first).
    async fn list(&self) -> Result<Vec<T>> {
        let cursor = self
            .collection()
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| anyhow!("Failed to list entities: {}", e))?;

        let docs: Vec<BsonDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect entities: {}", e))?;

        docs.into_iter().map(Self::document_to_entity).collect()
    }

    /// Replace an existing entity.
    ///
    /// Returns `Err` if the entity does not exist (no document matched).
    async fn update(&self, id: &Uuid, entity: T) -> Result<T> {
        let doc = Self::entity_to_document(&entity)?;
        let id_bson = uuid_bson(id);

        let result = self
            .collection()
            .replace_one(doc! { "_id": &id_bson }, doc)
            .await
            .map_err(|e| anyhow!("Failed to update entity: {}", e))?;

        if result.matched_count == 0 {
            return Err(anyhow!("{} not found", T::resource_name_singular()));
        }

        // Read back the updated entity
        let updated = self
            .collection()
            .find_one(doc! { "_id": id_bson })
            .await
            .map_err(|e| anyhow!("Failed to read back updated entity: {}", e))?
            .ok_or_else(|| anyhow!("Entity not found after update"))?;

        Self::document_to_entity(updated)
    }

    /// Delete an entity by UUID. Returns whether a document was removed.
    async fn delete(&self, id: &Uuid) -> Result<bool> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to delete entity: {}", e))?;

        Ok(result.deleted_count > 0)
    }

    /// Search entities by field value.
    ///
    /// Since `DataService::search` receives both field and value as strings,
    /// but MongoDB stores values with native BSON types (integers, booleans,
    /// floats), we use `$in` with multiple type variants to match correctly.
    ///
    /// For example, searching for `("base_price", "100")` matches documents
    /// where `base_price` is either the string `"100"` or the number `100`.
    async fn search(&self, field: &str, value: &str) -> Result<Vec<T>> {
        // Build a list of BSON values to match (string + native type)
        let mut variants: Vec<Bson> = vec![Bson::String(value.to_string())];

        match value {
            "true" => variants.push(Bson::Boolean(true)),
            "false" => variants.push(Bson::Boolean(false)),
            _ => {
                if let Ok(i) = value.parse::<i64>() {
                    variants.push(Bson::Int64(i));
                }
                if let Ok(f) = value.parse::<f64>() {
                    variants.push(Bson::Double(f));
                }
            }
        }

        let filter = if variants.len() == 1 {
            doc! { field: variants.into_iter().next().unwrap() }
        } else {
            doc! { field: { "$in": variants } }
        };

        let cursor = self
            .collection()
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| anyhow!("Failed to search entities: {}", e))?;

        let docs: Vec<BsonDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect search results: {}", e))?;

        docs.into_iter().map(Self::document_to_entity).collect()
    }
}
