//! In-memory implementation of DataService for testing and development

use crate::core::{DataService, Document};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory document service implementation
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Listing mirrors the MongoDB backend's ordering: newest first.
#[derive(Clone)]
pub struct InMemoryDataService<T> {
    documents: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T> InMemoryDataService<T> {
    /// Create a new in-memory document service
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<T> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Document + Serialize> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, entity: T) -> Result<T> {
        let mut documents = self
            .documents
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        documents.insert(entity.id(), entity.clone());

        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        let documents = self
            .documents
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(documents.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>> {
        let documents = self
            .documents
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut all: Vec<T> = documents.values().cloned().collect();
        all.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        Ok(all)
    }

    async fn update(&self, id: &Uuid, entity: T) -> Result<T> {
        let mut documents = self
            .documents
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        documents
            .get_mut(id)
            .ok_or_else(|| anyhow!("{} not found", T::resource_name_singular()))?;

        documents.insert(*id, entity.clone());

        Ok(entity)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool> {
        let mut documents = self
            .documents
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(documents.remove(id).is_some())
    }

    async fn search(&self, field: &str, value: &str) -> Result<Vec<T>> {
        let documents = self
            .documents
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut matches = Vec::new();
        for entity in documents.values() {
            let json = serde_json::to_value(entity)
                .map_err(|e| anyhow!("Failed to serialize entity: {}", e))?;

            if field_matches(json.get(field), value) {
                matches.push(entity.clone());
            }
        }

        matches.sort_by(|a: &T, b: &T| b.created_at().cmp(&a.created_at()));
        Ok(matches)
    }
}

/// Compare a JSON field against a search string, matching the MongoDB
/// backend's behavior: the raw string plus native-typed variants.
fn field_matches(field: Option<&serde_json::Value>, value: &str) -> bool {
    let Some(field) = field else {
        return false;
    };

    match field {
        serde_json::Value::String(s) => s == value,
        serde_json::Value::Bool(b) => value.parse::<bool>() == Ok(*b),
        serde_json::Value::Number(n) => {
            if let (Some(i), Ok(parsed)) = (n.as_i64(), value.parse::<i64>()) {
                return i == parsed;
            }
            if let (Some(f), Ok(parsed)) = (n.as_f64(), value.parse::<f64>()) {
                return f == parsed;
            }
            false
        }
        _ => false,
    }
}
