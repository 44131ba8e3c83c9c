//! Generic CRUD handlers for document entities
//!
//! One handler set serves every entity type: the entity registry
//! instantiates these generics per entity and mounts them under
//! `/api/{plural}`. All responses use the uniform envelope, identifiers are
//! passed as path parameters, and reads accept `?populate=true` to resolve
//! reference fields into full documents.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::entity::{Document, Entity};
use crate::core::envelope::ApiResponse;
use crate::core::error::{EntityError, Error, RequestError};
use crate::core::service::{DataService, EntityFetcher};
use crate::core::validation::{ValidatableEntity, Validated};

/// Shared state for one entity's handlers
pub struct EntityState<T: Document> {
    pub service: Arc<dyn DataService<T>>,
    /// Fetchers for every registered entity type, keyed by singular name.
    /// Used to resolve this entity's reference fields on populate.
    pub fetchers: Arc<HashMap<String, Arc<dyn EntityFetcher>>>,
}

impl<T: Document> Clone for EntityState<T> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            fetchers: self.fetchers.clone(),
        }
    }
}

/// Query parameters accepted by the read endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ReadParams {
    #[serde(default)]
    pub populate: bool,
}

/// GET /api/{plural}: list all documents, newest first
pub async fn list_entities<T>(
    State(state): State<EntityState<T>>,
    Query(params): Query<ReadParams>,
) -> Result<Json<ApiResponse>, Error>
where
    T: Document + serde::Serialize,
{
    let entities = state.service.list().await?;
    let mut data = serde_json::to_value(&entities)?;

    if params.populate {
        if let Value::Array(rows) = &mut data {
            for row in rows {
                populate_references::<T>(&state, row).await;
            }
        }
    }

    Ok(Json(ApiResponse::success(data)))
}

/// GET /api/{plural}/{id}: fetch one document
pub async fn get_entity<T>(
    State(state): State<EntityState<T>>,
    Path(id): Path<String>,
    Query(params): Query<ReadParams>,
) -> Result<Json<ApiResponse>, Error>
where
    T: Document + serde::Serialize,
{
    let id = parse_entity_id(&id)?;
    let entity = state
        .service
        .get(&id)
        .await?
        .ok_or_else(|| EntityError::not_found(T::resource_name_singular(), id))?;

    let mut data = serde_json::to_value(&entity)?;
    if params.populate {
        populate_references::<T>(&state, &mut data).await;
    }

    Ok(Json(ApiResponse::success(data)))
}

/// POST /api/{plural}: create a document from a validated payload
pub async fn create_entity<T>(
    State(state): State<EntityState<T>>,
    payload: Validated<T>,
) -> Result<(StatusCode, Json<ApiResponse>), Error>
where
    T: Document + ValidatableEntity + serde::Serialize + DeserializeOwned,
{
    let mut object = match payload.into_inner() {
        Value::Object(map) => map,
        _ => {
            return Err(RequestError::InvalidBody {
                message: "expected a JSON object".to_string(),
            }
            .into());
        }
    };

    inject_base_fields::<T>(&mut object);

    let entity: T = serde_json::from_value(Value::Object(object)).map_err(|e| {
        Error::Request(RequestError::InvalidBody {
            message: e.to_string(),
        })
    })?;

    let created = state.service.create(entity).await?;
    tracing::info!(
        entity_type = T::resource_name_singular(),
        id = %created.id(),
        "document created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(serde_json::to_value(&created)?)),
    ))
}

/// PUT/PATCH /api/{plural}/{id}: merge-patch an existing document
///
/// Fetches the current document, shallow-merges the supplied fields over it
/// (base fields `id`, `type` and `created_at` cannot be overwritten), bumps
/// `updated_at`, and persists the merged result. Unspecified fields are left
/// unchanged.
pub async fn update_entity<T>(
    State(state): State<EntityState<T>>,
    Path(id): Path<String>,
    payload: Validated<T>,
) -> Result<Json<ApiResponse>, Error>
where
    T: Document + ValidatableEntity + serde::Serialize + DeserializeOwned,
{
    let id = parse_entity_id(&id)?;
    let existing = state
        .service
        .get(&id)
        .await?
        .ok_or_else(|| EntityError::not_found(T::resource_name_singular(), id))?;

    let mut merged = match serde_json::to_value(&existing)? {
        Value::Object(map) => map,
        _ => {
            return Err(Error::Internal(
                "stored document is not a JSON object".to_string(),
            ));
        }
    };

    if let Value::Object(patch) = payload.into_inner() {
        for (key, value) in patch {
            if matches!(key.as_str(), "id" | "type" | "created_at") {
                continue;
            }
            merged.insert(key, value);
        }
    }

    merged.insert(
        "updated_at".to_string(),
        serde_json::to_value(chrono::Utc::now())?,
    );

    let entity: T = serde_json::from_value(Value::Object(merged)).map_err(|e| {
        Error::Request(RequestError::InvalidBody {
            message: e.to_string(),
        })
    })?;

    let updated = state.service.update(&id, entity).await?;
    Ok(Json(ApiResponse::success(serde_json::to_value(&updated)?)))
}

/// DELETE /api/{plural}/{id}: remove a document
pub async fn delete_entity<T>(
    State(state): State<EntityState<T>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, Error>
where
    T: Document,
{
    let id = parse_entity_id(&id)?;
    let removed = state.service.delete(&id).await?;

    if !removed {
        return Err(EntityError::not_found(T::resource_name_singular(), id).into());
    }

    tracing::info!(
        entity_type = T::resource_name_singular(),
        %id,
        "document deleted"
    );

    Ok(Json(ApiResponse::message(format!(
        "{} deleted",
        T::resource_name_singular()
    ))))
}

/// Parse a path segment into a UUID, with an envelope-shaped 400 on failure
fn parse_entity_id(raw: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(raw).map_err(|_| {
        Error::Request(RequestError::InvalidEntityId {
            id: raw.to_string(),
        })
    })
}

/// Resolve reference fields of one serialized document in place.
///
/// For each `(field, entity_type)` pair in `T::references()`, a UUID string
/// in `field` is replaced by the referenced document fetched through the
/// registered fetcher. Dangling references and fetch failures leave the raw
/// id untouched so a read never fails because of a missing neighbor.
async fn populate_references<T: Document>(state: &EntityState<T>, row: &mut Value) {
    let Some(object) = row.as_object_mut() else {
        return;
    };

    for (field, ref_type) in T::references() {
        let Some(raw) = object.get(*field).and_then(Value::as_str) else {
            continue;
        };
        let Ok(ref_id) = Uuid::parse_str(raw) else {
            continue;
        };
        let Some(fetcher) = state.fetchers.get(*ref_type) else {
            tracing::warn!(entity_type = ref_type, "no fetcher registered for populate");
            continue;
        };

        match fetcher.fetch_as_json(&ref_id).await {
            Ok(Some(doc)) => {
                object.insert((*field).to_string(), doc);
            }
            Ok(None) => {
                // Dangling reference: keep the raw id
            }
            Err(e) => {
                tracing::warn!(
                    entity_type = ref_type,
                    id = %ref_id,
                    error = %e,
                    "populate fetch failed"
                );
            }
        }
    }
}

/// Inject the generated base fields into a create payload
fn inject_base_fields<T: Document>(object: &mut Map<String, Value>) {
    let now = serde_json::to_value(chrono::Utc::now()).expect("datetime serializes");

    object.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
    object.insert(
        "type".to_string(),
        Value::String(T::resource_name_singular().to_string()),
    );
    object.insert("created_at".to_string(), now.clone());
    object.insert("updated_at".to_string(), now);

    let status_missing = object
        .get("status")
        .map(|s| s.is_null() || s.as_str() == Some(""))
        .unwrap_or(true);
    if status_missing {
        object.insert(
            "status".to_string(),
            Value::String(T::default_status().to_string()),
        );
    }
}
