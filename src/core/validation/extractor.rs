//! Axum extractor for validated entity payloads
//!
//! The `Validated<T>` extractor runs the entity's declarative filters and
//! validators over the request body before the handler sees it. Rejections
//! use the same `{success: false, error}` envelope and the 400 status the
//! rest of the API uses for validation failures.

use super::config::EntityValidationConfig;
use crate::core::envelope::ApiResponse;
use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// Trait for entities that support validation
///
/// This is automatically implemented by the `impl_document_entity_validated!`
/// macro.
pub trait ValidatableEntity {
    /// Get the validation configuration for a specific operation
    /// ("create" or "update")
    fn validation_config(operation: &str) -> EntityValidationConfig;
}

/// Axum extractor that validates and filters entity data
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_service(
///     payload: Validated<Service>,
/// ) -> Result<Json<ApiResponse>, Error> {
///     let body = payload.into_inner(); // already validated and filtered
/// }
/// ```
pub struct Validated<T>(pub Value, std::marker::PhantomData<T>);

impl<T> Validated<T> {
    /// Create a new validated payload
    pub fn new(payload: Value) -> Self {
        Self(payload, std::marker::PhantomData)
    }

    /// Get the inner payload
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl<T> std::ops::Deref for Validated<T> {
    type Target = Value;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: ValidatableEntity + Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let method = req.method().clone();

        let Json(payload): Json<Value> = match Json::from_request(req, state).await {
            Ok(json) => json,
            Err(e) => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::failure(format!("Invalid JSON: {}", e))),
                )
                    .into_response());
            }
        };

        let operation = match method.as_str() {
            "POST" => "create",
            "PUT" | "PATCH" => "update",
            _ => "create", // default
        };

        let config = T::validation_config(operation);

        match config.validate_and_filter(payload) {
            Ok(validated_payload) => Ok(Validated::new(validated_payload)),
            Err(errors) => {
                let detail: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                Err((
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::failure(detail.join(", "))),
                )
                    .into_response())
            }
        }
    }
}
