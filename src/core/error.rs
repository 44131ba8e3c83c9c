//! Typed error handling for the bureau API
//!
//! Every route handler returns `Result<_, Error>`; the `IntoResponse`
//! implementation converts any error into the uniform wire envelope
//! `{success: false, error: "<text>"}` with the matching HTTP status.
//!
//! # Error Categories
//!
//! - [`EntityError`]: document CRUD failures (not found, serialization)
//! - [`ValidationError`]: schema constraint violations on write
//! - [`AuthError`]: credential and token failures
//! - [`StorageError`]: backend failures, never leaked to the wire
//! - [`RequestError`]: malformed requests (bad id, bad body)

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use crate::core::envelope::ApiResponse;

/// The main error type for the bureau API
#[derive(Debug)]
pub enum Error {
    /// Entity-related errors (CRUD operations)
    Entity(EntityError),

    /// Validation errors on write payloads
    Validation(ValidationError),

    /// Authentication / authorization errors
    Auth(AuthError),

    /// Storage backend errors
    Storage(StorageError),

    /// Malformed request errors
    Request(RequestError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Entity(e) => write!(f, "{}", e),
            Error::Validation(e) => write!(f, "{}", e),
            Error::Auth(e) => write!(f, "{}", e),
            Error::Storage(e) => write!(f, "{}", e),
            Error::Request(e) => write!(f, "{}", e),
            Error::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Entity(e) => Some(e),
            Error::Validation(e) => Some(e),
            Error::Auth(e) => Some(e),
            Error::Storage(e) => Some(e),
            Error::Request(e) => Some(e),
            Error::Internal(_) => None,
        }
    }
}

impl Error {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Entity(e) => e.status_code(),
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Auth(e) => e.status_code(),
            Error::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Request(_) => StatusCode::BAD_REQUEST,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message placed in the wire envelope.
    ///
    /// Storage and internal errors are logged but never leaked: the client
    /// sees a generic message.
    pub fn wire_message(&self) -> String {
        match self {
            Error::Storage(e) => {
                tracing::error!(error = %e, "storage error");
                "Internal server error".to_string()
            }
            Error::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ApiResponse::failure(self.wire_message()));
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to document operations
#[derive(Debug)]
pub enum EntityError {
    /// Document was not found
    NotFound { entity_type: String, id: Uuid },

    /// Failed to serialize/deserialize a document
    SerializationError {
        entity_type: String,
        message: String,
    },

    /// Document operation failed
    OperationFailed {
        entity_type: String,
        operation: String,
        message: String,
    },
}

impl EntityError {
    /// Build the not-found error for a given entity type
    pub fn not_found(entity_type: &str, id: Uuid) -> Self {
        EntityError::NotFound {
            entity_type: entity_type.to_string(),
            id,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            EntityError::OperationFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity_type, .. } => {
                write!(f, "{} not found", entity_type)
            }
            EntityError::SerializationError {
                entity_type,
                message,
            } => {
                write!(
                    f,
                    "Failed to serialize/deserialize {}: {}",
                    entity_type, message
                )
            }
            EntityError::OperationFailed {
                entity_type,
                operation,
                message,
            } => {
                write!(f, "Failed to {} {}: {}", operation, entity_type, message)
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl From<EntityError> for Error {
    fn from(err: EntityError) -> Self {
        Error::Entity(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug)]
pub enum ValidationError {
    /// Single field validation error
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    FieldErrors(Vec<FieldValidationError>),

    /// Invalid JSON format
    InvalidJson { message: String },

    /// Invalid UUID format
    InvalidUuid { value: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation error for field '{}': {}", field, message)
            }
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidJson { message } => {
                write!(f, "Invalid JSON: {}", message)
            }
            ValidationError::InvalidUuid { value } => {
                write!(f, "Invalid UUID format: {}", value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Errors related to authentication and authorization
#[derive(Debug)]
pub enum AuthError {
    /// Wrong phone number or password.
    ///
    /// One variant for both cases so the response does not reveal whether
    /// the account exists.
    InvalidCredentials,

    /// The account exists but its status is not "active"
    AccountDeactivated,

    /// No bearer token on a route that requires one
    MissingToken,

    /// The bearer token failed signature or expiry validation
    InvalidToken,

    /// The authenticated identity is not allowed to perform the operation
    Forbidden { message: String },
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::AccountDeactivated => StatusCode::FORBIDDEN,
            AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden { .. } => StatusCode::FORBIDDEN,
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => {
                write!(f, "Invalid phone number or password")
            }
            AuthError::AccountDeactivated => {
                write!(f, "Account is deactivated")
            }
            AuthError::MissingToken => {
                write!(f, "Missing authentication token")
            }
            AuthError::InvalidToken => {
                write!(f, "Invalid or expired token")
            }
            AuthError::Forbidden { message } => {
                write!(f, "Forbidden: {}", message)
            }
        }
    }
}

impl std::error::Error for AuthError {}

impl From<AuthError> for Error {
    fn from(err: AuthError) -> Self {
        Error::Auth(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug)]
pub enum StorageError {
    /// Connection error
    ConnectionError { backend: String, message: String },

    /// Query execution error
    QueryError { backend: String, message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ConnectionError { backend, message } => {
                write!(f, "Failed to connect to {}: {}", backend, message)
            }
            StorageError::QueryError { backend, message } => {
                write!(f, "{} query error: {}", backend, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Error::Storage(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to malformed HTTP requests
#[derive(Debug)]
pub enum RequestError {
    /// Invalid entity ID format in the path
    InvalidEntityId { id: String },

    /// Invalid request body
    InvalidBody { message: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidEntityId { id } => {
                write!(f, "Invalid entity ID format: '{}'", id)
            }
            RequestError::InvalidBody { message } => {
                write!(f, "Invalid request body: {}", message)
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl From<RequestError> for Error {
    fn from(err: RequestError) -> Self {
        Error::Request(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<uuid::Error> for Error {
    fn from(err: uuid::Error) -> Self {
        Error::Validation(ValidationError::InvalidUuid {
            value: err.to_string(),
        })
    }
}

/// Convert from anyhow::Error at the storage/service boundary
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Storage(StorageError::QueryError {
            backend: "storage".to_string(),
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for bureau operations
pub type Result<T> = std::result::Result<T, Error>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = EntityError::not_found("customer", Uuid::nil());
        assert_eq!(err.to_string(), "customer not found");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_error_status() {
        let err: Error = ValidationError::FieldError {
            field: "name".to_string(),
            message: "required".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validation_error_multiple_fields() {
        let err = ValidationError::FieldErrors(vec![
            FieldValidationError {
                field: "name".to_string(),
                message: "required".to_string(),
            },
            FieldValidationError {
                field: "email".to_string(),
                message: "invalid format".to_string(),
            },
        ]);
        let display = err.to_string();
        assert!(display.contains("name"));
        assert!(display.contains("email"));
    }

    #[test]
    fn test_auth_error_status_codes() {
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::AccountDeactivated.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AuthError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_credentials_error_does_not_name_the_account() {
        // Same message whether the phone number exists or not.
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid phone number or password"
        );
    }

    #[test]
    fn test_storage_error_is_not_leaked() {
        let err: Error = StorageError::QueryError {
            backend: "mongodb".to_string(),
            message: "connection string with password".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.wire_message(), "Internal server error");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidJson { .. })
        ));
    }

    #[test]
    fn test_from_anyhow_error() {
        let err: Error = anyhow::anyhow!("boom").into();
        assert!(matches!(err, Error::Storage(_)));
    }
}
