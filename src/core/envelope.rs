//! The uniform response envelope every API route returns.
//!
//! Wire shapes:
//!
//! ```text
//! { "success": true,  "data": <entity | entity[]> }
//! { "success": true,  "data": <entity>, "message": "<text>" }
//! { "success": true,  "message": "<text>" }
//! { "success": false, "error": "<text>" }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform wire envelope for all API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse {
    /// Successful response carrying data
    pub fn success(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// Successful response carrying data and a human-readable message
    pub fn success_with_message(data: Value, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: Some(message.into()),
        }
    }

    /// Successful response carrying only a message (e.g. after a delete)
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: Some(message.into()),
        }
    }

    /// Failed response carrying an error string
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }
}
