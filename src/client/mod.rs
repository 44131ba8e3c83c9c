//! Transport abstraction the panel renderers use to reach the API
//!
//! Renderers never touch HTTP directly: they hold an `Arc<dyn Transport>`
//! and exchange `ApiResponse` envelopes through it. Production code uses
//! [`HttpTransport`] (reqwest); tests and development use
//! [`RecordingTransport`], which captures every request and replays queued
//! responses.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::core::envelope::ApiResponse;

/// HTTP method for a transport request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// Async boundary between renderers and the API.
///
/// A transport failure (connection refused, invalid body...) is an `Err`;
/// an API-level failure arrives as a normal envelope with `success: false`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<ApiResponse>;
}

/// Production transport over HTTP, backed by reqwest
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport rooted at a base URL (e.g. `http://localhost:3000`)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);
        let method = reqwest::Method::from_bytes(method.as_str().as_bytes())
            .expect("method names are valid");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;

        // Error statuses still carry the envelope; parse rather than bail.
        response
            .json::<ApiResponse>()
            .await
            .with_context(|| format!("response from {} was not an envelope", url))
    }
}

/// A recorded request made through a [`RecordingTransport`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// In-memory transport for testing and development.
///
/// Captures every request and answers with queued envelopes; when the queue
/// is empty it answers `{success: true, data: []}`.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<RecordedRequest>>,
    responses: Mutex<VecDeque<ApiResponse>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the envelope returned by the next request
    pub fn queue_response(&self, response: ApiResponse) {
        self.responses
            .lock()
            .expect("response queue poisoned")
            .push_back(response);
    }

    /// All requests made so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .expect("request log poisoned")
            .clone()
    }

    /// Number of requests made so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("request log poisoned").len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<ApiResponse> {
        self.requests
            .lock()
            .expect("request log poisoned")
            .push(RecordedRequest {
                method,
                path: path.to_string(),
                body,
            });

        let queued = self
            .responses
            .lock()
            .expect("response queue poisoned")
            .pop_front();

        Ok(queued.unwrap_or_else(|| ApiResponse::success(serde_json::json!([]))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_recording_transport_captures_requests() {
        let transport = RecordingTransport::new();

        transport
            .send(Method::Post, "/api/services", Some(json!({"name": "Logo Design"})))
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].path, "/api/services");
        assert_eq!(requests[0].body.as_ref().unwrap()["name"], "Logo Design");
    }

    #[tokio::test]
    async fn test_recording_transport_replays_queue_in_order() {
        let transport = RecordingTransport::new();
        transport.queue_response(ApiResponse::failure("service not found"));
        transport.queue_response(ApiResponse::message("service deleted"));

        let first = transport.send(Method::Get, "/a", None).await.unwrap();
        assert!(!first.success);

        let second = transport.send(Method::Delete, "/b", None).await.unwrap();
        assert_eq!(second.message.as_deref(), Some("service deleted"));

        // Queue drained: the default empty-list success comes back.
        let third = transport.send(Method::Get, "/c", None).await.unwrap();
        assert!(third.success);
        assert_eq!(third.data, Some(json!([])));
    }

    #[test]
    fn test_method_as_str() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Patch.as_str(), "PATCH");
    }
}
