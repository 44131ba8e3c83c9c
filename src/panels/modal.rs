//! Headless modal renderer
//!
//! Interprets a [`ModalConfig`]: view/edit modals fetch the current item
//! before exposing fields, delete modals show a static confirmation, and
//! confirm() dispatches the configured method. A failed confirm keeps the
//! modal open with an inline error; a successful one closes it.

use serde_json::{Map, Value};
use std::sync::Arc;

use crate::client::{Method, Transport};
use crate::panels::descriptor::{FormMethod, ModalConfig, ModalKind};
use crate::panels::error::PanelError;

/// Modal lifecycle state
#[derive(Debug, Clone, PartialEq)]
pub enum ModalState {
    Closed,
    /// Fetching the item (view/edit) before the body can show
    Loading,
    /// Body visible; for delete modals this is the static confirmation
    Ready,
    /// The open-fetch failed; the body is gated by this error
    LoadFailed(String),
}

/// Generic modal view driven by a [`ModalConfig`]
pub struct ModalView {
    config: ModalConfig,
    transport: Arc<dyn Transport>,
    state: ModalState,
    item_id: Option<String>,
    values: Map<String, Value>,
    /// Inline error from a failed confirm; the modal stays open
    error: Option<String>,
    /// Set when confirm() succeeded and the modal closed
    succeeded: bool,
}

impl ModalView {
    pub fn new(config: ModalConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            state: ModalState::Closed,
            item_id: None,
            values: Map::new(),
            error: None,
            succeeded: false,
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Current item values (populated by open() for view/edit modals)
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// The static confirmation message shown by delete modals
    pub fn confirmation_message(&self) -> Option<String> {
        match self.config.kind {
            ModalKind::Delete => Some(
                "Are you sure you want to delete this item? This cannot be undone.".to_string(),
            ),
            _ => None,
        }
    }

    /// Open the modal for an item.
    ///
    /// View/edit/custom modals fetch the item state first; delete modals
    /// skip the fetch and go straight to the confirmation.
    pub async fn open(&mut self, id: &str) -> Result<(), PanelError> {
        self.item_id = Some(id.to_string());
        self.error = None;
        self.succeeded = false;
        self.values.clear();

        if self.config.kind == ModalKind::Delete {
            self.state = ModalState::Ready;
            return Ok(());
        }

        self.state = ModalState::Loading;

        let path = self.item_path(id);
        match self.transport.send(Method::Get, &path, None).await {
            Ok(envelope) if envelope.success => {
                if let Some(Value::Object(object)) = envelope.data {
                    self.values = object;
                }
                self.state = ModalState::Ready;
                Ok(())
            }
            Ok(envelope) => {
                let message = envelope
                    .error
                    .unwrap_or_else(|| "failed to load item".to_string());
                self.state = ModalState::LoadFailed(message);
                Ok(())
            }
            Err(e) => {
                self.state = ModalState::LoadFailed(e.to_string());
                Ok(())
            }
        }
    }

    /// Edit a field value. View modals are read-only.
    pub fn set_value(&mut self, field: &str, value: Value) -> Result<(), PanelError> {
        if self.config.kind == ModalKind::View {
            return Err(PanelError::ReadOnly { what: "modal" });
        }
        if self.state != ModalState::Ready {
            return Err(PanelError::NotOpen);
        }
        self.values.insert(field.to_string(), value);
        Ok(())
    }

    /// Dispatch the modal's action: PATCH (or the configured method) with
    /// the edited values, or DELETE for delete modals.
    ///
    /// On success the modal closes; on failure it stays open with an inline
    /// error. View modals have no confirm action.
    pub async fn confirm(&mut self) -> Result<bool, PanelError> {
        if self.config.kind == ModalKind::View {
            return Err(PanelError::ReadOnly { what: "modal" });
        }
        if self.state != ModalState::Ready {
            return Err(PanelError::NotOpen);
        }
        let id = self.item_id.clone().ok_or(PanelError::NotOpen)?;
        let path = self.item_path(&id);

        let (method, body) = if self.config.kind == ModalKind::Delete {
            (Method::Delete, None)
        } else {
            let method = match self.config.method.unwrap_or(FormMethod::Patch) {
                FormMethod::Post => Method::Post,
                FormMethod::Put => Method::Put,
                FormMethod::Patch => Method::Patch,
            };
            (method, Some(self.editable_payload()))
        };

        match self.transport.send(method, &path, body).await {
            Ok(envelope) if envelope.success => {
                self.succeeded = true;
                self.state = ModalState::Closed;
                self.error = None;
                Ok(true)
            }
            Ok(envelope) => {
                self.error = envelope.error.or(Some("request failed".to_string()));
                Ok(false)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Ok(false)
            }
        }
    }

    /// Close without confirming
    pub fn close(&mut self) {
        self.state = ModalState::Closed;
    }

    /// Only the configured fields go back to the API, not the whole
    /// fetched document.
    fn editable_payload(&self) -> Value {
        if self.config.fields.is_empty() {
            return Value::Object(self.values.clone());
        }

        let mut payload = Map::new();
        for field in &self.config.fields {
            if field.read_only {
                continue;
            }
            if let Some(value) = self.values.get(&field.name) {
                payload.insert(field.name.clone(), value.clone());
            }
        }
        Value::Object(payload)
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.config.endpoint.trim_end_matches('/'), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RecordingTransport;
    use crate::core::envelope::ApiResponse;
    use crate::panels::descriptor::{FieldDescriptor, FieldKind};
    use serde_json::json;

    fn modal(kind: ModalKind) -> (ModalView, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::new());
        let config = ModalConfig {
            title: "Service".to_string(),
            kind,
            size: None,
            endpoint: "/api/services".to_string(),
            method: None,
            fields: vec![
                FieldDescriptor::new("name", "Name", FieldKind::Text),
                FieldDescriptor::new("base_price", "Price", FieldKind::Number),
            ],
        };
        (ModalView::new(config, transport.clone()), transport)
    }

    #[tokio::test]
    async fn test_edit_modal_fetches_item_on_open() {
        let (mut view, transport) = modal(ModalKind::Edit);
        transport.queue_response(ApiResponse::success(
            json!({"id": "x", "name": "Logo Design", "base_price": 100.0}),
        ));

        view.open("x").await.unwrap();

        assert_eq!(*view.state(), ModalState::Ready);
        assert_eq!(view.values()["name"], "Logo Design");
        assert_eq!(transport.requests()[0].path, "/api/services/x");
        assert_eq!(transport.requests()[0].method, Method::Get);
    }

    #[tokio::test]
    async fn test_open_failure_gates_the_body() {
        let (mut view, transport) = modal(ModalKind::Edit);
        transport.queue_response(ApiResponse::failure("service not found"));

        view.open("missing").await.unwrap();

        assert!(matches!(view.state(), ModalState::LoadFailed(msg) if msg == "service not found"));
        assert!(view.set_value("name", json!("x")).is_err());
    }

    #[tokio::test]
    async fn test_delete_modal_skips_fetch_and_shows_message() {
        let (mut view, transport) = modal(ModalKind::Delete);

        view.open("x").await.unwrap();

        assert_eq!(*view.state(), ModalState::Ready);
        assert_eq!(transport.request_count(), 0, "no fetch for delete modals");
        assert!(view.confirmation_message().unwrap().contains("cannot be undone"));
    }

    #[tokio::test]
    async fn test_confirm_edit_dispatches_patch_and_closes() {
        let (mut view, transport) = modal(ModalKind::Edit);
        transport.queue_response(ApiResponse::success(json!({"name": "Logo Design"})));
        transport.queue_response(ApiResponse::success(json!({"name": "Rebrand"})));

        view.open("x").await.unwrap();
        view.set_value("name", json!("Rebrand")).unwrap();

        let closed = view.confirm().await.unwrap();

        assert!(closed);
        assert!(view.succeeded());
        assert_eq!(*view.state(), ModalState::Closed);

        let patch = &transport.requests()[1];
        assert_eq!(patch.method, Method::Patch);
        assert_eq!(patch.path, "/api/services/x");
        let body = patch.body.as_ref().unwrap();
        assert_eq!(body["name"], "Rebrand");
        // Only configured fields are sent back, not the whole document.
        assert!(body.get("id").is_none());
    }

    #[tokio::test]
    async fn test_confirm_failure_keeps_modal_open_with_error() {
        let (mut view, transport) = modal(ModalKind::Edit);
        transport.queue_response(ApiResponse::success(json!({"name": "Logo Design"})));
        transport.queue_response(ApiResponse::failure("'name' doit avoir au moins 2 caractères"));

        view.open("x").await.unwrap();
        view.set_value("name", json!("L")).unwrap();

        let closed = view.confirm().await.unwrap();

        assert!(!closed);
        assert!(!view.succeeded());
        assert_eq!(*view.state(), ModalState::Ready, "modal stays open");
        assert!(view.error().unwrap().contains("au moins 2"));
    }

    #[tokio::test]
    async fn test_delete_modal_confirm_sends_delete() {
        let (mut view, transport) = modal(ModalKind::Delete);
        transport.queue_response(ApiResponse::message("service deleted"));

        view.open("x").await.unwrap();
        let closed = view.confirm().await.unwrap();

        assert!(closed);
        assert_eq!(transport.requests()[0].method, Method::Delete);
        assert_eq!(transport.requests()[0].path, "/api/services/x");
    }

    #[tokio::test]
    async fn test_view_modal_is_read_only_with_no_confirm() {
        let (mut view, transport) = modal(ModalKind::View);
        transport.queue_response(ApiResponse::success(json!({"name": "Logo Design"})));

        view.open("x").await.unwrap();

        assert!(matches!(
            view.set_value("name", json!("nope")),
            Err(PanelError::ReadOnly { .. })
        ));
        assert!(matches!(
            view.confirm().await,
            Err(PanelError::ReadOnly { .. })
        ));
    }

    #[tokio::test]
    async fn test_confirm_before_open_is_rejected() {
        let (mut view, _) = modal(ModalKind::Edit);
        assert!(matches!(view.confirm().await, Err(PanelError::NotOpen)));
    }
}
