//! Headless form renderer
//!
//! Interprets a [`FormConfig`]: holds field values, runs the synchronous
//! validation pass, and submits the payload through the transport. The
//! lifecycle is `Idle → (validate) → Idle-with-errors | Submitting →
//! Idle-with-success | Idle-with-errors`; every failure leaves the form in a
//! recoverable state.

use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::client::{Method, Transport};
use crate::panels::descriptor::{FieldDescriptor, FieldKind, FieldOption, FormConfig, FormMethod};
use crate::panels::error::PanelError;

/// Submission lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
}

/// Result of one submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Client-side validation failed; no request was made
    Invalid(BTreeMap<String, String>),
    /// The API answered `{success: true}`
    Success {
        data: Option<Value>,
        message: Option<String>,
    },
    /// The API answered `{success: false}` or the transport failed
    Failed(String),
}

/// One field prepared for display
#[derive(Debug, Clone)]
pub struct RenderedField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub value: Value,
    pub error: Option<String>,
    pub required: bool,
    pub read_only: bool,
    pub description: Option<String>,
    /// For select/radio: the options to display, including the implicit
    /// empty "choose" entry when applicable
    pub options: Vec<FieldOption>,
}

/// Generic form renderer driven by a [`FormConfig`]
pub struct FormRenderer {
    config: FormConfig,
    transport: Arc<dyn Transport>,
    values: Map<String, Value>,
    errors: BTreeMap<String, String>,
    form_error: Option<String>,
    state: FormState,
    succeeded: bool,
}

impl FormRenderer {
    /// Create a renderer, seeding values from field defaults
    pub fn new(config: FormConfig, transport: Arc<dyn Transport>) -> Self {
        let mut values = Map::new();
        for field in &config.fields {
            if let Some(default) = &field.default_value {
                values.insert(field.name.clone(), default.clone());
            }
        }

        Self {
            config,
            transport,
            values,
            errors: BTreeMap::new(),
            form_error: None,
            state: FormState::Idle,
            succeeded: false,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> FormState {
        self.state
    }

    /// Whether the last submit succeeded
    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Per-field validation errors from the last pass
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Form-level error from the last failed submission
    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    /// Set a field value
    pub fn set_value(&mut self, field: &str, value: Value) {
        self.values.insert(field.to_string(), value);
    }

    /// Get a field value, if set
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Supply options for a select/radio field at render time
    /// (e.g. a customer list fetched by the page)
    pub fn set_options(&mut self, field: &str, options: Vec<FieldOption>) {
        for descriptor in &mut self.config.fields {
            if descriptor.name == field {
                match &mut descriptor.kind {
                    FieldKind::Select { options: slot } | FieldKind::Radio { options: slot } => {
                        *slot = options;
                    }
                    _ => {}
                }
                return;
            }
        }
    }

    /// The fields to display: everything except hidden ones.
    ///
    /// Fails when a select/radio field still has an empty options list,
    /// which means the page forgot to supply them.
    pub fn rendered_fields(&self) -> Result<Vec<RenderedField>, PanelError> {
        let mut rendered = Vec::new();

        for field in &self.config.fields {
            if field.hidden {
                continue;
            }

            let value = self.values.get(&field.name).cloned().unwrap_or(Value::Null);

            let options = match field.kind.options() {
                Some(options) => {
                    if options.is_empty() {
                        return Err(PanelError::MissingOptions {
                            field: field.name.clone(),
                        });
                    }
                    // Implicit empty "choose" entry when nothing is selected
                    // on a non-required field
                    if !field.required && value_is_empty(&value) {
                        let mut with_placeholder =
                            vec![FieldOption::new("", "Choose...")];
                        with_placeholder.extend(options.iter().cloned());
                        with_placeholder
                    } else {
                        options.to_vec()
                    }
                }
                None => Vec::new(),
            };

            rendered.push(RenderedField {
                name: field.name.clone(),
                label: field.label.clone(),
                kind: field.kind.clone(),
                value,
                error: self.errors.get(&field.name).cloned(),
                required: field.required,
                read_only: field.read_only,
                description: field.description.clone(),
                options,
            });
        }

        Ok(rendered)
    }

    /// Run the synchronous validation pass over all fields.
    ///
    /// Required-empty first, then the rules block in a fixed order
    /// (min_length, max_length, pattern, min, max); the first broken rule
    /// per field produces that field's single message.
    pub fn validate(&self) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();

        for field in &self.config.fields {
            let value = self.values.get(&field.name).cloned().unwrap_or(Value::Null);

            if let Some(message) = validate_field(field, &value) {
                errors.insert(field.name.clone(), message);
            }
        }

        errors
    }

    /// The payload a submit sends: every set value, hidden fields included,
    /// empty selections excluded.
    pub fn payload(&self) -> Value {
        let mut payload = Map::new();
        for field in &self.config.fields {
            if let Some(value) = self.values.get(&field.name) {
                if value_is_empty(value) {
                    continue;
                }
                payload.insert(field.name.clone(), value.clone());
            }
        }
        Value::Object(payload)
    }

    /// Validate, then submit once.
    ///
    /// Exactly one transport request per successful validation pass; a call
    /// while a submission is in flight is rejected without touching the
    /// network.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, PanelError> {
        if self.state == FormState::Submitting {
            return Err(PanelError::SubmitInFlight);
        }

        let errors = self.validate();
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Ok(SubmitOutcome::Invalid(errors));
        }

        self.errors.clear();
        self.form_error = None;
        self.state = FormState::Submitting;

        let method = match self.config.method {
            FormMethod::Post => Method::Post,
            FormMethod::Put => Method::Put,
            FormMethod::Patch => Method::Patch,
        };

        let result = self
            .transport
            .send(method, &self.config.endpoint, Some(self.payload()))
            .await;

        self.state = FormState::Idle;

        match result {
            Ok(envelope) if envelope.success => {
                self.succeeded = true;
                Ok(SubmitOutcome::Success {
                    data: envelope.data,
                    message: envelope.message,
                })
            }
            Ok(envelope) => {
                let message = envelope
                    .error
                    .unwrap_or_else(|| "request failed".to_string());
                self.form_error = Some(message.clone());
                Ok(SubmitOutcome::Failed(message))
            }
            Err(e) => {
                let message = e.to_string();
                self.form_error = Some(message.clone());
                Ok(SubmitOutcome::Failed(message))
            }
        }
    }
}

/// Empty means "no value": null, missing, or the empty string.
/// `false` and `0` are real values.
fn value_is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Validate one field; the first broken rule wins
fn validate_field(field: &FieldDescriptor, value: &Value) -> Option<String> {
    let empty = value_is_empty(value);

    if field.required && empty {
        return Some(format!("{} is required", field.label));
    }
    if empty {
        return None;
    }

    let rules = field.rules.as_ref()?;

    if let Some(s) = value.as_str() {
        if let Some(min_length) = rules.min_length {
            if s.len() < min_length {
                return Some(format!(
                    "{} must be at least {} characters",
                    field.label, min_length
                ));
            }
        }
        if let Some(max_length) = rules.max_length {
            if s.len() > max_length {
                return Some(format!(
                    "{} must be at most {} characters",
                    field.label, max_length
                ));
            }
        }
        if let Some(pattern) = &rules.pattern {
            match Regex::new(pattern) {
                Ok(regex) => {
                    if !regex.is_match(s) {
                        return Some(format!("{} has an invalid format", field.label));
                    }
                }
                Err(e) => {
                    tracing::warn!(field = %field.name, error = %e, "invalid pattern rule");
                }
            }
        }
    }

    if let Some(n) = value.as_f64() {
        if let Some(min) = rules.min {
            if n < min {
                return Some(format!("{} must be at least {}", field.label, min));
            }
        }
        if let Some(max) = rules.max {
            if n > max {
                return Some(format!("{} must be at most {}", field.label, max));
            }
        }
    }

    None
}
