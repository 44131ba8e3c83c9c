//! Declarative panel configuration types
//!
//! Field and column descriptors are plain serde data: pages build them in
//! code (see the entity modules) or load them from YAML. The field type is
//! a tagged union, so a `Select` without options cannot exist as anything
//! other than an explicitly empty list awaiting dynamic supply, and the
//! renderers match on every variant exhaustively.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// One `{value, label}` choice for selects and radios
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The input type of a form field.
///
/// Option-carrying variants hold their options inline: there is no separate
/// loosely-typed `options` property that may or may not be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Password,
    Textarea,
    Number,
    Date,
    Checkbox,
    Select { options: Vec<FieldOption> },
    Radio { options: Vec<FieldOption> },
    Hidden,
}

impl FieldKind {
    /// The options list for select/radio kinds
    pub fn options(&self) -> Option<&[FieldOption]> {
        match self {
            FieldKind::Select { options } | FieldKind::Radio { options } => Some(options),
            _ => None,
        }
    }

    /// Whether this kind needs a non-empty options list before render
    pub fn needs_options(&self) -> bool {
        matches!(self, FieldKind::Select { .. } | FieldKind::Radio { .. })
    }
}

/// Validation rules attached to a field descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldRules {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

/// Declarative description of one form field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<FieldRules>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub hidden: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        let hidden = matches!(kind, FieldKind::Hidden);
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            rules: None,
            default_value: None,
            description: None,
            read_only: false,
            hidden,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_rules(mut self, rules: FieldRules) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

/// HTTP method a form submits with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FormMethod {
    Post,
    Put,
    Patch,
}

/// Configuration consumed by one `FormRenderer`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<FieldDescriptor>,
    pub endpoint: String,
    pub method: FormMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_label: Option<String>,
}

impl FormConfig {
    /// Load a form configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a form configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Default formatter applied to a column's cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Text,
    Number,
    Currency,
    Date,
    Status,
}

/// What a rendered cell contains
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Text(String),
    Pill { label: String, tone: PillTone },
    Empty,
}

impl CellContent {
    /// Plain-text projection; the `-` placeholder for empty cells
    pub fn text(&self) -> String {
        match self {
            CellContent::Text(s) => s.clone(),
            CellContent::Pill { label, .. } => label.clone(),
            CellContent::Empty => "-".to_string(),
        }
    }
}

/// Visual tone of a status pill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PillTone {
    Success,
    Warning,
    Danger,
    Neutral,
}

/// Per-column cell renderer: `(cell_value, full_row) -> content`
pub type CellRender = fn(&Value, &Value) -> CellContent;

/// Declarative description of one table column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ColumnKind>,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    /// Custom renderer taking precedence over the kind-based default.
    /// Code-only: not part of the serialized configuration.
    #[serde(skip)]
    pub render: Option<CellRender>,
}

impl ColumnDescriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: None,
            sortable: false,
            width: None,
            render: None,
        }
    }

    pub fn with_kind(mut self, kind: ColumnKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn with_render(mut self, render: CellRender) -> Self {
        self.render = Some(render);
        self
    }
}

/// Which row actions a table offers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableActions {
    pub view: bool,
    pub edit: bool,
    pub delete: bool,
}

impl Default for TableActions {
    fn default() -> Self {
        Self {
            view: true,
            edit: true,
            delete: true,
        }
    }
}

/// Configuration consumed by one `TableView`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_endpoint: Option<String>,
    pub columns: Vec<ColumnDescriptor>,
    #[serde(default)]
    pub actions: TableActions,
}

impl TableConfig {
    pub fn new(title: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            endpoint: endpoint.into(),
            delete_endpoint: None,
            columns: Vec::new(),
            actions: TableActions::default(),
        }
    }

    pub fn with_columns(mut self, columns: Vec<ColumnDescriptor>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_delete_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.delete_endpoint = Some(endpoint.into());
        self
    }

    /// Load a table configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

// ---------------------------------------------------------------------------
// Modals
// ---------------------------------------------------------------------------

/// What a modal is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalKind {
    View,
    Edit,
    Delete,
    Custom,
}

/// Modal sizing hint for the front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalSize {
    Small,
    Medium,
    Large,
}

/// Configuration consumed by one `ModalView`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModalConfig {
    pub title: String,
    pub kind: ModalKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<ModalSize>,
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<FormMethod>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_kind_options_access() {
        let select = FieldKind::Select {
            options: vec![FieldOption::new("a", "A")],
        };
        assert_eq!(select.options().unwrap().len(), 1);
        assert!(select.needs_options());

        assert!(FieldKind::Text.options().is_none());
        assert!(!FieldKind::Text.needs_options());
    }

    #[test]
    fn test_hidden_kind_sets_hidden_flag() {
        let field = FieldDescriptor::new("customer_id", "Customer", FieldKind::Hidden);
        assert!(field.hidden);
    }

    #[test]
    fn test_builder_chain() {
        let field = FieldDescriptor::new("name", "Name", FieldKind::Text)
            .required()
            .with_default(json!("draft"))
            .with_description("Shown on invoices")
            .read_only();

        assert!(field.required);
        assert!(field.read_only);
        assert_eq!(field.default_value, Some(json!("draft")));
    }

    #[test]
    fn test_form_config_from_yaml() {
        let yaml = r#"
title: New service
endpoint: /api/services
method: POST
fields:
  - name: name
    label: Service name
    kind:
      type: text
    required: true
  - name: team_type
    label: Team
    kind:
      type: select
      options:
        - value: design
          label: Design
"#;
        let config = FormConfig::from_yaml_str(yaml).expect("yaml should parse");
        assert_eq!(config.method, FormMethod::Post);
        assert_eq!(config.fields.len(), 2);
        assert!(config.fields[0].required);
        assert_eq!(
            config.fields[1].kind.options().unwrap()[0].value,
            "design"
        );
    }

    #[test]
    fn test_form_config_from_yaml_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            "title: Quick form\nendpoint: /api/tasks\nmethod: PATCH\nfields: []\n"
        )
        .expect("write yaml");

        let config = FormConfig::from_yaml_file(file.path().to_str().unwrap())
            .expect("file should load");
        assert_eq!(config.title, "Quick form");
        assert_eq!(config.method, FormMethod::Patch);
    }

    #[test]
    fn test_table_config_from_yaml() {
        let yaml = r#"
title: Services
endpoint: /api/services
columns:
  - key: name
    label: Service
    sortable: true
  - key: status
    label: Status
    kind: status
"#;
        let config = TableConfig::from_yaml_str(yaml).expect("yaml should parse");
        assert_eq!(config.columns.len(), 2);
        assert!(config.columns[0].sortable);
        assert_eq!(config.columns[1].kind, Some(ColumnKind::Status));
        // Actions default to all enabled
        assert!(config.actions.view && config.actions.edit && config.actions.delete);
    }

    #[test]
    fn test_cell_content_text_placeholder() {
        assert_eq!(CellContent::Empty.text(), "-");
        assert_eq!(CellContent::Text("x".into()).text(), "x");
        assert_eq!(
            CellContent::Pill {
                label: "active".into(),
                tone: PillTone::Success
            }
            .text(),
            "active"
        );
    }

    #[test]
    fn test_modal_config_serde_roundtrip() {
        let config = ModalConfig {
            title: "Edit service".to_string(),
            kind: ModalKind::Edit,
            size: Some(ModalSize::Medium),
            endpoint: "/api/services".to_string(),
            method: None,
            fields: vec![FieldDescriptor::new("name", "Name", FieldKind::Text)],
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: ModalConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.kind, ModalKind::Edit);
        assert_eq!(back.fields.len(), 1);
    }
}
