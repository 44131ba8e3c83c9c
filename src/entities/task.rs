//! Task entity: a unit of work inside a project, optionally assigned.

use crate::panels::descriptor::{
    ColumnDescriptor, ColumnKind, FieldDescriptor, FieldKind, FieldOption, FormConfig, FormMethod,
    TableConfig,
};
use crate::impl_document_entity_validated;
use uuid::Uuid;

impl_document_entity_validated!(
    Task,
    "task",
    default_status: "todo",
    ["name", "project_id", "status"],
    refs: [("project_id", "project"), ("assignee_id", "user")],
    {
        project_id: Uuid,
        #[serde(default)]
        assignee_id: Option<Uuid>,
        #[serde(default)]
        description: String,
        #[serde(default)]
        due_date: Option<String>,
        priority: String,
    },
    validate: {
        create: {
            name: [required, string_length(2, 150)],
            project_id: [required, uuid_ref],
            assignee_id: [uuid_ref],
            priority: [required, in_list("low", "medium", "high")],
            due_date: [date_format("%Y-%m-%d")],
            status: [in_list("todo", "in_progress", "done")],
        },
        update: {
            name: [optional, string_length(2, 150)],
            assignee_id: [uuid_ref],
            priority: [in_list("low", "medium", "high")],
            due_date: [date_format("%Y-%m-%d")],
            status: [in_list("todo", "in_progress", "done")],
        },
    },
    filters: {
        create: {
            name: [trim],
        },
        update: {
            name: [trim],
        },
    }
);

impl Task {
    pub fn form_fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("name", "Task", FieldKind::Text).required(),
            FieldDescriptor::new("project_id", "Project", FieldKind::Select { options: vec![] })
                .required(),
            FieldDescriptor::new(
                "assignee_id",
                "Assignee",
                FieldKind::Select { options: vec![] },
            ),
            FieldDescriptor::new(
                "priority",
                "Priority",
                FieldKind::Radio {
                    options: vec![
                        FieldOption::new("low", "Low"),
                        FieldOption::new("medium", "Medium"),
                        FieldOption::new("high", "High"),
                    ],
                },
            )
            .required()
            .with_default(serde_json::json!("medium")),
            FieldDescriptor::new("description", "Description", FieldKind::Textarea),
            FieldDescriptor::new("due_date", "Due date", FieldKind::Date),
        ]
    }

    pub fn form_config() -> FormConfig {
        FormConfig {
            title: "New task".to_string(),
            description: None,
            fields: Self::form_fields(),
            endpoint: "/api/tasks".to_string(),
            method: FormMethod::Post,
            submit_label: None,
        }
    }

    pub fn table_config() -> TableConfig {
        TableConfig::new("Tasks", "/api/tasks").with_columns(vec![
            ColumnDescriptor::new("name", "Task").sortable(),
            ColumnDescriptor::new("priority", "Priority").sortable(),
            ColumnDescriptor::new("due_date", "Due").with_kind(ColumnKind::Date).sortable(),
            ColumnDescriptor::new("status", "Status").with_kind(ColumnKind::Status),
        ])
    }
}
