//! Service entity: an offering customers can order (logo design, web
//! development, a marketing campaign...).

use crate::panels::descriptor::{
    ColumnDescriptor, ColumnKind, FieldDescriptor, FieldKind, FieldOption, FieldRules, FormConfig,
    FormMethod, TableConfig,
};
use crate::impl_document_entity_validated;

impl_document_entity_validated!(
    Service,
    "service",
    default_status: "active",
    ["name", "category", "team_type", "status"],
    refs: [],
    {
        base_price: f64,
        category: String,
        duration: String,
        requirements: String,
        team_type: String,
    },
    validate: {
        create: {
            name: [required, string_length(2, 100)],
            base_price: [required, positive],
            category: [required],
            duration: [required],
            requirements: [required],
            team_type: [required, in_list("design", "development", "marketing")],
            status: [in_list("active", "archived")],
        },
        update: {
            name: [optional, string_length(2, 100)],
            base_price: [optional, positive],
            team_type: [in_list("design", "development", "marketing")],
            status: [in_list("active", "archived")],
        },
    },
    filters: {
        create: {
            name: [trim],
            base_price: [round_decimals(2)],
        },
        update: {
            name: [trim],
            base_price: [round_decimals(2)],
        },
    }
);

impl Service {
    pub fn form_fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("name", "Service name", FieldKind::Text)
                .required()
                .with_rules(FieldRules {
                    min_length: Some(2),
                    max_length: Some(100),
                    ..Default::default()
                }),
            FieldDescriptor::new("base_price", "Base price", FieldKind::Number)
                .required()
                .with_rules(FieldRules {
                    min: Some(0.0),
                    ..Default::default()
                }),
            FieldDescriptor::new("category", "Category", FieldKind::Text).required(),
            FieldDescriptor::new("duration", "Estimated duration", FieldKind::Text)
                .required()
                .with_description("e.g. \"1 week\""),
            FieldDescriptor::new("requirements", "Requirements", FieldKind::Textarea).required(),
            FieldDescriptor::new(
                "team_type",
                "Handled by",
                FieldKind::Select {
                    options: vec![
                        FieldOption::new("design", "Design"),
                        FieldOption::new("development", "Development"),
                        FieldOption::new("marketing", "Marketing"),
                    ],
                },
            )
            .required(),
        ]
    }

    pub fn form_config() -> FormConfig {
        FormConfig {
            title: "New service".to_string(),
            description: Some("Add an offering to the catalog".to_string()),
            fields: Self::form_fields(),
            endpoint: "/api/services".to_string(),
            method: FormMethod::Post,
            submit_label: Some("Create service".to_string()),
        }
    }

    pub fn table_config() -> TableConfig {
        TableConfig::new("Services", "/api/services").with_columns(vec![
            ColumnDescriptor::new("name", "Service").sortable(),
            ColumnDescriptor::new("category", "Category").sortable(),
            ColumnDescriptor::new("base_price", "Price").with_kind(ColumnKind::Currency).sortable(),
            ColumnDescriptor::new("duration", "Duration"),
            ColumnDescriptor::new("team_type", "Team"),
            ColumnDescriptor::new("status", "Status").with_kind(ColumnKind::Status),
        ])
    }
}
