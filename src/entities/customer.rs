//! Customer entity: the businesses and individuals services are sold to.
//!
//! Customers can log in with their phone number, so they carry a password
//! hash next to their contact fields.

use crate::panels::descriptor::{
    ColumnDescriptor, ColumnKind, FieldDescriptor, FieldKind, FieldOption, FieldRules, FormConfig,
    FormMethod, TableConfig,
};
use crate::impl_document_entity_validated;

impl_document_entity_validated!(
    Customer,
    "customer",
    default_status: "active",
    ["name", "phone_number", "email", "status"],
    refs: [],
    {
        phone_number: String,
        email: String,
        password_hash: String,
        #[serde(default)]
        company: Option<String>,
        #[serde(default)]
        address: Option<String>,
    },
    validate: {
        create: {
            name: [required, string_length(2, 100)],
            phone_number: [required, phone],
            email: [required, email],
            password_hash: [required],
            status: [in_list("active", "inactive")],
        },
        update: {
            name: [optional, string_length(2, 100)],
            phone_number: [optional, phone],
            email: [optional, email],
            status: [in_list("active", "inactive")],
        },
    },
    filters: {
        create: {
            name: [trim],
            email: [trim, lowercase],
        },
        update: {
            name: [trim],
            email: [trim, lowercase],
        },
    }
);

impl Customer {
    /// Field descriptors for the customer create/edit form
    pub fn form_fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("name", "Full name", FieldKind::Text)
                .required()
                .with_rules(FieldRules {
                    min_length: Some(2),
                    max_length: Some(100),
                    ..Default::default()
                }),
            FieldDescriptor::new("phone_number", "Phone number", FieldKind::Tel).required(),
            FieldDescriptor::new("email", "Email", FieldKind::Email).required(),
            FieldDescriptor::new("password_hash", "Password", FieldKind::Password).required(),
            FieldDescriptor::new("company", "Company", FieldKind::Text),
            FieldDescriptor::new("address", "Address", FieldKind::Textarea),
            FieldDescriptor::new(
                "status",
                "Status",
                FieldKind::Select {
                    options: vec![
                        FieldOption::new("active", "Active"),
                        FieldOption::new("inactive", "Inactive"),
                    ],
                },
            ),
        ]
    }

    /// Form configuration for creating a customer
    pub fn form_config() -> FormConfig {
        FormConfig {
            title: "New customer".to_string(),
            description: Some("Register a customer account".to_string()),
            fields: Self::form_fields(),
            endpoint: "/api/customers".to_string(),
            method: FormMethod::Post,
            submit_label: Some("Create customer".to_string()),
        }
    }

    /// Table configuration for the customer list page
    pub fn table_config() -> TableConfig {
        TableConfig::new("Customers", "/api/customers")
            .with_columns(vec![
                ColumnDescriptor::new("name", "Name").sortable(),
                ColumnDescriptor::new("phone_number", "Phone"),
                ColumnDescriptor::new("email", "Email").sortable(),
                ColumnDescriptor::new("company", "Company"),
                ColumnDescriptor::new("status", "Status")
                    .with_kind(ColumnKind::Status)
                    .sortable(),
                ColumnDescriptor::new("created_at", "Created").with_kind(ColumnKind::Date),
            ])
    }
}
