//! Contract entity: a signed agreement with a customer.

use crate::panels::descriptor::{
    ColumnDescriptor, ColumnKind, FieldDescriptor, FieldKind, FieldOption, FormConfig, FormMethod,
    TableConfig,
};
use crate::impl_document_entity_validated;
use uuid::Uuid;

impl_document_entity_validated!(
    Contract,
    "contract",
    default_status: "draft",
    ["name", "customer_id", "status"],
    refs: [("customer_id", "customer")],
    {
        customer_id: Uuid,
        amount: f64,
        start_date: String,
        end_date: String,
        #[serde(default)]
        terms: String,
    },
    validate: {
        create: {
            name: [required, string_length(2, 150)],
            customer_id: [required, uuid_ref],
            amount: [required, positive],
            start_date: [required, date_format("%Y-%m-%d")],
            end_date: [required, date_format("%Y-%m-%d")],
            status: [in_list("draft", "active", "expired", "terminated")],
        },
        update: {
            name: [optional, string_length(2, 150)],
            customer_id: [uuid_ref],
            amount: [optional, positive],
            start_date: [date_format("%Y-%m-%d")],
            end_date: [date_format("%Y-%m-%d")],
            status: [in_list("draft", "active", "expired", "terminated")],
        },
    },
    filters: {
        create: {
            name: [trim],
            amount: [round_decimals(2)],
        },
        update: {
            name: [trim],
            amount: [round_decimals(2)],
        },
    }
);

impl Contract {
    pub fn form_fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("name", "Contract title", FieldKind::Text).required(),
            // Options are filled from the customer list at render time;
            // see panels::options::customer_options.
            FieldDescriptor::new(
                "customer_id",
                "Customer",
                FieldKind::Select { options: vec![] },
            )
            .required(),
            FieldDescriptor::new("amount", "Amount", FieldKind::Number).required(),
            FieldDescriptor::new("start_date", "Start date", FieldKind::Date).required(),
            FieldDescriptor::new("end_date", "End date", FieldKind::Date).required(),
            FieldDescriptor::new("terms", "Terms", FieldKind::Textarea),
        ]
    }

    pub fn form_config() -> FormConfig {
        FormConfig {
            title: "New contract".to_string(),
            description: None,
            fields: Self::form_fields(),
            endpoint: "/api/contracts".to_string(),
            method: FormMethod::Post,
            submit_label: None,
        }
    }

    pub fn table_config() -> TableConfig {
        TableConfig::new("Contracts", "/api/contracts").with_columns(vec![
            ColumnDescriptor::new("name", "Title").sortable(),
            ColumnDescriptor::new("customer_id", "Customer"),
            ColumnDescriptor::new("amount", "Amount").with_kind(ColumnKind::Currency).sortable(),
            ColumnDescriptor::new("start_date", "From"),
            ColumnDescriptor::new("end_date", "Until"),
            ColumnDescriptor::new("status", "Status").with_kind(ColumnKind::Status),
        ])
    }
}

// Status select options shared by the edit form and the status modal
pub fn status_options() -> Vec<FieldOption> {
    ["draft", "active", "expired", "terminated"]
        .iter()
        .map(|s| FieldOption::new(*s, *s))
        .collect()
}
