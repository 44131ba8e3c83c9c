//! Transaction entity: money in or out, optionally tied to a customer or a
//! project.

use crate::panels::descriptor::{
    ColumnDescriptor, ColumnKind, FieldDescriptor, FieldKind, FieldOption, FormConfig, FormMethod,
    TableConfig,
};
use crate::impl_document_entity_validated;
use uuid::Uuid;

impl_document_entity_validated!(
    Transaction,
    "transaction",
    default_status: "pending",
    ["name", "kind", "status"],
    refs: [("customer_id", "customer"), ("project_id", "project")],
    {
        amount: f64,
        kind: String,
        #[serde(default)]
        customer_id: Option<Uuid>,
        #[serde(default)]
        project_id: Option<Uuid>,
        method: String,
        #[serde(default)]
        notes: Option<String>,
    },
    validate: {
        create: {
            name: [required, string_length(2, 150)],
            amount: [required, positive],
            kind: [required, in_list("income", "expense")],
            method: [required, in_list("cash", "bank_transfer", "card", "cheque")],
            customer_id: [uuid_ref],
            project_id: [uuid_ref],
            status: [in_list("pending", "completed", "failed")],
        },
        update: {
            amount: [optional, positive],
            kind: [in_list("income", "expense")],
            method: [in_list("cash", "bank_transfer", "card", "cheque")],
            status: [in_list("pending", "completed", "failed")],
        },
    },
    filters: {
        create: {
            name: [trim],
            amount: [round_decimals(2)],
        },
        update: {
            amount: [round_decimals(2)],
        },
    }
);

impl Transaction {
    /// Signed amount: expenses are negative
    pub fn signed_amount(&self) -> f64 {
        if self.kind == "expense" {
            -self.amount
        } else {
            self.amount
        }
    }

    pub fn form_fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("name", "Label", FieldKind::Text).required(),
            FieldDescriptor::new("amount", "Amount", FieldKind::Number).required(),
            FieldDescriptor::new(
                "kind",
                "Direction",
                FieldKind::Radio {
                    options: vec![
                        FieldOption::new("income", "Income"),
                        FieldOption::new("expense", "Expense"),
                    ],
                },
            )
            .required(),
            FieldDescriptor::new(
                "method",
                "Payment method",
                FieldKind::Select {
                    options: vec![
                        FieldOption::new("cash", "Cash"),
                        FieldOption::new("bank_transfer", "Bank transfer"),
                        FieldOption::new("card", "Card"),
                        FieldOption::new("cheque", "Cheque"),
                    ],
                },
            )
            .required(),
            FieldDescriptor::new("customer_id", "Customer", FieldKind::Select { options: vec![] }),
            FieldDescriptor::new("project_id", "Project", FieldKind::Select { options: vec![] }),
            FieldDescriptor::new("notes", "Notes", FieldKind::Textarea),
        ]
    }

    pub fn form_config() -> FormConfig {
        FormConfig {
            title: "Record transaction".to_string(),
            description: None,
            fields: Self::form_fields(),
            endpoint: "/api/transactions".to_string(),
            method: FormMethod::Post,
            submit_label: Some("Record".to_string()),
        }
    }

    pub fn table_config() -> TableConfig {
        TableConfig::new("Transactions", "/api/transactions").with_columns(vec![
            ColumnDescriptor::new("name", "Label").sortable(),
            ColumnDescriptor::new("kind", "Direction").sortable(),
            ColumnDescriptor::new("amount", "Amount").with_kind(ColumnKind::Currency).sortable(),
            ColumnDescriptor::new("method", "Method"),
            ColumnDescriptor::new("created_at", "Date").with_kind(ColumnKind::Date).sortable(),
            ColumnDescriptor::new("status", "Status").with_kind(ColumnKind::Status),
        ])
    }
}
