//! ServiceRequest entity: a customer asking for one of the catalog services.

use crate::panels::descriptor::{
    ColumnDescriptor, ColumnKind, FieldDescriptor, FieldKind, FormConfig, FormMethod, TableConfig,
};
use crate::impl_document_entity_validated;
use uuid::Uuid;

impl_document_entity_validated!(
    ServiceRequest,
    "service_request",
    default_status: "pending",
    ["name", "customer_id", "service_id", "status"],
    refs: [("customer_id", "customer"), ("service_id", "service")],
    {
        customer_id: Uuid,
        service_id: Uuid,
        details: String,
        #[serde(default)]
        preferred_date: Option<String>,
    },
    validate: {
        create: {
            name: [required, string_length(2, 150)],
            customer_id: [required, uuid_ref],
            service_id: [required, uuid_ref],
            details: [required],
            preferred_date: [date_format("%Y-%m-%d")],
            status: [in_list("pending", "approved", "rejected", "completed")],
        },
        update: {
            details: [optional],
            preferred_date: [date_format("%Y-%m-%d")],
            status: [in_list("pending", "approved", "rejected", "completed")],
        },
    },
    filters: {
        create: {
            name: [trim],
            details: [trim],
        },
        update: {
            details: [trim],
        },
    }
);

impl ServiceRequest {
    pub fn form_fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("name", "Subject", FieldKind::Text).required(),
            FieldDescriptor::new(
                "service_id",
                "Service",
                FieldKind::Select { options: vec![] },
            )
            .required(),
            FieldDescriptor::new("details", "Details", FieldKind::Textarea).required(),
            FieldDescriptor::new("preferred_date", "Preferred date", FieldKind::Date),
            // The requesting customer is injected by the page, not typed in.
            FieldDescriptor::new("customer_id", "Customer", FieldKind::Hidden),
        ]
    }

    pub fn form_config() -> FormConfig {
        FormConfig {
            title: "Request a service".to_string(),
            description: None,
            fields: Self::form_fields(),
            endpoint: "/api/service_requests".to_string(),
            method: FormMethod::Post,
            submit_label: Some("Send request".to_string()),
        }
    }

    pub fn table_config() -> TableConfig {
        TableConfig::new("Service requests", "/api/service_requests").with_columns(vec![
            ColumnDescriptor::new("name", "Subject").sortable(),
            ColumnDescriptor::new("customer_id", "Customer"),
            ColumnDescriptor::new("service_id", "Service"),
            ColumnDescriptor::new("preferred_date", "Preferred date"),
            ColumnDescriptor::new("status", "Status").with_kind(ColumnKind::Status).sortable(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Entity;
    use crate::core::validation::ValidatableEntity;
    use serde_json::json;

    #[test]
    fn test_compound_resource_name() {
        assert_eq!(ServiceRequest::resource_name(), "service_requests");
    }

    #[test]
    fn test_request_needs_service_and_customer() {
        let config = ServiceRequest::validation_config("create");
        let errors = config
            .validate_and_filter(json!({"name": "Need a logo", "details": "ASAP"}))
            .unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"customer_id"));
        assert!(fields.contains(&"service_id"));
    }

    #[test]
    fn test_status_transition_values() {
        let config = ServiceRequest::validation_config("update");
        assert!(config.validate_and_filter(json!({"status": "approved"})).is_ok());
        assert!(config.validate_and_filter(json!({"status": "escalated"})).is_err());
    }
}
