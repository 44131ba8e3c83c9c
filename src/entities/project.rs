//! Project entity: the delivery of a contract, optionally assigned to a team.

use crate::panels::descriptor::{
    ColumnDescriptor, ColumnKind, FieldDescriptor, FieldKind, FormConfig, FormMethod, TableConfig,
};
use crate::impl_document_entity_validated;
use uuid::Uuid;

impl_document_entity_validated!(
    Project,
    "project",
    default_status: "pending",
    ["name", "customer_id", "status"],
    refs: [
        ("customer_id", "customer"),
        ("contract_id", "contract"),
        ("team_id", "team")
    ],
    {
        customer_id: Uuid,
        contract_id: Uuid,
        #[serde(default)]
        team_id: Option<Uuid>,
        #[serde(default)]
        description: String,
        #[serde(default)]
        deadline: Option<String>,
    },
    validate: {
        create: {
            name: [required, string_length(2, 150)],
            customer_id: [required, uuid_ref],
            contract_id: [required, uuid_ref],
            team_id: [uuid_ref],
            deadline: [date_format("%Y-%m-%d")],
            status: [in_list("pending", "in_progress", "completed", "cancelled")],
        },
        update: {
            name: [optional, string_length(2, 150)],
            team_id: [uuid_ref],
            deadline: [date_format("%Y-%m-%d")],
            status: [in_list("pending", "in_progress", "completed", "cancelled")],
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

impl Project {
    pub fn form_fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("name", "Project name", FieldKind::Text).required(),
            // Customer first; the contract options derive from the selected
            // customer (panels::options::contract_options).
            FieldDescriptor::new(
                "customer_id",
                "Customer",
                FieldKind::Select { options: vec![] },
            )
            .required(),
            FieldDescriptor::new(
                "contract_id",
                "Contract",
                FieldKind::Select { options: vec![] },
            )
            .required(),
            FieldDescriptor::new("team_id", "Team", FieldKind::Select { options: vec![] }),
            FieldDescriptor::new("description", "Description", FieldKind::Textarea),
            FieldDescriptor::new("deadline", "Deadline", FieldKind::Date),
        ]
    }

    pub fn form_config() -> FormConfig {
        FormConfig {
            title: "New project".to_string(),
            description: None,
            fields: Self::form_fields(),
            endpoint: "/api/projects".to_string(),
            method: FormMethod::Post,
            submit_label: Some("Create project".to_string()),
        }
    }

    pub fn table_config() -> TableConfig {
        TableConfig::new("Projects", "/api/projects").with_columns(vec![
            ColumnDescriptor::new("name", "Project").sortable(),
            ColumnDescriptor::new("customer_id", "Customer"),
            ColumnDescriptor::new("deadline", "Deadline").with_kind(ColumnKind::Date).sortable(),
            ColumnDescriptor::new("status", "Status").with_kind(ColumnKind::Status).sortable(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Document;
    use crate::core::validation::ValidatableEntity;
    use serde_json::json;

    #[test]
    fn test_all_references_declared() {
        let refs = Project::references();
        assert_eq!(refs.len(), 3);
        assert!(refs.contains(&("customer_id", "customer")));
        assert!(refs.contains(&("contract_id", "contract")));
        assert!(refs.contains(&("team_id", "team")));
    }

    #[test]
    fn test_create_requires_contract() {
        let config = Project::validation_config("create");
        let errors = config
            .validate_and_filter(json!({
                "name": "Site revamp",
                "customer_id": uuid::Uuid::new_v4().to_string()
            }))
            .unwrap_err();
        assert!(errors.iter().any(|e| e.field == "contract_id"));
    }

    #[test]
    fn test_team_is_optional_but_checked() {
        let config = Project::validation_config("update");
        assert!(config.validate_and_filter(json!({})).is_ok());
        assert!(
            config
                .validate_and_filter(json!({"team_id": "not-a-uuid"}))
                .is_err()
        );
    }
}
