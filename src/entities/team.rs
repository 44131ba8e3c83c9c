//! Team entity: a group of staff members handling one kind of service work.

use crate::panels::descriptor::{
    ColumnDescriptor, ColumnKind, FieldDescriptor, FieldKind, FieldOption, FormConfig, FormMethod,
    TableConfig,
};
use crate::impl_document_entity_validated;
use uuid::Uuid;

impl_document_entity_validated!(
    Team,
    "team",
    default_status: "active",
    ["name", "team_type", "status"],
    refs: [("lead_id", "user")],
    {
        team_type: String,
        #[serde(default)]
        member_ids: Vec<Uuid>,
        #[serde(default)]
        lead_id: Option<Uuid>,
    },
    validate: {
        create: {
            name: [required, string_length(2, 100)],
            team_type: [required, in_list("design", "development", "marketing")],
            lead_id: [uuid_ref],
            status: [in_list("active", "inactive")],
        },
        update: {
            name: [optional, string_length(2, 100)],
            team_type: [in_list("design", "development", "marketing")],
            lead_id: [uuid_ref],
            status: [in_list("active", "inactive")],
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

impl Team {
    /// Number of members, counting the lead when set and not already listed
    pub fn headcount(&self) -> usize {
        let mut count = self.member_ids.len();
        if let Some(lead) = self.lead_id {
            if !self.member_ids.contains(&lead) {
                count += 1;
            }
        }
        count
    }

    pub fn form_fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("name", "Team name", FieldKind::Text).required(),
            FieldDescriptor::new(
                "team_type",
                "Specialty",
                FieldKind::Select {
                    options: vec![
                        FieldOption::new("design", "Design"),
                        FieldOption::new("development", "Development"),
                        FieldOption::new("marketing", "Marketing"),
                    ],
                },
            )
            .required(),
            FieldDescriptor::new("lead_id", "Team lead", FieldKind::Select { options: vec![] }),
        ]
    }

    pub fn form_config() -> FormConfig {
        FormConfig {
            title: "New team".to_string(),
            description: None,
            fields: Self::form_fields(),
            endpoint: "/api/teams".to_string(),
            method: FormMethod::Post,
            submit_label: None,
        }
    }

    pub fn table_config() -> TableConfig {
        TableConfig::new("Teams", "/api/teams").with_columns(vec![
            ColumnDescriptor::new("name", "Team").sortable(),
            ColumnDescriptor::new("team_type", "Specialty").sortable(),
            ColumnDescriptor::new("status", "Status").with_kind(ColumnKind::Status),
        ])
    }
}
