//! User entity: staff accounts with a role and permission claims.
//!
//! The role gates which management views a user can reach; both the role and
//! the permission list are embedded in the JWT issued at login.

use crate::panels::descriptor::{
    ColumnDescriptor, ColumnKind, FieldDescriptor, FieldKind, FieldOption, FormConfig, FormMethod,
    TableConfig,
};
use crate::impl_document_entity_validated;

/// Roles a staff account can hold
pub const ROLES: &[&str] = &["admin", "manager", "employee"];

impl_document_entity_validated!(
    User,
    "user",
    default_status: "active",
    ["name", "phone_number", "role", "status"],
    refs: [],
    {
        phone_number: String,
        password_hash: String,
        role: String,
        #[serde(default)]
        permissions: Vec<String>,
    },
    validate: {
        create: {
            name: [required, string_length(2, 100)],
            phone_number: [required, phone],
            password_hash: [required],
            role: [required, in_list("admin", "manager", "employee")],
            status: [in_list("active", "inactive")],
        },
        update: {
            name: [optional, string_length(2, 100)],
            phone_number: [optional, phone],
            role: [in_list("admin", "manager", "employee")],
            status: [in_list("active", "inactive")],
        },
    },
    filters: {
        create: {
            name: [trim],
            phone_number: [trim],
        },
        update: {
            name: [trim],
            phone_number: [trim],
        },
    }
);

impl User {
    /// Whether this account may sign in (deactivated accounts get a 403)
    pub fn can_login(&self) -> bool {
        self.status == "active"
    }

    pub fn form_fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("name", "Full name", FieldKind::Text).required(),
            FieldDescriptor::new("phone_number", "Phone number", FieldKind::Tel).required(),
            FieldDescriptor::new("password_hash", "Password", FieldKind::Password).required(),
            FieldDescriptor::new(
                "role",
                "Role",
                FieldKind::Select {
                    options: ROLES
                        .iter()
                        .map(|r| FieldOption::new(*r, capitalize(r)))
                        .collect(),
                },
            )
            .required(),
            FieldDescriptor::new(
                "status",
                "Status",
                FieldKind::Radio {
                    options: vec![
                        FieldOption::new("active", "Active"),
                        FieldOption::new("inactive", "Inactive"),
                    ],
                },
            ),
        ]
    }

    pub fn form_config() -> FormConfig {
        FormConfig {
            title: "New team member".to_string(),
            description: None,
            fields: Self::form_fields(),
            endpoint: "/api/users".to_string(),
            method: FormMethod::Post,
            submit_label: Some("Create account".to_string()),
        }
    }

    pub fn table_config() -> TableConfig {
        TableConfig::new("Staff", "/api/users").with_columns(vec![
            ColumnDescriptor::new("name", "Name").sortable(),
            ColumnDescriptor::new("phone_number", "Phone"),
            ColumnDescriptor::new("role", "Role").sortable(),
            ColumnDescriptor::new("status", "Status").with_kind(ColumnKind::Status),
        ])
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::ValidatableEntity;
    use serde_json::json;

    #[test]
    fn test_unknown_role_rejected() {
        let config = User::validation_config("create");
        let errors = config
            .validate_and_filter(json!({
                "name": "Sara",
                "phone_number": "+33612345678",
                "password_hash": "$argon2id$stub",
                "role": "owner"
            }))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "role");
    }

    #[test]
    fn test_can_login_follows_status() {
        let mut user = User::new(
            "Sara".to_string(),
            "active".to_string(),
            "+33612345678".to_string(),
            "$argon2id$stub".to_string(),
            "manager".to_string(),
            vec!["projects:read".to_string()],
        );
        assert!(user.can_login());

        user.set_status("inactive".to_string());
        assert!(!user.can_login());
    }

    #[test]
    fn test_permissions_default_to_empty() {
        let value = json!({
            "id": uuid::Uuid::new_v4(),
            "type": "user",
            "created_at": chrono::Utc::now(),
            "updated_at": chrono::Utc::now(),
            "status": "active",
            "name": "Sara",
            "phone_number": "+33612345678",
            "password_hash": "$argon2id$stub",
            "role": "employee"
        });
        let user: User = serde_json::from_value(value).unwrap();
        assert!(user.permissions.is_empty());
    }
}
