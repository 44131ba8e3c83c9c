//! Derived select options
//!
//! Cross-field dependencies (a project form's contract options depend on the
//! selected customer) are modeled as pure functions from the current
//! selection plus the full related collection to a filtered option list.
//! Pages call these on every relevant state change instead of chaining
//! effects.

use serde_json::Value;

use crate::panels::descriptor::FieldOption;

/// Options for a customer select, one per fetched customer document
pub fn customer_options(customers: &[Value]) -> Vec<FieldOption> {
    documents_to_options(customers.iter())
}

/// Options for a contract select, filtered to the selected customer.
///
/// No customer selected (None or empty string) means no contract can be
/// chosen yet: the result is empty and the page keeps the select disabled.
pub fn contract_options(customer_id: Option<&str>, contracts: &[Value]) -> Vec<FieldOption> {
    let Some(customer_id) = customer_id.filter(|id| !id.is_empty()) else {
        return Vec::new();
    };

    documents_to_options(
        contracts
            .iter()
            .filter(|contract| contract.get("customer_id").and_then(Value::as_str) == Some(customer_id)),
    )
}

/// Options for an assignee select, filtered to active staff
pub fn assignee_options(users: &[Value]) -> Vec<FieldOption> {
    documents_to_options(
        users
            .iter()
            .filter(|user| user.get("status").and_then(Value::as_str) == Some("active")),
    )
}

fn documents_to_options<'a>(documents: impl Iterator<Item = &'a Value>) -> Vec<FieldOption> {
    documents
        .filter_map(|doc| {
            let id = doc.get("id").and_then(Value::as_str)?;
            let label = doc.get("name").and_then(Value::as_str).unwrap_or(id);
            Some(FieldOption::new(id, label))
        })
        .collect()
}
