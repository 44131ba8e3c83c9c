//! Per-entity validation configuration
//!
//! An `EntityValidationConfig` is an ordered list of `(field, validator)` and
//! `(field, filter)` pairs assembled by the entity macros for one operation
//! ("create" or "update"). Filters run first and may rewrite values
//! (trimming, lowercasing); validators then run in declaration order and the
//! first failure per field wins.

use crate::core::error::FieldValidationError;
use serde_json::Value;

type Validator = Box<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;
type Filter = Box<dyn Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync>;

/// Validation and filtering rules for one entity operation
pub struct EntityValidationConfig {
    entity_type: String,
    validators: Vec<(String, Validator)>,
    filters: Vec<(String, Filter)>,
}

impl EntityValidationConfig {
    /// Create an empty configuration for an entity type
    pub fn new(entity_type: &str) -> Self {
        Self {
            entity_type: entity_type.to_string(),
            validators: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// The entity type this configuration belongs to
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// Append a validator for a field (declaration order is evaluation order)
    pub fn add_validator(
        &mut self,
        field: &str,
        validator: impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    ) {
        self.validators
            .push((field.to_string(), Box::new(validator)));
    }

    /// Append a filter for a field
    pub fn add_filter(
        &mut self,
        field: &str,
        filter: impl Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    ) {
        self.filters.push((field.to_string(), Box::new(filter)));
    }

    /// Run filters then validators over a JSON payload.
    ///
    /// Returns the filtered payload on success, or one error per failing
    /// field (the first broken rule for that field).
    pub fn validate_and_filter(
        &self,
        payload: Value,
    ) -> Result<Value, Vec<FieldValidationError>> {
        let mut object = match payload {
            Value::Object(map) => map,
            other => {
                return Err(vec![FieldValidationError {
                    field: "_body".to_string(),
                    message: format!("expected a JSON object, got {}", json_type_name(&other)),
                }]);
            }
        };

        // Filters only touch fields that are present in the payload.
        for (field, filter) in &self.filters {
            if let Some(value) = object.remove(field.as_str()) {
                match filter(field, value) {
                    Ok(filtered) => {
                        object.insert(field.clone(), filtered);
                    }
                    Err(e) => {
                        return Err(vec![FieldValidationError {
                            field: field.clone(),
                            message: e.to_string(),
                        }]);
                    }
                }
            }
        }

        let mut errors: Vec<FieldValidationError> = Vec::new();
        let mut failed_fields: Vec<&str> = Vec::new();

        for (field, validator) in &self.validators {
            if failed_fields.contains(&field.as_str()) {
                continue;
            }

            let value = object.get(field.as_str()).cloned().unwrap_or(Value::Null);
            if let Err(message) = validator(field, &value) {
                errors.push(FieldValidationError {
                    field: field.clone(),
                    message,
                });
                failed_fields.push(field.as_str());
            }
        }

        if errors.is_empty() {
            Ok(Value::Object(object))
        } else {
            Err(errors)
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::{filters, validators};
    use serde_json::json;

    fn service_create_config() -> EntityValidationConfig {
        let mut config = EntityValidationConfig::new("service");
        config.add_filter("name", filters::trim());
        config.add_validator("name", validators::required());
        config.add_validator("name", validators::string_length(2, 100));
        config.add_validator("base_price", validators::required());
        config.add_validator("base_price", validators::positive());
        config
    }

    #[test]
    fn test_valid_payload_passes() {
        let config = service_create_config();
        let result =
            config.validate_and_filter(json!({"name": "Logo Design", "base_price": 100.0}));
        assert!(result.is_ok());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let config = service_create_config();
        let result = config.validate_and_filter(json!({"base_price": 100.0}));

        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn test_first_failing_rule_per_field_wins() {
        let config = service_create_config();
        // name is null: the required error must be reported, not string_length
        let result = config.validate_and_filter(json!({"name": null, "base_price": -3}));

        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 2);
        let name_error = errors.iter().find(|e| e.field == "name").unwrap();
        assert!(name_error.message.contains("requis"));
    }

    #[test]
    fn test_filters_run_before_validators() {
        let config = service_create_config();
        let result = config
            .validate_and_filter(json!({"name": "  Logo Design  ", "base_price": 100.0}))
            .unwrap();
        assert_eq!(result["name"], "Logo Design");
    }

    #[test]
    fn test_filters_skip_absent_fields() {
        let mut config = EntityValidationConfig::new("service");
        config.add_filter("name", filters::trim());
        let result = config.validate_and_filter(json!({"base_price": 10})).unwrap();
        assert!(result.get("name").is_none());
    }

    #[test]
    fn test_non_object_payload_rejected() {
        let config = service_create_config();
        let errors = config.validate_and_filter(json!([1, 2, 3])).unwrap_err();
        assert_eq!(errors[0].field, "_body");
        assert!(errors[0].message.contains("array"));
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let config = service_create_config();
        let result = config
            .validate_and_filter(json!({
                "name": "Logo Design",
                "base_price": 100.0,
                "extra": "kept"
            }))
            .unwrap();
        assert_eq!(result["extra"], "kept");
    }
}
