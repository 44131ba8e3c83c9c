//! Reusable field filters
//!
//! These filters transform document field values before validation

use anyhow::Result;
use serde_json::{Value, json};

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(s.trim().to_string()))
        } else {
            Ok(value)
        }
    }
}

/// Filter: convert string to lowercase
pub fn lowercase() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(s.to_lowercase()))
        } else {
            Ok(value)
        }
    }
}

/// Filter: round number to specified decimal places
pub fn round_decimals(
    decimals: u32,
) -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    move |_: &str, value: Value| {
        if let Some(num) = value.as_f64() {
            let factor = 10_f64.powi(decimals as i32);
            let rounded = (num * factor).round() / factor;
            Ok(json!(rounded))
        } else {
            Ok(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // === trim() ===

    #[test]
    fn test_trim_removes_whitespace() {
        let f = trim();
        let result = f("name", json!("  Logo Design  ")).expect("should not fail");
        assert_eq!(result, json!("Logo Design"));
    }

    #[test]
    fn test_trim_non_string_passthrough() {
        let f = trim();
        let result = f("amount", json!(42)).expect("should not fail");
        assert_eq!(result, json!(42));
    }

    #[test]
    fn test_trim_null_passthrough() {
        let f = trim();
        let result = f("name", json!(null)).expect("should not fail");
        assert_eq!(result, json!(null));
    }

    // === lowercase() ===

    #[test]
    fn test_lowercase_converts_string() {
        let f = lowercase();
        let result = f("email", json!("Someone@Example.COM")).expect("should not fail");
        assert_eq!(result, json!("someone@example.com"));
    }

    #[test]
    fn test_lowercase_non_string_passthrough() {
        let f = lowercase();
        let result = f("count", json!(3)).expect("should not fail");
        assert_eq!(result, json!(3));
    }

    // === round_decimals() ===

    #[test]
    fn test_round_decimals_rounds() {
        let f = round_decimals(2);
        let result = f("amount", json!(99.999)).expect("should not fail");
        assert_eq!(result, json!(100.0));
    }

    #[test]
    fn test_round_decimals_keeps_short_values() {
        let f = round_decimals(2);
        let result = f("amount", json!(10.25)).expect("should not fail");
        assert_eq!(result, json!(10.25));
    }

    #[test]
    fn test_round_decimals_non_number_passthrough() {
        let f = round_decimals(2);
        let result = f("name", json!("hello")).expect("should not fail");
        assert_eq!(result, json!("hello"));
    }
}
