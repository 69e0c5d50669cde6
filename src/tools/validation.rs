//! Argument validation against a tool's declared input schema.
//!
//! Only the subset of JSON Schema the bundled tools declare is checked:
//! `required`, per-property `type`, and per-property `enum`. Undeclared
//! properties are allowed (JSON Schema default behavior).

use rmcp::model::JsonObject;
use serde_json::Value;

use crate::error::{ToolError, ToolResult};

/// Validate `args` against `schema`, returning the first violation found.
///
/// Required properties are checked in the order the schema lists them, then
/// supplied properties in the order the schema declares them, so the
/// reported error is deterministic.
pub fn validate_arguments(schema: &JsonObject, args: &JsonObject) -> ToolResult<()> {
    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for field in required.iter().filter_map(Value::as_str) {
            match args.get(field) {
                None | Some(Value::Null) => {
                    return Err(ToolError::MissingArgument(field.to_string()));
                }
                Some(_) => {}
            }
        }
    }

    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Ok(());
    };

    for (field, prop_schema) in properties {
        let Some(value) = args.get(field) else {
            continue;
        };
        // null on an optional property means "not supplied"
        if value.is_null() {
            continue;
        }
        validate_property(field, value, prop_schema)?;
    }

    Ok(())
}

fn validate_property(field: &str, value: &Value, prop_schema: &Value) -> ToolResult<()> {
    if let Some(expected) = prop_schema.get("type").and_then(Value::as_str) {
        if !matches_type(value, expected) {
            return Err(ToolError::InvalidArgumentType {
                field: field.to_string(),
                expected: expected.to_string(),
            });
        }
    }

    if let Some(allowed) = prop_schema.get("enum").and_then(Value::as_array) {
        if !allowed.contains(value) {
            return Err(ToolError::InvalidEnumValue {
                field: field.to_string(),
                value: display_value(value),
                allowed: allowed.iter().map(display_value).collect(),
            });
        }
    }

    Ok(())
}

fn matches_type(value: &Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        // Unknown type keywords are not ours to enforce.
        _ => true,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    fn item_schema() -> JsonObject {
        object(json!({
            "type": "object",
            "properties": {
                "title": { "type": "string" },
                "description": { "type": "string" },
                "priority": { "type": "string", "enum": ["low", "medium", "high"] },
                "count": { "type": "integer" }
            },
            "required": ["title", "priority"]
        }))
    }

    #[test]
    fn test_valid_arguments() {
        let args = object(json!({ "title": "X", "priority": "high" }));
        assert!(validate_arguments(&item_schema(), &args).is_ok());
    }

    #[test]
    fn test_missing_required() {
        let args = object(json!({ "priority": "high" }));
        let err = validate_arguments(&item_schema(), &args).unwrap_err();
        assert_eq!(err, ToolError::MissingArgument("title".to_string()));
    }

    #[test]
    fn test_required_null_counts_as_missing() {
        let args = object(json!({ "title": null, "priority": "low" }));
        let err = validate_arguments(&item_schema(), &args).unwrap_err();
        assert_eq!(err, ToolError::MissingArgument("title".to_string()));
    }

    #[test]
    fn test_optional_null_is_absent() {
        let args = object(json!({ "title": "X", "priority": "low", "description": null }));
        assert!(validate_arguments(&item_schema(), &args).is_ok());
    }

    #[test]
    fn test_enum_violation() {
        let args = object(json!({ "title": "X", "priority": "urgent" }));
        let err = validate_arguments(&item_schema(), &args).unwrap_err();
        assert!(matches!(
            err,
            ToolError::InvalidEnumValue { ref field, ref value, .. } if field == "priority" && value == "urgent"
        ));
    }

    #[test]
    fn test_type_violation() {
        let args = object(json!({ "title": 7, "priority": "low" }));
        let err = validate_arguments(&item_schema(), &args).unwrap_err();
        assert_eq!(
            err,
            ToolError::InvalidArgumentType {
                field: "title".to_string(),
                expected: "string".to_string(),
            }
        );
    }

    #[test]
    fn test_integer_rejects_float() {
        let args = object(json!({ "title": "X", "priority": "low", "count": 1.5 }));
        assert!(validate_arguments(&item_schema(), &args).is_err());
    }

    #[test]
    fn test_undeclared_properties_allowed() {
        let args = object(json!({ "title": "X", "priority": "low", "extra": [1, 2] }));
        assert!(validate_arguments(&item_schema(), &args).is_ok());
    }

    #[test]
    fn test_empty_schema_accepts_anything() {
        let schema = object(json!({ "type": "object", "properties": {}, "required": [] }));
        let args = object(json!({ "anything": true }));
        assert!(validate_arguments(&schema, &args).is_ok());
    }
}
