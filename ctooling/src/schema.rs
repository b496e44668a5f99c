//! Declared-schema validation and default filling for tool arguments.
//!
//! Covers the subset of JSON Schema that tool declarations actually use:
//! `type`, `required`, `properties`, `items` and `default`. Anything outside
//! that subset is accepted rather than rejected.

use serde_json::{Map, Value};

use crate::ToolError;

/// Inserts declared property defaults for keys absent from `args`, recursing
/// into nested object properties the caller did supply.
pub fn fill_defaults(schema: &Value, args: &mut Value) {
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return;
    };
    let Some(args_map) = args.as_object_mut() else {
        return;
    };

    for (key, property_schema) in properties {
        match args_map.get_mut(key) {
            None => {
                if let Some(default) = property_schema.get("default") {
                    args_map.insert(key.clone(), default.clone());
                }
            }
            Some(existing) if existing.is_object() => {
                fill_defaults(property_schema, existing);
            }
            Some(_) => {}
        }
    }
}

/// Validates `args` against the tool's declared parameter schema.
pub fn validate_arguments(
    tool_name: &str,
    schema: &Value,
    args: &Value,
) -> Result<(), ToolError> {
    validate_value("arguments", schema, args)
        .map_err(|message| ToolError::invalid_arguments(message).with_tool_name(tool_name))
}

fn validate_value(path: &str, schema: &Value, value: &Value) -> Result<(), String> {
    let Some(schema) = schema.as_object() else {
        return Ok(());
    };

    if let Some(expected) = schema.get("type").and_then(Value::as_str) {
        if !type_matches(expected, value) {
            return Err(format!(
                "{path}: expected {expected}, got {}",
                type_name(value)
            ));
        }
    }

    if let Some(object) = value.as_object() {
        validate_object(path, schema, object)?;
    }

    if let Some(items) = schema.get("items") {
        if let Some(elements) = value.as_array() {
            for (index, element) in elements.iter().enumerate() {
                validate_value(&format!("{path}[{index}]"), items, element)?;
            }
        }
    }

    Ok(())
}

fn validate_object(
    path: &str,
    schema: &Map<String, Value>,
    object: &Map<String, Value>,
) -> Result<(), String> {
    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for name in required.iter().filter_map(Value::as_str) {
            if !object.contains_key(name) {
                return Err(format!("{path}: missing required field '{name}'"));
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (key, property_schema) in properties {
            if let Some(field) = object.get(key) {
                validate_value(&format!("{path}.{key}"), property_schema, field)?;
            }
        }
    }

    Ok(())
}

fn type_matches(expected: &str, value: &Value) -> bool {
    match expected {
        "object" => value.is_object(),
        "array" => value.is_array(),
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
