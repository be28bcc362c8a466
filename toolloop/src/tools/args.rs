//! Typed accessors for decoded tool arguments.

use serde_json::{Map, Value};

use super::ToolError;

/// Returns the string argument `key`.
pub fn required_str<'a>(args: &'a Map<String, Value>, key: &str) -> Result<&'a str, ToolError> {
    match args.get(key) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(ToolError::InvalidInput(format!(
            "argument '{}' must be a string, got {}",
            key, other
        ))),
        None => Err(ToolError::InvalidInput(format!("missing argument '{}'", key))),
    }
}

/// Returns the numeric argument `key`. Numeric strings such as `"999"` are accepted,
/// since small models often quote numbers in free-text tool calls.
pub fn required_f64(args: &Map<String, Value>, key: &str) -> Result<f64, ToolError> {
    match args.get(key) {
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| {
            ToolError::InvalidInput(format!("argument '{}' is not a finite number", key))
        }),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| {
            ToolError::InvalidInput(format!("argument '{}' must be a number, got \"{}\"", key, s))
        }),
        Some(other) => Err(ToolError::InvalidInput(format!(
            "argument '{}' must be a number, got {}",
            key, other
        ))),
        None => Err(ToolError::InvalidInput(format!("missing argument '{}'", key))),
    }
}
