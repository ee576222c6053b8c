//! Argument helpers for template functions.
//!
//! Tera passes function arguments by name as JSON values. A missing
//! required argument is a template authoring mistake and is reported as a
//! Tera error; optional arguments fall back to a default.

use std::collections::HashMap;
use tera::Value;

/// Fetch a required string argument.
pub fn required_str<'a>(
    function: &str,
    args: &'a HashMap<String, Value>,
    name: &str,
) -> tera::Result<&'a str> {
    match args.get(name) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(tera::Error::msg(format!(
            "Function `{function}` expects argument `{name}` to be a string, got {other}"
        ))),
        None => {
            Err(tera::Error::msg(format!("Function `{function}` requires argument `{name}`")))
        }
    }
}

/// Fetch an optional string argument, defaulting when absent or not a string.
pub fn optional_str<'a>(args: &'a HashMap<String, Value>, name: &str, default: &'a str) -> &'a str {
    args.get(name).and_then(Value::as_str).unwrap_or(default)
}

/// Fetch an optional boolean argument.
pub fn optional_bool(args: &HashMap<String, Value>, name: &str, default: bool) -> bool {
    args.get(name).and_then(Value::as_bool).unwrap_or(default)
}
