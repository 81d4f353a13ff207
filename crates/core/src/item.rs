//! Schema-free table items.

use serde_json::{Map, Value};
use thiserror::Error;

/// A table record: an open mapping from attribute names to JSON values.
///
/// No schema is enforced. Key attributes and their uniqueness are the
/// storage engine's concern.
pub type Item = Map<String, Value>;

/// Errors that can occur when turning a request body into an [`Item`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("Request body is required")]
    MissingBody,
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),
    #[error("Item must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Parses a create request body into an [`Item`].
///
/// The body must be a JSON object. Arrays, scalars and `null` are rejected
/// because they cannot be stored as a table item.
///
/// # Examples
///
/// ```
/// use itemstore_core::item::parse_item;
///
/// let item = parse_item(Some(r#"{"id": "1", "name": "widget"}"#)).unwrap();
/// assert_eq!(item["name"], "widget");
/// ```
pub fn parse_item(body: Option<&str>) -> Result<Item, ItemError> {
    let body = body.ok_or(ItemError::MissingBody)?;

    let value: Value =
        serde_json::from_str(body).map_err(|e| ItemError::InvalidJson(e.to_string()))?;

    match value {
        Value::Object(item) => Ok(item),
        other => Err(ItemError::NotAnObject(json_type_name(&other))),
    }
}

/// Wraps a list of items into a JSON array value.
pub fn items_to_value(items: Vec<Item>) -> Value {
    Value::Array(items.into_iter().map(Value::Object).collect())
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
