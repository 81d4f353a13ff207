//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! schema-free items. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use itemstore_core::item::Item;
use itemstore_core::storage::RepositoryError;
use serde_json::{Number, Value};

// ============================================================================
// Item -> DynamoDB
// ============================================================================

/// Convert an item to a DynamoDB attribute map.
pub fn item_to_attributes(item: &Item) -> HashMap<String, AttributeValue> {
    item.iter()
        .map(|(name, value)| (name.clone(), value_to_attribute(value)))
        .collect()
}

/// Convert a single JSON value to its DynamoDB attribute.
///
/// Numbers are sent as `N` using their JSON text, so DynamoDB keeps the
/// precision it was given.
pub fn value_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(value_to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(item_to_attributes(map)),
    }
}

// ============================================================================
// DynamoDB -> Item
// ============================================================================

/// Convert a DynamoDB attribute map to an item.
pub fn attributes_to_item(
    attributes: &HashMap<String, AttributeValue>,
) -> Result<Item, RepositoryError> {
    attributes
        .iter()
        .map(|(name, attribute)| {
            attribute_to_value(attribute)
                .map(|value| (name.clone(), value))
                .map_err(|e| match e {
                    RepositoryError::InvalidData(msg) => {
                        RepositoryError::InvalidData(format!("Attribute {name}: {msg}"))
                    }
                    other => other,
                })
        })
        .collect()
}

/// Convert a single DynamoDB attribute to JSON.
///
/// Sets come back as arrays and binary values as base64 strings, since JSON
/// has neither.
pub fn attribute_to_value(attribute: &AttributeValue) -> Result<Value, RepositoryError> {
    match attribute {
        AttributeValue::S(s) => Ok(Value::String(s.clone())),
        AttributeValue::N(n) => parse_number(n),
        AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::L(values) => values
            .iter()
            .map(attribute_to_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::M(map) => attributes_to_item(map).map(Value::Object),
        AttributeValue::Ss(strings) => Ok(Value::Array(
            strings.iter().cloned().map(Value::String).collect(),
        )),
        AttributeValue::Ns(numbers) => numbers
            .iter()
            .map(|n| parse_number(n))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::B(blob) => Ok(encode_blob(blob)),
        AttributeValue::Bs(blobs) => Ok(Value::Array(blobs.iter().map(encode_blob).collect())),
        _ => Err(RepositoryError::InvalidData(
            "Unsupported attribute type".to_string(),
        )),
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Parse a DynamoDB number, preferring integers over floats.
fn parse_number(raw: &str) -> Result<Value, RepositoryError> {
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Value::from(i));
    }
    if let Ok(u) = raw.parse::<u64>() {
        return Ok(Value::from(u));
    }

    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| RepositoryError::InvalidData(format!("Invalid number: {raw}")))
}

fn encode_blob(blob: &Blob) -> Value {
    Value::String(STANDARD.encode(blob.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn widget() -> Item {
        match json!({
            "id": "1",
            "name": "widget",
            "price": 9.5,
            "qty": 3,
            "active": true,
            "discontinued": null,
            "tags": ["blue", "small"],
            "dimensions": {"w": 10, "h": 20}
        }) {
            Value::Object(item) => item,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_item_to_attributes_types() {
        let attributes = item_to_attributes(&widget());

        assert_eq!(attributes.get("id").unwrap().as_s().unwrap(), "1");
        assert_eq!(attributes.get("qty").unwrap().as_n().unwrap(), "3");
        assert_eq!(attributes.get("price").unwrap().as_n().unwrap(), "9.5");
        assert!(*attributes.get("active").unwrap().as_bool().unwrap());
        assert!(attributes.get("discontinued").unwrap().is_null());
        assert_eq!(attributes.get("tags").unwrap().as_l().unwrap().len(), 2);
        assert_eq!(
            attributes
                .get("dimensions")
                .unwrap()
                .as_m()
                .unwrap()
                .get("w")
                .unwrap()
                .as_n()
                .unwrap(),
            "10"
        );
    }

    #[test]
    fn test_item_round_trip() {
        let item = widget();
        let parsed = attributes_to_item(&item_to_attributes(&item)).unwrap();

        assert_eq!(parsed, item);
    }

    #[test]
    fn test_number_parsing() {
        assert_eq!(parse_number("42").unwrap(), json!(42));
        assert_eq!(parse_number("-7").unwrap(), json!(-7));
        assert_eq!(parse_number("18446744073709551615").unwrap(), json!(u64::MAX));
        assert_eq!(parse_number("0.25").unwrap(), json!(0.25));
        assert!(parse_number("not-a-number").is_err());
    }

    #[test]
    fn test_sets_become_arrays() {
        let mut attributes = HashMap::new();
        attributes.insert(
            "colors".to_string(),
            AttributeValue::Ss(vec!["red".to_string(), "green".to_string()]),
        );
        attributes.insert(
            "sizes".to_string(),
            AttributeValue::Ns(vec!["1".to_string(), "2.5".to_string()]),
        );

        let item = attributes_to_item(&attributes).unwrap();

        assert_eq!(item["colors"], json!(["red", "green"]));
        assert_eq!(item["sizes"], json!([1, 2.5]));
    }

    #[test]
    fn test_binary_becomes_base64() {
        let mut attributes = HashMap::new();
        attributes.insert("data".to_string(), AttributeValue::B(Blob::new("hi")));

        let item = attributes_to_item(&attributes).unwrap();

        assert_eq!(item["data"], json!("aGk="));
    }

    #[test]
    fn test_invalid_number_names_attribute() {
        let mut attributes = HashMap::new();
        attributes.insert("qty".to_string(), AttributeValue::N("abc".to_string()));

        let err = attributes_to_item(&attributes).unwrap_err();

        assert_eq!(
            err,
            RepositoryError::InvalidData("Attribute qty: Invalid number: abc".to_string())
        );
    }
}
