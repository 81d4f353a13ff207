//! Trigger envelope types.
//!
//! The HTTP trigger delivers an [`Event`] carrying the request method and an
//! optional body, and expects a [`Response`] with a status code and a
//! JSON-encoded body back. Only the fields the dispatcher reads are modelled;
//! everything else in the proxy event is ignored.

use std::collections::BTreeMap;
use std::io;

use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, Serializer};
use serde_json::{json, Value};

/// Status codes produced by the dispatcher.
pub mod status {
    pub const OK: u16 = 200;
    pub const BAD_REQUEST: u16 = 400;
    pub const METHOD_NOT_ALLOWED: u16 = 405;
}

/// Methods the dispatcher routes on.
pub const ALLOWED_METHODS: &str = "GET, POST";

/// Inbound request descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Request verb. A missing method deserializes as empty and is rejected
    /// by the dispatcher instead of failing the invocation.
    #[serde(default)]
    pub http_method: String,
    /// Request payload, present for write-style verbs.
    #[serde(default)]
    pub body: Option<String>,
}

impl Event {
    pub fn new(http_method: impl Into<String>, body: Option<String>) -> Self {
        Self {
            http_method: http_method.into(),
            body,
        }
    }

    /// Returns the routed method for this event.
    pub fn method(&self) -> Method {
        Method::parse(&self.http_method)
    }
}

/// Routing decision derived from [`Event::http_method`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// List every item.
    Get,
    /// Create a single item.
    Post,
    /// Any verb without a handler.
    Other(String),
}

impl Method {
    /// Parses a verb exactly as the trigger sends it (upper case).
    pub fn parse(verb: &str) -> Self {
        match verb {
            "GET" => Method::Get,
            "POST" => Method::Post,
            other => Method::Other(other.to_string()),
        }
    }
}

/// Outbound response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl Response {
    /// Builds a response whose body is `payload` encoded by [`encode_body`].
    pub fn json(status_code: u16, payload: &Value) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        Self {
            status_code,
            headers,
            body: encode_body(payload),
        }
    }

    /// A 200 response carrying `payload`.
    pub fn ok(payload: &Value) -> Self {
        Self::json(status::OK, payload)
    }

    /// An error response with body `{"error": "<message>"}`.
    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self::json(status_code, &json!({ "error": message.into() }))
    }

    /// A 405 response naming the rejected verb, with an `Allow` header.
    pub fn method_not_allowed(verb: &str) -> Self {
        let mut response = Self::error(
            status::METHOD_NOT_ALLOWED,
            format!("Method {verb} not allowed"),
        );
        response
            .headers
            .insert("Allow".to_string(), ALLOWED_METHODS.to_string());
        response
    }

    /// Decodes the body back into JSON.
    pub fn body_json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

/// Single-line JSON with `", "` between elements and `": "` after keys.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

/// Encodes a response body, e.g. `{"message": "Item created"}`.
pub fn encode_body(payload: &Value) -> String {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, SpacedFormatter);

    // Serializing a `Value` into a Vec does not fail in practice.
    match payload.serialize(&mut serializer) {
        Ok(()) => String::from_utf8(buf).unwrap_or_else(|_| payload.to_string()),
        Err(_) => payload.to_string(),
    }
}
