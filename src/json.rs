//! JSON rendering of decoded responses.
//!
//! Maps the XML-RPC value alphabet onto JSON for the CLI and for callers
//! handing decoded responses to JSON consumers: binary payloads are
//! re-encoded as base64 text, timestamps use their lexical form, and a fault
//! renders as an object with a single `fault` member. Struct member order is
//! preserved.

use serde_json::Value as Json;

use crate::binary;
use crate::value::{Response, Value};

/// Renders a decoded value as JSON.
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Str(text) => Json::String(text.clone()),
        Value::Int(i) => Json::from(*i),
        Value::Bool(b) => Json::Bool(*b),
        // Non-finite doubles have no JSON representation and render as null.
        Value::Double(d) => serde_json::Number::from_f64(*d).map_or(Json::Null, Json::Number),
        Value::DateTime(dt) => Json::String(dt.to_string()),
        Value::Binary(bytes) => Json::String(binary::encode(bytes)),
        Value::Array(items) => Json::Array(items.iter().map(value_to_json).collect()),
        Value::Struct(members) => Json::Object(
            members
                .iter()
                .map(|(name, value)| (name.clone(), value_to_json(value)))
                .collect(),
        ),
    }
}

/// Renders a decoded response as JSON: the success payload itself, a
/// `{"fault": ...}` object, or null for an empty response.
pub fn response_to_json(response: &Response) -> Json {
    match response {
        Response::Success(value) => value_to_json(value),
        Response::Fault(fault) => {
            let mut object = serde_json::Map::new();
            object.insert("fault".to_string(), value_to_json(fault.value()));
            Json::Object(object)
        }
        Response::Empty => Json::Null,
    }
}
