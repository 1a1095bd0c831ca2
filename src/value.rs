//! The decoded value model of an XML-RPC response.
//!
//! Mirrors the type alphabet of the protocol: six scalar kinds plus arrays
//! and structs. Struct members keep their document order because XML-RPC
//! consumers may round-trip responses where member order is significant;
//! lookup is still by key.

use core::fmt;

use crate::datetime::DateTime;

/// Ordered member map of a decoded `<struct>`.
///
/// Duplicate member names follow last-write-wins: the value is replaced, the
/// original position is kept.
pub type Members = crate::FastIndexMap<String, Value>;

/// A decoded XML-RPC value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `<string>`: raw UTF-8 text.
    Str(String),
    /// `<int>` / `<i4>`: signed integer.
    Int(i64),
    /// `<boolean>`: `1` is true, anything else is false.
    Bool(bool),
    /// `<double>`: IEEE-754 double precision.
    Double(f64),
    /// `<dateTime.iso8601>`: calendar timestamp, UTC, second precision.
    DateTime(DateTime),
    /// `<base64>`: decoded byte payload.
    Binary(Vec<u8>),
    /// `<array>`: ordered value sequence.
    Array(Vec<Value>),
    /// `<struct>`: ordered name/value member map.
    Struct(Members),
}

impl Value {
    /// The protocol-level type name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Int(_) => "int",
            Value::Bool(_) => "boolean",
            Value::Double(_) => "double",
            Value::DateTime(_) => "dateTime.iso8601",
            Value::Binary(_) => "base64",
            Value::Array(_) => "array",
            Value::Struct(_) => "struct",
        }
    }

    /// The text if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The integer if this is an int/i4 value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The boolean if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The float if this is a double value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// The timestamp if this is a dateTime value.
    pub fn as_datetime(&self) -> Option<DateTime> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// The bytes if this is a base64 value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// The items if this is an array value.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The member map if this is a struct value.
    pub fn as_struct(&self) -> Option<&Members> {
        match self {
            Value::Struct(members) => Some(members),
            _ => None,
        }
    }

    /// Struct member lookup by name; `None` for non-structs too.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.as_struct()?.get(name)
    }
}

/// A decoded `<fault>` payload.
///
/// By convention the payload is a struct with `faultCode` and `faultString`
/// members; the accessors look those up and return `None` when a server sent
/// something else. Translating a fault into an error is the caller's job.
#[derive(Debug, Clone, PartialEq)]
pub struct Fault {
    value: Value,
}

impl Fault {
    /// Wraps a decoded fault payload.
    pub fn new(value: Value) -> Fault {
        Fault { value }
    }

    /// The conventional `faultCode` member.
    pub fn code(&self) -> Option<i64> {
        self.value.get("faultCode")?.as_i64()
    }

    /// The conventional `faultString` member.
    pub fn message(&self) -> Option<&str> {
        self.value.get("faultString")?.as_str()
    }

    /// The raw fault payload.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Consumes the fault, returning the raw payload.
    pub fn into_value(self) -> Value {
        self.value
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code(), self.message()) {
            (Some(code), Some(message)) => write!(f, "fault {code}: {message}"),
            _ => write!(f, "fault with non-standard payload"),
        }
    }
}

/// The outcome of decoding a methodResponse document.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// The payload of the first `<param>`.
    Success(Value),
    /// The document's root was `<fault>`.
    Fault(Fault),
    /// The document carried no param and no fault value.
    Empty,
}

impl Response {
    /// The success payload, if any.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Response::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Consumes the response, returning the success payload.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Response::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Whether this is a fault response.
    pub fn is_fault(&self) -> bool {
        matches!(self, Response::Fault(_))
    }

    /// Whether the document produced no value at all.
    pub fn is_empty(&self) -> bool {
        matches!(self, Response::Empty)
    }
}
