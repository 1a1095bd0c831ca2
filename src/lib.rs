//! rxmlrpc – streaming XML-RPC `methodResponse` decoder
//!
//! Decodes an XML-RPC response document (<http://xmlrpc.com/spec.md>) into a
//! typed value tree in one forward pass over a streaming XML token source.
//! No DOM is built; the decoder validates the response grammar tag by tag and
//! folds nested arrays, structs and scalars incrementally.
//!
//! # Example
//!
//! ```
//! use rxmlrpc::{decode_response, Response, Value};
//!
//! let xml = "<methodResponse><params><param>\
//!            <value><int>42</int></value>\
//!            </param></params></methodResponse>";
//! match decode_response(xml).unwrap() {
//!     Response::Success(value) => assert_eq!(value, Value::Int(42)),
//!     other => panic!("unexpected response: {other:?}"),
//! }
//! ```

pub mod binary;
pub mod boolean;
pub mod datetime;
pub mod decoder;
pub mod double;
pub mod error;
pub mod grammar;
pub mod integer;
pub mod json;
pub mod value;
pub mod xml;

pub use error::{Error, Result};

/// IndexMap with ahash (deterministic iteration + fast hashing).
pub(crate) type FastIndexMap<K, V> = indexmap::IndexMap<K, V, ahash::RandomState>;

// Public API: values
pub use datetime::DateTime;
pub use value::{Fault, Members, Response, Value};

// Public API: decoder
pub use decoder::{decode_response, decode_response_bytes};

// Public API: grammar / token source
pub use grammar::{Tag, TagSet};
pub use xml::{TokenSource, XmlToken};
