//! Base64 payload decoding for `<base64>`.
//!
//! Uses the standard alphabet with canonical padding. Surrounding whitespace
//! is trimmed; interior whitespace is rejected like any other invalid byte.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{Error, Result};

/// Decodes standard-alphabet base64 text into bytes.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(text.trim())
        .map_err(|e| Error::decode_error(format!("invalid base64: {e}")))
}

/// Encodes bytes as standard-alphabet base64 text.
pub fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}
