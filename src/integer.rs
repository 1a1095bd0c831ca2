//! Signed integer text decoding for `<int>` and `<i4>`.

use crate::error::{Error, Result};

/// Decodes integer text, trimming surrounding whitespace.
///
/// `tag` is the element name (`int` or `i4`) reported on failure, so a bad
/// `<i4>` payload is attributed to `i4` and not its alias.
pub fn decode(tag: &'static str, text: &str) -> Result<i64> {
    text.trim()
        .parse()
        .map_err(|_| Error::type_coercion(tag, text))
}
