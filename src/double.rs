//! Double text decoding for `<double>`.

use crate::error::{Error, Result};

/// Decodes double text as an IEEE-754 f64, trimming surrounding whitespace.
pub fn decode(text: &str) -> Result<f64> {
    text.trim()
        .parse()
        .map_err(|_| Error::type_coercion("double", text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_valid() {
        assert_eq!(decode("3.14").unwrap(), 3.14);
        assert_eq!(decode("-0.5").unwrap(), -0.5);
        assert_eq!(decode("42").unwrap(), 42.0);
        assert_eq!(decode("+1.0").unwrap(), 1.0);
    }

    #[test]
    fn decode_trims_whitespace() {
        assert_eq!(decode(" 2.5 ").unwrap(), 2.5);
    }

    #[test]
    fn decode_rejects_non_numeric() {
        for text in ["", "   ", "abc", "1.2.3", "3,14"] {
            let err = decode(text).unwrap_err();
            assert_eq!(err, Error::type_coercion("double", text), "{text:?}");
        }
    }
}
