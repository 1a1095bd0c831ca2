//! Central error types for the XML-RPC response decoder.

use core::fmt;

use crate::grammar::TagSet;

/// All failure modes of a decode pass.
///
/// Every error aborts the whole decode; no partial value is ever returned.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A tag (or text node) appeared where the response grammar does not
    /// permit it. Carries the permitted set, the offending node name, the
    /// element nesting depth and a raw input fragment for diagnostics.
    GrammarViolation {
        /// Tags that would have been accepted at this point.
        expected: TagSet,
        /// The node name actually found (`#text` for character data).
        found: String,
        /// Element nesting depth at the offending node.
        depth: usize,
        /// Raw input fragment around the offending node.
        context: String,
    },
    /// Text inside a typed scalar element could not be converted to the
    /// element's type (int, i4, double, dateTime.iso8601).
    TypeCoercion {
        /// The scalar tag whose coercion failed.
        tag: &'static str,
        /// The raw text that failed to parse.
        text: String,
    },
    /// A base64 payload could not be decoded.
    Decode {
        /// Why the payload was rejected.
        reason: String,
    },
    /// The underlying XML tokenizer failed.
    XmlParse(String),
    /// A `member` element closed without having received a `value` child.
    ///
    /// The grammar tracker rejects this shape before the build stack sees it;
    /// the stack still refuses to produce a half-built struct entry.
    MemberWithoutValue,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GrammarViolation { expected, found, depth, context } => write!(
                f,
                "invalid methodResponse: expected one of {expected}, got \"{found}\" on depth {depth} (context: \"{context}\")"
            ),
            Self::TypeCoercion { tag, text } => {
                write!(f, "invalid {tag} value \"{text}\"")
            }
            Self::Decode { reason } => write!(f, "decode error: {reason}"),
            Self::XmlParse(msg) => write!(f, "XML parse error: {msg}"),
            Self::MemberWithoutValue => {
                write!(f, "struct member closed without a value")
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Creates a `GrammarViolation` with context.
    pub fn grammar_violation(
        expected: TagSet,
        found: impl Into<String>,
        depth: usize,
        context: impl Into<String>,
    ) -> Self {
        Self::GrammarViolation {
            expected,
            found: found.into(),
            depth,
            context: context.into(),
        }
    }

    /// Creates a `TypeCoercion` error for a scalar tag and its raw text.
    pub fn type_coercion(tag: &'static str, text: impl Into<String>) -> Self {
        Self::TypeCoercion { tag, text: text.into() }
    }

    /// Creates a `Decode` error with a reason.
    pub fn decode_error(reason: impl Into<String>) -> Self {
        Self::Decode { reason: reason.into() }
    }
}

/// A convenience `Result` type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
