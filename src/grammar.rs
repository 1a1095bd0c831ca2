//! The methodResponse grammar (<http://xmlrpc.com/spec.md>).
//!
//! Defines the tag alphabet of an XML-RPC response document, the permitted-tag
//! sets the decoder tracks, and the child sets entered on every open tag:
//!
//! ```text
//! methodResponse -> params | fault
//! params         -> param*
//! param          -> value
//! fault          -> value
//! value          -> string|array|struct|int|i4|boolean|double|dateTime.iso8601|base64
//! array          -> data
//! data           -> value*
//! struct         -> member*
//! member         -> name value
//! name           -> text
//! <scalar tag>   -> text
//! ```
//!
//! The continuation after a close tag depends on the enclosing build frame
//! and is computed by the decoder; the open transitions are pure functions of
//! the tag and live here.

use core::fmt;

use crate::error::Result;
use crate::value::Value;
use crate::{binary, boolean, datetime, double, integer};

/// The tag alphabet of a methodResponse document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Tag {
    MethodResponse = 0,
    Params,
    Param,
    Fault,
    Value,
    Array,
    Data,
    Struct,
    Member,
    Name,
    String,
    Int,
    I4,
    Boolean,
    Double,
    DateTime,
    Base64,
}

impl Tag {
    /// All tags, in declaration order.
    pub const ALL: [Tag; 17] = [
        Tag::MethodResponse,
        Tag::Params,
        Tag::Param,
        Tag::Fault,
        Tag::Value,
        Tag::Array,
        Tag::Data,
        Tag::Struct,
        Tag::Member,
        Tag::Name,
        Tag::String,
        Tag::Int,
        Tag::I4,
        Tag::Boolean,
        Tag::Double,
        Tag::DateTime,
        Tag::Base64,
    ];

    /// Looks up a tag by its element name. Returns `None` for any name that
    /// is not part of the response grammar.
    pub fn from_name(name: &str) -> Option<Tag> {
        Some(match name {
            "methodResponse" => Tag::MethodResponse,
            "params" => Tag::Params,
            "param" => Tag::Param,
            "fault" => Tag::Fault,
            "value" => Tag::Value,
            "array" => Tag::Array,
            "data" => Tag::Data,
            "struct" => Tag::Struct,
            "member" => Tag::Member,
            "name" => Tag::Name,
            "string" => Tag::String,
            "int" => Tag::Int,
            "i4" => Tag::I4,
            "boolean" => Tag::Boolean,
            "double" => Tag::Double,
            "dateTime.iso8601" => Tag::DateTime,
            "base64" => Tag::Base64,
            _ => return None,
        })
    }

    /// The element name of this tag.
    pub fn name(self) -> &'static str {
        match self {
            Tag::MethodResponse => "methodResponse",
            Tag::Params => "params",
            Tag::Param => "param",
            Tag::Fault => "fault",
            Tag::Value => "value",
            Tag::Array => "array",
            Tag::Data => "data",
            Tag::Struct => "struct",
            Tag::Member => "member",
            Tag::Name => "name",
            Tag::String => "string",
            Tag::Int => "int",
            Tag::I4 => "i4",
            Tag::Boolean => "boolean",
            Tag::Double => "double",
            Tag::DateTime => "dateTime.iso8601",
            Tag::Base64 => "base64",
        }
    }

    /// The scalar kind for leaf-value tags, `None` for structural tags.
    pub fn as_scalar(self) -> Option<ScalarTag> {
        Some(match self {
            Tag::String => ScalarTag::String,
            Tag::Int => ScalarTag::Int,
            Tag::I4 => ScalarTag::I4,
            Tag::Boolean => ScalarTag::Boolean,
            Tag::Double => ScalarTag::Double,
            Tag::DateTime => ScalarTag::DateTime,
            Tag::Base64 => ScalarTag::Base64,
            _ => return None,
        })
    }
}

/// A set of tags permitted at the current point of the document, plus a flag
/// for whether character data (`#text`) is the expected next token.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TagSet(u32);

impl TagSet {
    const TEXT_BIT: u32 = 1 << 31;

    /// The empty set.
    pub const EMPTY: TagSet = TagSet(0);

    /// Builds a set from a list of tags.
    pub const fn of(tags: &[Tag]) -> TagSet {
        let mut bits = 0u32;
        let mut i = 0;
        while i < tags.len() {
            bits |= 1 << (tags[i] as u32);
            i += 1;
        }
        TagSet(bits)
    }

    /// Returns this set with the `#text` expectation added.
    pub const fn with_text(self) -> TagSet {
        TagSet(self.0 | Self::TEXT_BIT)
    }

    /// Whether `tag` is permitted.
    pub const fn contains(self, tag: Tag) -> bool {
        self.0 & (1 << (tag as u32)) != 0
    }

    /// Whether character data is the expected next token.
    pub const fn expects_text(self) -> bool {
        self.0 & Self::TEXT_BIT != 0
    }
}

impl fmt::Display for TagSet {
    /// Renders as a quoted, comma-separated name list, e.g. `"param", "fault"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for tag in Tag::ALL {
            if self.contains(tag) {
                if !first {
                    f.write_str(", ")?;
                }
                write!(f, "\"{}\"", tag.name())?;
                first = false;
            }
        }
        if self.expects_text() {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str("\"#text\"")?;
        }
        Ok(())
    }
}

impl fmt::Debug for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TagSet({self})")
    }
}

/// Permitted set at the very start of the document.
pub(crate) const DOCUMENT_START: TagSet = TagSet::of(&[Tag::MethodResponse]);

/// The nine type elements permitted directly inside `<value>`.
pub(crate) const VALUE_CHILDREN: TagSet = TagSet::of(&[
    Tag::String,
    Tag::Array,
    Tag::Struct,
    Tag::Int,
    Tag::I4,
    Tag::Boolean,
    Tag::Double,
    Tag::DateTime,
    Tag::Base64,
]);

/// The permitted set entered when `tag` opens.
///
/// A tag's own presence in its child set permits its close tag (empty
/// elements and the zero-item `params`/`struct`/`data` productions).
pub(crate) fn children(tag: Tag) -> TagSet {
    match tag {
        Tag::MethodResponse => TagSet::of(&[Tag::Params, Tag::Fault]),
        Tag::Params => TagSet::of(&[Tag::Param, Tag::Params]),
        Tag::Param | Tag::Fault => TagSet::of(&[Tag::Value]),
        Tag::Value => VALUE_CHILDREN,
        Tag::Array => TagSet::of(&[Tag::Data]),
        Tag::Data => TagSet::of(&[Tag::Value, Tag::Data]),
        Tag::Struct => TagSet::of(&[Tag::Member, Tag::Struct]),
        Tag::Member => TagSet::of(&[Tag::Name]),
        Tag::Name => TagSet::EMPTY.with_text(),
        // Scalar leaves accept their text payload or an immediate close
        // (an empty element yields the type's zero value).
        _ => TagSet::of(&[tag]).with_text(),
    }
}

/// The seven scalar leaf kinds and their text-to-value coercions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarTag {
    String,
    Int,
    I4,
    Boolean,
    Double,
    DateTime,
    Base64,
}

impl ScalarTag {
    /// The grammar tag of this scalar kind.
    pub fn tag(self) -> Tag {
        match self {
            ScalarTag::String => Tag::String,
            ScalarTag::Int => Tag::Int,
            ScalarTag::I4 => Tag::I4,
            ScalarTag::Boolean => Tag::Boolean,
            ScalarTag::Double => Tag::Double,
            ScalarTag::DateTime => Tag::DateTime,
            ScalarTag::Base64 => Tag::Base64,
        }
    }

    /// The element name of this scalar kind.
    pub fn name(self) -> &'static str {
        self.tag().name()
    }

    /// The value an empty element of this kind produces.
    pub(crate) fn zero_value(self) -> Value {
        match self {
            ScalarTag::String => Value::Str(String::new()),
            ScalarTag::Int | ScalarTag::I4 => Value::Int(0),
            ScalarTag::Boolean => Value::Bool(false),
            ScalarTag::Double => Value::Double(0.0),
            ScalarTag::DateTime => Value::DateTime(crate::DateTime::default()),
            ScalarTag::Base64 => Value::Binary(Vec::new()),
        }
    }

    /// Coerces the raw text payload of this scalar kind into a typed value.
    pub(crate) fn coerce(self, text: &str) -> Result<Value> {
        Ok(match self {
            ScalarTag::String => Value::Str(text.to_owned()),
            ScalarTag::Int | ScalarTag::I4 => Value::Int(integer::decode(self.name(), text)?),
            ScalarTag::Boolean => Value::Bool(boolean::decode(text)),
            ScalarTag::Double => Value::Double(double::decode(text)?),
            ScalarTag::DateTime => Value::DateTime(datetime::decode(text)?),
            ScalarTag::Base64 => Value::Binary(binary::decode(text)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    /// Every tag name round-trips through the lookup.
    #[test]
    fn tag_names_round_trip() {
        for tag in Tag::ALL {
            assert_eq!(Tag::from_name(tag.name()), Some(tag), "{}", tag.name());
        }
    }

    #[test]
    fn unknown_names_rejected() {
        assert_eq!(Tag::from_name("foo"), None);
        assert_eq!(Tag::from_name(""), None);
        // Names are case-sensitive.
        assert_eq!(Tag::from_name("Int"), None);
        assert_eq!(Tag::from_name("datetime.iso8601"), None);
    }

    #[test]
    fn tag_set_membership() {
        let set = TagSet::of(&[Tag::Param, Tag::Fault]);
        assert!(set.contains(Tag::Param));
        assert!(set.contains(Tag::Fault));
        assert!(!set.contains(Tag::Value));
        assert!(!set.expects_text());
    }

    #[test]
    fn tag_set_text_flag() {
        let set = TagSet::of(&[Tag::Int]).with_text();
        assert!(set.contains(Tag::Int));
        assert!(set.expects_text());
        assert!(!TagSet::EMPTY.expects_text());
    }

    /// Display mirrors the quoted list used in grammar violation messages.
    #[test]
    fn tag_set_display() {
        let set = TagSet::of(&[Tag::Param, Tag::Fault]);
        assert_eq!(set.to_string(), "\"param\", \"fault\"");

        let set = TagSet::of(&[Tag::Name]).with_text();
        assert_eq!(set.to_string(), "\"name\", \"#text\"");

        assert_eq!(TagSet::EMPTY.with_text().to_string(), "\"#text\"");
    }

    #[test]
    fn document_root_children() {
        let set = children(Tag::MethodResponse);
        assert!(set.contains(Tag::Params));
        assert!(set.contains(Tag::Fault));
        assert!(!set.contains(Tag::Value));
    }

    /// `params -> param*` permits the zero-param close.
    #[test]
    fn params_children_allow_empty() {
        let set = children(Tag::Params);
        assert!(set.contains(Tag::Param));
        assert!(set.contains(Tag::Params));
    }

    /// `struct -> member*` permits the empty struct close.
    #[test]
    fn struct_children_allow_empty() {
        let set = children(Tag::Struct);
        assert!(set.contains(Tag::Member));
        assert!(set.contains(Tag::Struct));
    }

    #[test]
    fn value_children_are_the_nine_types() {
        let set = children(Tag::Value);
        for tag in [
            Tag::String,
            Tag::Array,
            Tag::Struct,
            Tag::Int,
            Tag::I4,
            Tag::Boolean,
            Tag::Double,
            Tag::DateTime,
            Tag::Base64,
        ] {
            assert!(set.contains(tag), "{}", tag.name());
        }
        // An empty <value/> is not a typed value.
        assert!(!set.contains(Tag::Value));
        assert!(!set.expects_text());
    }

    /// A scalar leaf expects its text or its own close tag.
    #[test]
    fn scalar_children_expect_text_or_close() {
        for tag in [Tag::String, Tag::Int, Tag::I4, Tag::Boolean, Tag::Double, Tag::DateTime, Tag::Base64] {
            let set = children(tag);
            assert!(set.contains(tag), "{}", tag.name());
            assert!(set.expects_text(), "{}", tag.name());
        }
    }

    /// `name -> text`: only character data is permitted inside a member name.
    #[test]
    fn name_children_are_text_only() {
        let set = children(Tag::Name);
        assert!(set.expects_text());
        assert!(!set.contains(Tag::Name));
    }

    #[test]
    fn scalar_tag_mapping() {
        assert_eq!(Tag::Int.as_scalar(), Some(ScalarTag::Int));
        assert_eq!(Tag::Base64.as_scalar(), Some(ScalarTag::Base64));
        assert_eq!(Tag::Struct.as_scalar(), None);
        assert_eq!(Tag::Value.as_scalar(), None);
        assert_eq!(ScalarTag::DateTime.name(), "dateTime.iso8601");
    }

    #[test]
    fn zero_values() {
        assert_eq!(ScalarTag::String.zero_value(), Value::Str(String::new()));
        assert_eq!(ScalarTag::Int.zero_value(), Value::Int(0));
        assert_eq!(ScalarTag::I4.zero_value(), Value::Int(0));
        assert_eq!(ScalarTag::Boolean.zero_value(), Value::Bool(false));
        assert_eq!(ScalarTag::Double.zero_value(), Value::Double(0.0));
        assert_eq!(ScalarTag::Base64.zero_value(), Value::Binary(Vec::new()));
        assert_eq!(
            ScalarTag::DateTime.zero_value(),
            Value::DateTime(crate::DateTime::default())
        );
    }

    #[test]
    fn coerce_dispatch() {
        assert_eq!(ScalarTag::Int.coerce("42").unwrap(), Value::Int(42));
        assert_eq!(ScalarTag::I4.coerce("-7").unwrap(), Value::Int(-7));
        assert_eq!(ScalarTag::Boolean.coerce("1").unwrap(), Value::Bool(true));
        assert_eq!(ScalarTag::Boolean.coerce("yes").unwrap(), Value::Bool(false));
        assert_eq!(ScalarTag::Double.coerce("1.5").unwrap(), Value::Double(1.5));
        assert_eq!(
            ScalarTag::String.coerce("  spaced  ").unwrap(),
            Value::Str("  spaced  ".to_string())
        );
        assert_eq!(
            ScalarTag::Base64.coerce("aGVsbG8=").unwrap(),
            Value::Binary(b"hello".to_vec())
        );
    }

    /// The i4 tag is reported in its own coercion errors.
    #[test]
    fn coerce_error_names_the_tag() {
        let err = ScalarTag::I4.coerce("x").unwrap_err();
        assert_eq!(err, Error::type_coercion("i4", "x"));
    }
}
