//! Streaming methodResponse decoder.
//!
//! Consumes the token stream one event at a time and builds the value tree in
//! a single pass: every token is first validated against the permitted-tag
//! set, open tags push build frames and narrow the set to their children,
//! text coerces into the open scalar frame, and close tags fold the finished
//! value one level up and widen the set to the parent's continuation. The
//! pass ends the moment the first `param` or `fault` element closes.
//!
//! # Example
//!
//! ```
//! use rxmlrpc::{decode_response, Response, Value};
//!
//! let xml = "<methodResponse><params><param>\
//!            <value><array><data>\
//!            <value><int>1</int></value>\
//!            <value><int>2</int></value>\
//!            </data></array></value>\
//!            </param></params></methodResponse>";
//! let response = decode_response(xml).unwrap();
//! assert_eq!(
//!     response,
//!     Response::Success(Value::Array(vec![Value::Int(1), Value::Int(2)]))
//! );
//! ```

mod api;
mod stack;

pub use api::{decode_response, decode_response_bytes};

use crate::error::{Error, Result};
use crate::grammar::{self, Tag, TagSet};
use crate::value::{Fault, Response, Value};
use crate::xml::{TokenSource, XmlToken};

use stack::{BuildStack, FoldTarget};

/// One decode pass over a methodResponse document.
///
/// Owns the permitted-tag set, the build stack and the pending just-closed
/// value for the duration of the pass. Not reusable and not shareable across
/// threads; independent passes run in parallel with their own state.
pub(crate) struct Decoder {
    /// Tags (and possibly `#text`) legal for the next token.
    expected: TagSet,
    /// In-progress aggregates, one frame per open container.
    stack: BuildStack,
    /// A completed type element waiting for its enclosing `</value>`.
    pending: Option<Value>,
    /// Whether the document root turned out to be `<fault>`.
    is_fault: bool,
}

impl Decoder {
    pub(crate) fn new() -> Decoder {
        Decoder {
            expected: grammar::DOCUMENT_START,
            stack: BuildStack::new(),
            pending: None,
            is_fault: false,
        }
    }

    /// Advances the pass by one token.
    ///
    /// Returns `Some(response)` when the terminal close tag was consumed; the
    /// caller must not feed further tokens afterwards.
    pub(crate) fn feed(
        &mut self,
        token: XmlToken,
        cursor: &TokenSource<'_>,
    ) -> Result<Option<Response>> {
        match token {
            XmlToken::Whitespace(ws) => {
                // Significant only where text is the expected token.
                if self.expected.expects_text() {
                    self.on_text(ws);
                }
                Ok(None)
            }
            XmlToken::Text(text) => {
                if !self.expected.expects_text() {
                    return Err(self.violation("#text", cursor));
                }
                self.on_text(text);
                Ok(None)
            }
            XmlToken::ElementStart(name) => {
                let tag = self.check(&name, cursor)?;
                self.on_open(tag);
                Ok(None)
            }
            XmlToken::ElementEnd(name) => {
                let tag = self.check(&name, cursor)?;
                self.on_close(tag)
            }
        }
    }

    /// Validates an element name against the permitted set.
    fn check(&self, name: &str, cursor: &TokenSource<'_>) -> Result<Tag> {
        match Tag::from_name(name) {
            Some(tag) if self.expected.contains(tag) => Ok(tag),
            _ => Err(self.violation(name, cursor)),
        }
    }

    fn violation(&self, found: &str, cursor: &TokenSource<'_>) -> Error {
        Error::grammar_violation(self.expected, found, cursor.depth(), cursor.context())
    }

    fn on_text(&mut self, text: String) {
        let owner = self.stack.set_text(text);
        self.expected = TagSet::of(&[owner]);
    }

    fn on_open(&mut self, tag: Tag) {
        match tag {
            Tag::Params => self.stack.open_root(),
            Tag::Fault => {
                self.is_fault = true;
                self.stack.open_root();
            }
            Tag::Array => self.stack.open_array(),
            Tag::Struct => self.stack.open_struct(),
            Tag::Member => self.stack.open_member(),
            Tag::Name => self.stack.open_name(),
            _ => {
                if let Some(scalar) = tag.as_scalar() {
                    self.stack.open_scalar(scalar);
                }
                // methodResponse, param, value and data carry no state of
                // their own.
            }
        }
        self.expected = grammar::children(tag);
    }

    fn on_close(&mut self, tag: Tag) -> Result<Option<Response>> {
        match tag {
            Tag::Value => {
                let Some(value) = self.pending.take() else {
                    unreachable!("value close is only permitted with a pending value");
                };
                self.expected = match self.stack.fold_value(value) {
                    FoldTarget::Array => TagSet::of(&[Tag::Value, Tag::Data]),
                    FoldTarget::Member => TagSet::of(&[Tag::Member]),
                    FoldTarget::Root if self.is_fault => TagSet::of(&[Tag::Fault]),
                    FoldTarget::Root => TagSet::of(&[Tag::Param]),
                };
            }
            Tag::Data => self.expected = TagSet::of(&[Tag::Array]),
            Tag::Array => {
                self.pending = Some(self.stack.close_array());
                self.expected = TagSet::of(&[Tag::Value]);
            }
            Tag::Struct => {
                self.pending = Some(self.stack.close_struct());
                self.expected = TagSet::of(&[Tag::Value]);
            }
            Tag::Member => {
                self.stack.close_member()?;
                self.expected = TagSet::of(&[Tag::Member, Tag::Struct]);
            }
            Tag::Name => {
                self.stack.close_name();
                self.expected = TagSet::of(&[Tag::Value]);
            }
            Tag::Params => {
                // Zero-param document; only the enclosing root may follow.
                self.expected = TagSet::of(&[Tag::MethodResponse]);
            }
            Tag::Param => {
                return Ok(Some(match self.stack.take_root() {
                    Some(value) => Response::Success(value),
                    None => Response::Empty,
                }));
            }
            Tag::Fault => {
                return Ok(Some(match self.stack.take_root() {
                    Some(value) => Response::Fault(Fault::new(value)),
                    None => Response::Empty,
                }));
            }
            Tag::MethodResponse => return Ok(Some(Response::Empty)),
            _ => {
                self.pending = Some(self.stack.close_scalar()?);
                self.expected = TagSet::of(&[Tag::Value]);
            }
        }
        Ok(None)
    }
}
