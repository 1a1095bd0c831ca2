//! The build stack: depth-indexed partial results.
//!
//! One tagged frame per in-progress container, pushed on its open tag and
//! popped exactly once on its close tag. Completed child values fold into the
//! frame one level up. The grammar tracker runs first on every token, so the
//! frame layout the methods below rely on is established before they run.

use crate::error::{Error, Result};
use crate::grammar::ScalarTag;
use crate::value::{Members, Value};

/// An in-progress partial result.
#[derive(Debug)]
pub(crate) enum Frame {
    /// Top-level slot the first param (or fault) payload folds into.
    Root(Option<Value>),
    /// Accumulating `<array>` items.
    Array(Vec<Value>),
    /// Accumulating `<struct>` members.
    Struct(Members),
    /// A `<member>` capturing first its name, then its value.
    Member {
        name: Option<String>,
        value: Option<Value>,
    },
    /// A scalar leaf; a frame still holding no text produces the type's zero
    /// value on close.
    Scalar {
        tag: ScalarTag,
        text: Option<String>,
    },
    /// A `<name>` capturing its text.
    Name(Option<String>),
}

/// Which frame kind received a folded `<value>`; decides the follow-up
/// permitted set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FoldTarget {
    Array,
    Member,
    Root,
}

/// Growable stack of build frames, indexed by nesting depth.
#[derive(Debug, Default)]
pub(crate) struct BuildStack {
    frames: Vec<Frame>,
}

impl BuildStack {
    pub(crate) fn new() -> BuildStack {
        BuildStack { frames: Vec::new() }
    }

    pub(crate) fn open_root(&mut self) {
        self.frames.push(Frame::Root(None));
    }

    pub(crate) fn open_array(&mut self) {
        self.frames.push(Frame::Array(Vec::new()));
    }

    pub(crate) fn open_struct(&mut self) {
        self.frames.push(Frame::Struct(Members::default()));
    }

    pub(crate) fn open_member(&mut self) {
        self.frames.push(Frame::Member { name: None, value: None });
    }

    pub(crate) fn open_scalar(&mut self, tag: ScalarTag) {
        self.frames.push(Frame::Scalar { tag, text: None });
    }

    pub(crate) fn open_name(&mut self) {
        self.frames.push(Frame::Name(None));
    }

    /// Stores the text payload of the open scalar or name frame and returns
    /// the tag whose close is expected next.
    pub(crate) fn set_text(&mut self, text: String) -> crate::grammar::Tag {
        match self.frames.last_mut() {
            Some(Frame::Scalar { tag, text: slot }) => {
                let owner = tag.tag();
                *slot = Some(text);
                owner
            }
            Some(Frame::Name(slot)) => {
                *slot = Some(text);
                crate::grammar::Tag::Name
            }
            _ => unreachable!("text is only permitted inside a scalar or name frame"),
        }
    }

    /// Folds a completed `<value>` payload into the top frame.
    pub(crate) fn fold_value(&mut self, value: Value) -> FoldTarget {
        match self.frames.last_mut() {
            Some(Frame::Array(items)) => {
                items.push(value);
                FoldTarget::Array
            }
            Some(Frame::Member { value: slot, .. }) => {
                *slot = Some(value);
                FoldTarget::Member
            }
            Some(Frame::Root(slot)) => {
                *slot = Some(value);
                FoldTarget::Root
            }
            _ => unreachable!("value close without an enclosing aggregate frame"),
        }
    }

    /// Finalizes the open scalar frame into its typed value.
    pub(crate) fn close_scalar(&mut self) -> Result<Value> {
        match self.frames.pop() {
            Some(Frame::Scalar { tag, text }) => match text {
                Some(text) => tag.coerce(&text),
                None => Ok(tag.zero_value()),
            },
            _ => unreachable!("scalar close without a scalar frame"),
        }
    }

    /// Finalizes the open name frame into the member one level up.
    pub(crate) fn close_name(&mut self) {
        let Some(Frame::Name(text)) = self.frames.pop() else {
            unreachable!("name close without a name frame");
        };
        match self.frames.last_mut() {
            Some(Frame::Member { name, .. }) => *name = text,
            _ => unreachable!("name frame not nested in a member frame"),
        }
    }

    /// Finalizes the open array frame into its value.
    pub(crate) fn close_array(&mut self) -> Value {
        match self.frames.pop() {
            Some(Frame::Array(items)) => Value::Array(items),
            _ => unreachable!("array close without an array frame"),
        }
    }

    /// Finalizes the open struct frame into its value.
    pub(crate) fn close_struct(&mut self) -> Value {
        match self.frames.pop() {
            Some(Frame::Struct(members)) => Value::Struct(members),
            _ => unreachable!("struct close without a struct frame"),
        }
    }

    /// Finalizes the open member frame into the struct one level up.
    ///
    /// A member without a captured value is refused; duplicate names replace
    /// the earlier value while keeping its position.
    pub(crate) fn close_member(&mut self) -> Result<()> {
        let Some(Frame::Member { name, value }) = self.frames.pop() else {
            unreachable!("member close without a member frame");
        };
        let Some(value) = value else {
            return Err(Error::MemberWithoutValue);
        };
        let name = name.unwrap_or_default();
        match self.frames.last_mut() {
            Some(Frame::Struct(members)) => {
                members.insert(name, value);
                Ok(())
            }
            _ => unreachable!("member frame not nested in a struct frame"),
        }
    }

    /// Removes the top-level slot, returning the folded payload if any.
    pub(crate) fn take_root(&mut self) -> Option<Value> {
        match self.frames.pop() {
            Some(Frame::Root(slot)) => slot,
            _ => unreachable!("param/fault close without a root frame"),
        }
    }
}
