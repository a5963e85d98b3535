//! The read-side document produced by the parser.
//!
//! Scalars never own text: numbers and strings are spans into the session's
//! input buffer, and string spans still contain their escape sequences.
//! Containers are exact-length boxed slices.

use alloc::boxed::Box;
use core::ops::Range;

use crate::error::{Error, ErrorKind, JsonType, Result};

/// A byte range of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    pub(crate) fn range(self) -> Range<usize> {
        self.start..self.start + self.len
    }

    /// The spanned text. Every span the parser emits covers validated UTF-8.
    pub(crate) fn text(self, src: &[u8]) -> Result<&str> {
        core::str::from_utf8(&src[self.range()]).map_err(|e| {
            Error::at(ErrorKind::StrUtf8Invalid, self.start + e.valid_up_to())
        })
    }
}

#[derive(Debug)]
pub(crate) struct Node {
    /// Offset of the value's first byte: the quote of a string, the opening
    /// delimiter of a container.
    pub at: usize,
    pub kind: Kind,
}

#[derive(Debug)]
pub(crate) enum Kind {
    Null,
    Bool(bool),
    Number(Span),
    /// Content between the quotes, escapes intact.
    String(Span),
    Array(Box<[Node]>),
    Object(Box<[Pair]>),
}

#[derive(Debug)]
pub(crate) struct Pair {
    pub key: Span,
    pub value: Node,
}

impl Node {
    pub(crate) fn json_type(&self) -> JsonType {
        match self.kind {
            Kind::Null => JsonType::Null,
            Kind::Bool(_) => JsonType::Bool,
            Kind::Number(_) => JsonType::Number,
            Kind::String(_) => JsonType::String,
            Kind::Array(_) => JsonType::Array,
            Kind::Object(_) => JsonType::Object,
        }
    }

    pub(crate) fn mismatch(&self, expected: JsonType) -> Error {
        Error::at(
            ErrorKind::TypeMismatch {
                expected,
                found: self.json_type(),
            },
            self.at,
        )
    }
}
