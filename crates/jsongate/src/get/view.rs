//! Locators and borrowed views over the parsed tree.
//!
//! Views hold slices of the session's tree and input, so they are `Copy` and
//! live as long as the shared borrow of the session.

use alloc::{borrow::Cow, string::String};
use core::fmt;

use bstr::ByteSlice;

use crate::{
    error::JsonType,
    escape::Unescape,
    tree::{Kind, Node, Pair, Span},
};

/// Decodes a validated key or string span, borrowing when it has no escapes.
pub(crate) fn plain_text(src: &[u8], span: Span) -> Cow<'_, str> {
    match src[span.range()].to_str_lossy() {
        Cow::Borrowed(text) if !text.contains('\\') => Cow::Borrowed(text),
        text => Cow::Owned(Unescape::new(&text).collect::<String>()),
    }
}

/// Location of a value for a getter: the root, an array element, or an
/// object member.
///
/// `At` values are produced by [`Arr::at`] and [`Obj::at`]; whether the
/// location exists is checked by the getter, so an out-of-range index or a
/// missing key is reported as a getter error.
#[derive(Debug, Clone, Copy)]
pub enum At<'s> {
    /// The document root.
    Root,
    /// The element at an index of an array.
    Index(Arr<'s>, usize),
    /// The member with a key, given as plain text, of an object.
    Key(Obj<'s>, &'s str),
}

/// A parsed array, obtained from [`Session::get_arr`](crate::Session::get_arr).
#[derive(Clone, Copy)]
pub struct Arr<'s> {
    pub(crate) src: &'s [u8],
    pub(crate) items: &'s [Node],
    pub(crate) at: usize,
}

impl<'s> Arr<'s> {
    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the array has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Location of the element at `index`.
    #[must_use]
    pub fn at(self, index: usize) -> At<'s> {
        At::Index(self, index)
    }

    /// Locations of all elements, in order.
    pub fn iter(self) -> impl Iterator<Item = At<'s>> {
        (0..self.len()).map(move |i| self.at(i))
    }
}

impl fmt::Debug for Arr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arr")
            .field("len", &self.len())
            .field("at", &self.at)
            .finish()
    }
}

/// A parsed object, obtained from [`Session::get_obj`](crate::Session::get_obj).
#[derive(Clone, Copy)]
pub struct Obj<'s> {
    pub(crate) src: &'s [u8],
    pub(crate) pairs: &'s [Pair],
    pub(crate) at: usize,
}

impl<'s> Obj<'s> {
    /// Number of key-value pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the object has no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Location of the member named `key`.
    #[must_use]
    pub fn at(self, key: &'s str) -> At<'s> {
        At::Key(self, key)
    }

    /// The keys in document order, unescaped.
    pub fn keys(self) -> impl Iterator<Item = Cow<'s, str>> {
        self.pairs.iter().map(move |pair| plain_text(self.src, pair.key))
    }
}

impl fmt::Debug for Obj<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.keys().zip(self.pairs.iter().map(|p| p.value.json_type())))
            .finish()
    }
}

/// A string returned by [`Session::get_str`](crate::Session::get_str),
/// with its measured length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Str<'s> {
    pub(crate) text: Option<Cow<'s, str>>,
    pub(crate) bytes: usize,
    pub(crate) chars: usize,
}

impl<'s> Str<'s> {
    /// The text, or `None` for an empty string read with `null_if_empty`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Length in bytes.
    #[must_use]
    pub fn bytes(&self) -> usize {
        self.bytes
    }

    /// Length in Unicode code points.
    #[must_use]
    pub fn chars(&self) -> usize {
        self.chars
    }

    /// Takes the text, borrowed from the input whenever no unescaping was
    /// needed.
    #[must_use]
    pub fn into_text(self) -> Option<Cow<'s, str>> {
        self.text
    }
}

/// An untyped view of any parsed value, from
/// [`Session::get_value`](crate::Session::get_value).
///
/// Unlike the typed getters, a view performs no validation beyond what the
/// parser did. It is meant for walking or copying whole subtrees.
#[derive(Clone, Copy)]
pub struct ValueRef<'s> {
    pub(crate) src: &'s [u8],
    pub(crate) node: &'s Node,
}

impl<'s> ValueRef<'s> {
    /// The kind of value.
    #[must_use]
    pub fn json_type(&self) -> JsonType {
        self.node.json_type()
    }

    /// Byte offset of the value in the input.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.node.at
    }

    /// The boolean, if this is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self.node.kind {
            Kind::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// The number exactly as written, if this is one.
    #[must_use]
    pub fn number_text(&self) -> Option<&'s str> {
        match self.node.kind {
            Kind::Number(span) => span.text(self.src).ok(),
            _ => None,
        }
    }

    /// The string content as written, escapes included, if this is one.
    #[must_use]
    pub fn raw_str(&self) -> Option<&'s str> {
        match self.node.kind {
            Kind::String(span) => span.text(self.src).ok(),
            _ => None,
        }
    }

    /// The unescaped string, if this is one.
    #[must_use]
    pub fn to_str(&self) -> Option<Cow<'s, str>> {
        match self.node.kind {
            Kind::String(span) => Some(plain_text(self.src, span)),
            _ => None,
        }
    }

    /// Elements of an array; empty for other kinds.
    pub fn items(self) -> impl Iterator<Item = ValueRef<'s>> {
        let items: &'s [Node] = match &self.node.kind {
            Kind::Array(items) => items,
            _ => &[],
        };
        items.iter().map(move |node| ValueRef {
            src: self.src,
            node,
        })
    }

    /// Unescaped keys and values of an object; empty for other kinds.
    pub fn entries(self) -> impl Iterator<Item = (Cow<'s, str>, ValueRef<'s>)> {
        let pairs: &'s [Pair] = match &self.node.kind {
            Kind::Object(pairs) => pairs,
            _ => &[],
        };
        pairs.iter().map(move |pair| {
            (
                plain_text(self.src, pair.key),
                ValueRef {
                    src: self.src,
                    node: &pair.value,
                },
            )
        })
    }
}

impl fmt::Debug for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.json_type() {
            JsonType::Null => f.write_str("null"),
            JsonType::Bool => write!(f, "{}", self.as_bool().unwrap_or_default()),
            JsonType::Number => f.write_str(self.number_text().unwrap_or_default()),
            JsonType::String => write!(f, "{:?}", self.to_str().unwrap_or_default()),
            JsonType::Array => f.debug_list().entries(self.items()).finish(),
            JsonType::Object => f.debug_map().entries(self.entries()).finish(),
        }
    }
}
