//! The write-side document.
//!
//! Unlike the parsed tree, the output tree grows one value at a time, so its
//! containers are singly linked append lists threaded through an arena of
//! nodes. Text is stored already escaped, ready to be copied out by the
//! generator.

use alloc::{borrow::Cow, string::String, vec::Vec};

use crate::{
    error::{Error, ErrorKind, Result},
    escape::{escape, json_eq_plain},
};

/// A value created by a setter.
///
/// Handles to arrays and objects are used to add children to them through
/// [`Handle::push`] and [`Handle::key`]. A handle is only meaningful for the
/// session that returned it and only until that session is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handle(pub(crate) usize);

impl Handle {
    /// Slot for appending a new last element to this array.
    #[must_use]
    pub fn push(self) -> Slot<'static> {
        Slot::Push(self)
    }

    /// Slot for a new pair with `key` in this object.
    #[must_use]
    pub fn key(self, key: &str) -> Slot<'_> {
        Slot::Key(self, key)
    }
}

/// Where a setter puts its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<'k> {
    /// The document root. It can be set only once.
    Root,
    /// Appended to the array behind the handle.
    Push(Handle),
    /// Inserted into the object behind the handle under a key given as plain
    /// text. Keys must be unique within an object.
    Key(Handle, &'k str),
}

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct List {
    pub first: Option<usize>,
    pub last: Option<usize>,
    pub len: usize,
}

#[derive(Debug)]
pub(crate) enum OutValue<'src> {
    Null,
    Bool(bool),
    Number(String),
    /// Escaped content; borrowed when the caller supplied it.
    String(Cow<'src, str>),
    Array(List),
    Object(List),
}

#[derive(Debug)]
pub(crate) struct OutNode<'src> {
    /// Escaped key, present on object members.
    pub key: Option<String>,
    pub value: OutValue<'src>,
    pub next: Option<usize>,
}

#[derive(Debug, Default)]
pub(crate) struct OutTree<'src> {
    pub nodes: Vec<OutNode<'src>>,
    pub root: Option<usize>,
}

impl<'src> OutTree<'src> {
    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    fn list_mut(&mut self, handle: Handle, object: bool) -> Result<&mut List> {
        match (self.nodes.get_mut(handle.0).map(|n| &mut n.value), object) {
            (Some(OutValue::Array(list)), false) | (Some(OutValue::Object(list)), true) => {
                Ok(list)
            }
            (_, false) => Err(ErrorKind::SetNotArr.into()),
            (_, true) => Err(ErrorKind::SetNotObj.into()),
        }
    }

    fn has_key(&self, list: List, key: &str) -> bool {
        let mut cursor = list.first;
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            if node.key.as_deref().is_some_and(|k| json_eq_plain(k, key)) {
                return true;
            }
            cursor = node.next;
        }
        false
    }

    /// Adds `value` at `slot`, returning the new node.
    pub(crate) fn insert(&mut self, slot: Slot<'_>, value: OutValue<'src>) -> Result<Handle> {
        let id = self.nodes.len();
        let (parent, key) = match slot {
            Slot::Root => {
                if self.root.is_some() {
                    return Err(ErrorKind::RootAlreadySet.into());
                }
                (None, None)
            }
            Slot::Push(arr) => {
                self.list_mut(arr, false)?;
                (Some((arr, false)), None)
            }
            Slot::Key(obj, key) => {
                let list = *self.list_mut(obj, true)?;
                if self.has_key(list, key) {
                    return Err(Error::from(ErrorKind::SetDuplicateKey { key: key.into() }));
                }
                (Some((obj, true)), Some(escape(key)?))
            }
        };

        self.nodes.try_reserve(1)?;
        self.nodes.push(OutNode {
            key,
            value,
            next: None,
        });
        let Some((parent, object)) = parent else {
            self.root = Some(id);
            return Ok(Handle(id));
        };
        let list = self.list_mut(parent, object)?;
        let prev = list.last.replace(id);
        list.first.get_or_insert(id);
        list.len += 1;
        if let Some(prev) = prev {
            self.nodes[prev].next = Some(id);
        }
        Ok(Handle(id))
    }

    /// Members of a container, in insertion order.
    pub(crate) fn children(&self, list: List) -> Children<'_, 'src> {
        Children {
            tree: self,
            cursor: list.first,
        }
    }
}

pub(crate) struct Children<'t, 'src> {
    tree: &'t OutTree<'src>,
    cursor: Option<usize>,
}

impl<'t, 'src> Iterator for Children<'t, 'src> {
    type Item = &'t OutNode<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.tree.nodes[self.cursor?];
        self.cursor = node.next;
        Some(node)
    }
}
