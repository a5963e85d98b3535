//! Two-pass recursive descent parser.
//!
//! Each container is walked twice. The skip pass (see [`skip`]) validates
//! its separators and counts its children without allocating; the build pass
//! then reserves exactly that many slots and parses every child in full,
//! nested containers running their own two passes.

mod scalar;
mod skip;

use alloc::vec::Vec;

use log::trace;

use crate::{
    error::{Error, ErrorKind, Result},
    escape::json_eq,
    options::ParseOptions,
    tree::{Kind, Node, Pair},
};

/// The four whitespace bytes of RFC 8259.
#[inline]
pub(crate) const fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

pub(crate) struct Parser<'a> {
    src: &'a [u8],
    pos: usize,
    depth: usize,
    options: ParseOptions,
}

/// Parses one complete JSON text.
pub(crate) fn parse(src: &[u8], options: ParseOptions) -> Result<Node> {
    let mut parser = Parser {
        src,
        pos: 0,
        depth: 0,
        options,
    };
    parser.skip_ws();
    let root = parser.value()?;
    parser.skip_ws();
    if parser.pos < src.len() {
        return Err(Error::at(ErrorKind::RootSurplus, parser.pos));
    }
    Ok(root)
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(is_ws) {
            self.pos += 1;
        }
    }

    fn value(&mut self) -> Result<Node> {
        let at = self.pos;
        let kind = match self.peek() {
            Some(b'{') => self.object()?,
            Some(b'[') => self.array()?,
            Some(b'"') => Kind::String(self.string()?),
            Some(b'-' | b'0'..=b'9') => Kind::Number(self.number()?),
            Some(b't') => {
                self.literal(b"true", ErrorKind::True)?;
                Kind::Bool(true)
            }
            Some(b'f') => {
                self.literal(b"false", ErrorKind::False)?;
                Kind::Bool(false)
            }
            Some(b'n') => {
                self.literal(b"null", ErrorKind::Null)?;
                Kind::Null
            }
            _ => return Err(Error::at(ErrorKind::InvalidType, at)),
        };
        Ok(Node { at, kind })
    }

    fn enter(&mut self, open: usize) -> Result<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(Error::at(
                ErrorKind::TooDeep {
                    max: self.options.max_depth,
                },
                open,
            ));
        }
        Ok(())
    }

    /// Consumes the separator after a child: `true` if another child follows.
    /// The skip pass has already vouched for it.
    fn separator(&mut self, close: u8, invalid: ErrorKind) -> Result<bool> {
        self.skip_ws();
        match self.peek() {
            Some(b',') => {
                self.pos += 1;
                self.skip_ws();
                Ok(true)
            }
            Some(b) if b == close => {
                self.pos += 1;
                Ok(false)
            }
            _ => Err(Error::at(invalid, self.pos)),
        }
    }

    fn array(&mut self) -> Result<Kind> {
        let open = self.pos;
        self.enter(open)?;
        let count = skip::count_array(self.src, open)?;
        trace!("array at {open}: {count} elements");

        let mut items = Vec::new();
        items.try_reserve_exact(count)?;
        self.pos = open + 1;
        self.skip_ws();
        if count == 0 {
            self.pos += 1;
        } else {
            loop {
                items.push(self.value()?);
                if !self.separator(b']', ErrorKind::ArrInvalidSep)? {
                    break;
                }
            }
        }
        self.depth -= 1;
        Ok(Kind::Array(items.into_boxed_slice()))
    }

    fn object(&mut self) -> Result<Kind> {
        let open = self.pos;
        self.enter(open)?;
        let count = skip::count_object(self.src, open)?;
        trace!("object at {open}: {count} pairs");

        let mut pairs: Vec<Pair> = Vec::new();
        pairs.try_reserve_exact(count)?;
        self.pos = open + 1;
        self.skip_ws();
        if count == 0 {
            self.pos += 1;
        } else {
            loop {
                let key_at = self.pos;
                let key = self.string()?;
                let text = key.text(self.src)?;
                for prev in &pairs {
                    if json_eq(prev.key.text(self.src)?, text) {
                        return Err(Error::at(ErrorKind::ObjDuplicateKey, key_at));
                    }
                }
                self.skip_ws();
                if self.peek() != Some(b':') {
                    return Err(Error::at(ErrorKind::ObjKeyValInvalidSep, self.pos));
                }
                self.pos += 1;
                self.skip_ws();
                let value = self.value()?;
                pairs.push(Pair { key, value });
                if !self.separator(b'}', ErrorKind::ObjInvalidSep)? {
                    break;
                }
            }
        }
        self.depth -= 1;
        Ok(Kind::Object(pairs.into_boxed_slice()))
    }
}
