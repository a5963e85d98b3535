//! Typed, validating accessors over a parsed document.
//!
//! Every getter takes an [`At`] naming where the value lives and checks, in
//! order: the session phase, that the location exists, the value's type, and
//! finally the caller's constraints. The first failed check is the error.

use alloc::borrow::Cow;

use log::trace;

use crate::{
    error::{Error, ErrorKind, JsonType, Result},
    escape::{json_eq_plain, unescape},
    session::{Phase, Session},
    tree::{Kind, Node},
    unicode::count_codepoints,
};

mod number;
mod options;
mod view;

pub use number::{Float, Integer};
pub use options::{ArrOptions, BoolOptions, FloatOptions, IntOptions, ObjOptions, StrOptions};
pub use view::{Arr, At, Obj, Str, ValueRef};

/// Outcome of resolving an [`At`].
enum Found<'s> {
    Value(&'s [u8], &'s Node),
    /// An object lacks the key. Defaults may stand in for the value.
    Missing {
        src: &'s [u8],
        key: &'s str,
        at: usize,
    },
}

impl Found<'_> {
    fn missing_error(key: &str, at: usize) -> Error {
        Error::at(ErrorKind::ObjKeyNotFound { key: key.into() }, at)
    }
}

/// Checks a container length against inclusive bounds, `max == 0` meaning
/// unbounded.
fn check_len(
    len: usize,
    at: usize,
    (min, min_reason): (usize, Option<&str>),
    (max, max_reason): (usize, Option<&str>),
    too_short: fn(usize) -> ErrorKind,
    too_long: fn(usize) -> ErrorKind,
) -> Result<()> {
    if len < min {
        return Err(Error::at(too_short(min), at).because(min_reason));
    }
    if max != 0 && len > max {
        return Err(Error::at(too_long(max), at).because(max_reason));
    }
    Ok(())
}

/// Measures `text` and enforces the byte and character bounds of `opts`.
fn measure_str<'s>(text: Cow<'s, str>, at: usize, opts: &StrOptions<'_>) -> Result<Str<'s>> {
    let bytes = text.len();
    let chars = count_codepoints(text.as_bytes());
    check_len(
        bytes,
        at,
        (opts.min_bytes, opts.min_bytes_reason),
        (opts.max_bytes, opts.max_bytes_reason),
        |min| ErrorKind::StrBytesTooFew { min },
        |max| ErrorKind::StrBytesTooMany { max },
    )?;
    check_len(
        chars,
        at,
        (opts.min_chars, opts.min_chars_reason),
        (opts.max_chars, opts.max_chars_reason),
        |min| ErrorKind::StrCharsTooFew { min },
        |max| ErrorKind::StrCharsTooMany { max },
    )?;
    let text = if opts.null_if_empty && text.is_empty() {
        None
    } else {
        Some(text)
    };
    Ok(Str { text, bytes, chars })
}

impl<'src> Session<'src> {
    fn find<'s>(&'s self, at: At<'s>) -> Result<Found<'s>> {
        let (src, root) = self.document()?;
        match at {
            At::Root => Ok(Found::Value(src, root)),
            At::Index(arr, index) => match arr.items.get(index) {
                Some(node) => Ok(Found::Value(arr.src, node)),
                None => Err(Error::at(ErrorKind::ArrIndexOver { index }, arr.at)),
            },
            At::Key(obj, key) => {
                for pair in obj.pairs {
                    if json_eq_plain(pair.key.text(obj.src)?, key) {
                        return Ok(Found::Value(obj.src, &pair.value));
                    }
                }
                trace!("key {key:?} not found in object at {}", obj.at);
                Ok(Found::Missing {
                    src: obj.src,
                    key,
                    at: obj.at,
                })
            }
        }
    }

    /// Resolves a location that must exist.
    fn value<'s>(&'s self, at: At<'s>) -> Result<(&'s [u8], &'s Node)> {
        match self.find(at)? {
            Found::Value(src, node) => Ok((src, node)),
            Found::Missing { key, at, .. } => Err(Found::missing_error(key, at)),
        }
    }

    /// Marks the first successful query.
    fn queried<T>(&self, value: T) -> T {
        if self.phase() == Phase::Parsing {
            self.set_phase(Phase::Queryable);
        }
        value
    }

    /// The type of the value at `at`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::StateNotGet`] without a parsed document,
    /// [`ErrorKind::ArrIndexOver`] or [`ErrorKind::ObjKeyNotFound`] if the
    /// location does not exist.
    pub fn get_type<'s>(&'s self, at: At<'s>) -> Result<JsonType> {
        let (_, node) = self.value(at)?;
        Ok(self.queried(node.json_type()))
    }

    /// Checks that the value at `at` is `null`.
    ///
    /// # Errors
    ///
    /// As for [`get_type`](Self::get_type), plus
    /// [`ErrorKind::TypeMismatch`].
    pub fn get_null<'s>(&'s self, at: At<'s>) -> Result<()> {
        let (_, node) = self.value(at)?;
        match node.kind {
            Kind::Null => Ok(self.queried(())),
            _ => Err(node.mismatch(JsonType::Null)),
        }
    }

    /// The boolean at `at`.
    ///
    /// # Errors
    ///
    /// As for [`get_null`](Self::get_null). A missing key is not an error
    /// when `opts.default` is set.
    pub fn get_bool<'s>(&'s self, at: At<'s>, opts: &BoolOptions) -> Result<bool> {
        match self.find(at)? {
            Found::Value(_, node) => match node.kind {
                Kind::Bool(b) => Ok(self.queried(b)),
                _ => Err(node.mismatch(JsonType::Bool)),
            },
            Found::Missing { key, at, .. } => opts
                .default
                .map(|b| self.queried(b))
                .ok_or_else(|| Found::missing_error(key, at)),
        }
    }

    /// The integer at `at`, converted to `T`.
    ///
    /// ```rust
    /// use jsongate::{At, IntOptions, ObjOptions, Session};
    ///
    /// let mut session = Session::new();
    /// session.parse(br#"{"port": 8080}"#)?;
    /// let root = session.get_obj(At::Root, &ObjOptions::default())?;
    /// let opts = IntOptions {
    ///     min: Some(1),
    ///     ..Default::default()
    /// };
    /// assert_eq!(session.get_int::<u16>(root.at("port"), &opts)?, 8080);
    /// let retries = IntOptions {
    ///     default: Some(3),
    ///     ..Default::default()
    /// };
    /// assert_eq!(session.get_int::<u8>(root.at("retries"), &retries)?, 3);
    /// # Ok::<(), jsongate::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// As for [`get_null`](Self::get_null), plus
    /// [`ErrorKind::NumNotInteger`], [`ErrorKind::NumNotUnsigned`], and the
    /// range errors for both the type's range and `opts` bounds.
    pub fn get_int<'s, T: Integer>(&'s self, at: At<'s>, opts: &IntOptions<'_, T>) -> Result<T> {
        match self.find(at)? {
            Found::Value(src, node) => match node.kind {
                Kind::Number(span) => {
                    number::to_int(span.text(src)?, node.at, opts).map(|n| self.queried(n))
                }
                _ => Err(node.mismatch(JsonType::Number)),
            },
            Found::Missing { key, at, .. } => opts
                .default
                .map(|n| self.queried(n))
                .ok_or_else(|| Found::missing_error(key, at)),
        }
    }

    /// The number at `at`, converted to `T`.
    ///
    /// # Errors
    ///
    /// As for [`get_null`](Self::get_null), plus
    /// [`ErrorKind::NumFloatOutOfRange`] when `T` cannot represent the value.
    pub fn get_float<'s, T: Float>(&'s self, at: At<'s>, opts: &FloatOptions<T>) -> Result<T> {
        match self.find(at)? {
            Found::Value(src, node) => match node.kind {
                Kind::Number(span) => {
                    number::to_float(span.text(src)?, node.at).map(|n| self.queried(n))
                }
                _ => Err(node.mismatch(JsonType::Number)),
            },
            Found::Missing { key, at, .. } => opts
                .default
                .map(|n| self.queried(n))
                .ok_or_else(|| Found::missing_error(key, at)),
        }
    }

    /// The string at `at`.
    ///
    /// The text borrows from the input unless unescaping changed it. With
    /// `opts.raw` it is always borrowed and keeps its escape sequences.
    ///
    /// # Errors
    ///
    /// As for [`get_null`](Self::get_null), plus the length errors of
    /// [`StrOptions`]. A default is checked like a found string.
    pub fn get_str<'s>(&'s self, at: At<'s>, opts: &StrOptions<'s>) -> Result<Str<'s>> {
        let (text, offset) = match self.find(at)? {
            Found::Value(src, node) => match node.kind {
                Kind::String(span) => {
                    let raw = span.text(src)?;
                    let text = if opts.raw || !raw.contains('\\') {
                        Cow::Borrowed(raw)
                    } else {
                        Cow::Owned(unescape(raw)?)
                    };
                    (text, node.at)
                }
                _ => return Err(node.mismatch(JsonType::String)),
            },
            Found::Missing { key, at, .. } => match opts.default {
                Some(default) => (Cow::Borrowed(default), at),
                None => return Err(Found::missing_error(key, at)),
            },
        };
        measure_str(text, offset, opts).map(|s| self.queried(s))
    }

    /// Copies the string at `at` into `dst`, followed by a NUL byte if
    /// `opts.nul_terminate` is set. Returns the number of bytes required,
    /// which is also the number written.
    ///
    /// Pass `None` to only learn the required size.
    ///
    /// ```rust
    /// use jsongate::{At, Session, StrOptions};
    ///
    /// let mut session = Session::new();
    /// session.parse(br#""tab\tbed""#)?;
    /// let opts = StrOptions {
    ///     nul_terminate: true,
    ///     ..Default::default()
    /// };
    /// let needed = session.get_str_into(At::Root, &opts, None)?;
    /// let mut buf = vec![0xff; needed];
    /// session.get_str_into(At::Root, &opts, Some(&mut buf))?;
    /// assert_eq!(buf, b"tab\tbed\0");
    /// # Ok::<(), jsongate::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// As for [`get_str`](Self::get_str), plus
    /// [`ErrorKind::StrBufferTooSmall`]; nothing is written in that case.
    pub fn get_str_into<'s>(
        &'s self,
        at: At<'s>,
        opts: &StrOptions<'s>,
        dst: Option<&mut [u8]>,
    ) -> Result<usize> {
        let found = self.get_str(at, opts)?;
        let text = found.as_str().unwrap_or_default().as_bytes();
        let needed = text.len() + usize::from(opts.nul_terminate);
        if let Some(dst) = dst {
            let Some(dst) = dst.get_mut(..needed) else {
                return Err(ErrorKind::StrBufferTooSmall { needed }.into());
            };
            dst[..text.len()].copy_from_slice(text);
            if opts.nul_terminate {
                dst[text.len()] = 0;
            }
        }
        Ok(needed)
    }

    /// The array at `at`.
    ///
    /// # Errors
    ///
    /// As for [`get_null`](Self::get_null), plus
    /// [`ErrorKind::ArrTooShort`] and [`ErrorKind::ArrTooLong`]. With
    /// `opts.or_empty`, a missing key yields an empty array, which must
    /// still satisfy `opts.min`.
    pub fn get_arr<'s>(&'s self, at: At<'s>, opts: &ArrOptions<'_>) -> Result<Arr<'s>> {
        let arr = match self.find(at)? {
            Found::Value(src, node) => match &node.kind {
                Kind::Array(items) => Arr {
                    src,
                    items,
                    at: node.at,
                },
                _ => return Err(node.mismatch(JsonType::Array)),
            },
            Found::Missing { src, key, at } if opts.or_empty => {
                trace!("using empty array for missing key {key:?}");
                Arr { src, items: &[], at }
            }
            Found::Missing { key, at, .. } => return Err(Found::missing_error(key, at)),
        };
        check_len(
            arr.len(),
            arr.at,
            (opts.min, opts.min_reason),
            (opts.max, opts.max_reason),
            |min| ErrorKind::ArrTooShort { min },
            |max| ErrorKind::ArrTooLong { max },
        )?;
        Ok(self.queried(arr))
    }

    /// The object at `at`.
    ///
    /// # Errors
    ///
    /// As for [`get_arr`](Self::get_arr), with [`ErrorKind::ObjTooShort`]
    /// and [`ErrorKind::ObjTooLong`].
    pub fn get_obj<'s>(&'s self, at: At<'s>, opts: &ObjOptions<'_>) -> Result<Obj<'s>> {
        let obj = match self.find(at)? {
            Found::Value(src, node) => match &node.kind {
                Kind::Object(pairs) => Obj {
                    src,
                    pairs,
                    at: node.at,
                },
                _ => return Err(node.mismatch(JsonType::Object)),
            },
            Found::Missing { src, key, at } if opts.or_empty => {
                trace!("using empty object for missing key {key:?}");
                Obj { src, pairs: &[], at }
            }
            Found::Missing { key, at, .. } => return Err(Found::missing_error(key, at)),
        };
        check_len(
            obj.len(),
            obj.at,
            (opts.min, opts.min_reason),
            (opts.max, opts.max_reason),
            |min| ErrorKind::ObjTooShort { min },
            |max| ErrorKind::ObjTooLong { max },
        )?;
        Ok(self.queried(obj))
    }

    /// An untyped view of the value at `at`.
    ///
    /// # Errors
    ///
    /// As for [`get_type`](Self::get_type).
    pub fn get_value<'s>(&'s self, at: At<'s>) -> Result<ValueRef<'s>> {
        let (src, node) = self.value(at)?;
        Ok(self.queried(ValueRef { src, node }))
    }
}
