//! Per-kind accessor options.
//!
//! Every struct implements [`Default`], meaning "no constraints and no
//! default value", so callers name only the fields they need:
//!
//! ```rust
//! use jsongate::{At, ArrOptions, Session};
//!
//! let mut session = Session::new();
//! session.parse(b"[1]")?;
//! let err = session
//!     .get_arr(
//!         At::Root,
//!         &ArrOptions {
//!             min: 2,
//!             min_reason: Some("a range needs two ends"),
//!             ..Default::default()
//!         },
//!     )
//!     .unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "expected an array with at least 2 elements: a range needs two ends"
//! );
//! # Ok::<(), jsongate::Error>(())
//! ```
//!
//! A `default` (or `or_empty` for containers) only applies when an object
//! key is missing. It never masks a type mismatch.

/// Options for [`Session::get_bool`](crate::Session::get_bool).
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolOptions {
    /// Value returned when the key is missing.
    pub default: Option<bool>,
}

/// Options for [`Session::get_int`](crate::Session::get_int).
///
/// Bounds are inclusive and checked after the type's own range.
#[derive(Debug, Clone, Copy)]
pub struct IntOptions<'a, T> {
    /// Smallest accepted value.
    pub min: Option<T>,
    /// Largest accepted value.
    pub max: Option<T>,
    /// Appended to the error message when `min` is violated.
    pub min_reason: Option<&'a str>,
    /// Appended to the error message when `max` is violated.
    pub max_reason: Option<&'a str>,
    /// Value returned when the key is missing.
    pub default: Option<T>,
}

impl<T> Default for IntOptions<'_, T> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            min_reason: None,
            max_reason: None,
            default: None,
        }
    }
}

/// Options for [`Session::get_float`](crate::Session::get_float).
#[derive(Debug, Clone, Copy)]
pub struct FloatOptions<T> {
    /// Value returned when the key is missing.
    pub default: Option<T>,
}

impl<T> Default for FloatOptions<T> {
    fn default() -> Self {
        Self { default: None }
    }
}

/// Options for [`Session::get_str`](crate::Session::get_str) and
/// [`Session::get_str_into`](crate::Session::get_str_into).
///
/// Byte and character counts are measured on the text being returned: the
/// unescaped string, or the JSON text itself when `raw` is set. A `max` of
/// `0` means unbounded.
#[derive(Debug, Clone, Copy, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct StrOptions<'a> {
    /// Return the string exactly as written in the JSON text, escape
    /// sequences included.
    pub raw: bool,
    /// Map an empty string to `None` instead of `Some("")`.
    pub null_if_empty: bool,
    /// Append a NUL byte when copying into a caller buffer.
    pub nul_terminate: bool,
    /// Minimum length in bytes.
    pub min_bytes: usize,
    /// Maximum length in bytes.
    pub max_bytes: usize,
    /// Minimum length in Unicode code points.
    pub min_chars: usize,
    /// Maximum length in Unicode code points.
    pub max_chars: usize,
    /// Appended to the error message when `min_bytes` is violated.
    pub min_bytes_reason: Option<&'a str>,
    /// Appended to the error message when `max_bytes` is violated.
    pub max_bytes_reason: Option<&'a str>,
    /// Appended to the error message when `min_chars` is violated.
    pub min_chars_reason: Option<&'a str>,
    /// Appended to the error message when `max_chars` is violated.
    pub max_chars_reason: Option<&'a str>,
    /// Text returned when the key is missing. It is plain text, not JSON, and
    /// is subject to the same length checks.
    pub default: Option<&'a str>,
}

/// Options for [`Session::get_arr`](crate::Session::get_arr).
///
/// A `max` of `0` means unbounded.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrOptions<'a> {
    /// Minimum number of elements.
    pub min: usize,
    /// Maximum number of elements.
    pub max: usize,
    /// Appended to the error message when `min` is violated.
    pub min_reason: Option<&'a str>,
    /// Appended to the error message when `max` is violated.
    pub max_reason: Option<&'a str>,
    /// Return an empty array when the key is missing.
    pub or_empty: bool,
}

/// Options for [`Session::get_obj`](crate::Session::get_obj).
///
/// A `max` of `0` means unbounded.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjOptions<'a> {
    /// Minimum number of pairs.
    pub min: usize,
    /// Maximum number of pairs.
    pub max: usize,
    /// Appended to the error message when `min` is violated.
    pub min_reason: Option<&'a str>,
    /// Appended to the error message when `max` is violated.
    pub max_reason: Option<&'a str>,
    /// Return an empty object when the key is missing.
    pub or_empty: bool,
}
