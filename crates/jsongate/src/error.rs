use alloc::{collections::TryReserveError, string::String};
use core::fmt;

use thiserror::Error;

/// Result alias used by every fallible session operation.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The six kinds of JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    /// `null`
    Null,
    /// `true` or `false`
    Bool,
    /// Any JSON number, integral or not.
    Number,
    /// A double-quoted string.
    String,
    /// An ordered list of values.
    Array,
    /// A list of key-value pairs with unique keys.
    Object,
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JsonType::Null => "null",
            JsonType::Bool => "boolean",
            JsonType::Number => "number",
            JsonType::String => "string",
            JsonType::Array => "array",
            JsonType::Object => "object",
        })
    }
}

/// Every way a session operation can fail.
///
/// The kinds fall into six groups: lifecycle (wrong phase), allocation, file
/// I/O, parse grammar, accessor validation, and building or generating.
/// Payloads hold only what the message needs, such as the violated bound.
#[derive(Error, Debug)]
pub enum ErrorKind {
    // ------------------------------------------------------------------
    // lifecycle
    // ------------------------------------------------------------------
    /// A parse was attempted on a session that is not empty.
    #[error("parsing requires an empty session; call reset() first")]
    StateNotParse,
    /// A getter was called on a session that holds no parsed document.
    #[error("getters can only be called after a successful parse")]
    StateNotGet,
    /// A setter was called on a session that is parsed or already rendered.
    #[error("setters can only be called on an empty or building session")]
    StateNotSet,
    /// Generation was attempted before any value was set.
    #[error("generation requires at least one successful setter call")]
    StateNotGenerate,

    // ------------------------------------------------------------------
    // resources
    // ------------------------------------------------------------------
    /// Reserving exact storage failed.
    #[error("allocation failed: {0}")]
    Alloc(TryReserveError),
    /// A file operation failed.
    #[cfg(feature = "std")]
    #[error("unsuccessful {op}: {source}")]
    Io {
        /// Which file operation failed, such as `"open"`.
        op: &'static str,
        /// The operating system error.
        source: std::io::Error,
    },

    // ------------------------------------------------------------------
    // parse
    // ------------------------------------------------------------------
    /// The byte cannot start any JSON value.
    #[error("invalid JSON type")]
    InvalidType,
    /// A string has no closing quote.
    #[error("unterminated string: closing double-quote ('\"') not found")]
    UntermStr,
    /// An array has no closing bracket.
    #[error("unterminated array: closing square bracket (']') not found")]
    UntermArr,
    /// An object has no closing brace.
    #[error("unterminated object: closing curly brace ('}}') not found")]
    UntermObj,
    /// A literal starting with `f` is not `false`.
    #[error("value starting with \"f\" does not spell \"false\"")]
    False,
    /// A literal starting with `t` is not `true`.
    #[error("value starting with \"t\" does not spell \"true\"")]
    True,
    /// A literal starting with `n` is not `null`.
    #[error("value starting with \"n\" does not spell \"null\"")]
    Null,
    /// `-` not followed by a digit.
    #[error("a minus sign must be followed by a digit")]
    NumSign,
    /// A redundant leading zero, as in `01`.
    #[error("a number starting with zero may only continue with a decimal point or exponent")]
    NumLeadZero,
    /// A number is followed by a character that cannot end a value.
    #[error("number contains an invalid character")]
    NumInvalid,
    /// A second decimal point.
    #[error("numbers must not contain multiple decimal points")]
    NumMultiplePoints,
    /// A decimal point not followed by a digit, as in `1.`.
    #[error("a decimal point must be followed by a digit")]
    NumPointNoDigit,
    /// An exponent marker not followed by an optional sign and a digit.
    #[error("an exponent must contain one or more digits, optionally preceded by '+' or '-'")]
    NumExpHeadInvalid,
    /// A sign character after the exponent digits started.
    #[error("invalid character in the exponent part of a number")]
    NumExpInvalid,
    /// A string contains a malformed UTF-8 sequence.
    #[error("string contains an invalid UTF-8 byte sequence")]
    StrUtf8Invalid,
    /// A string contains a raw control character.
    #[error("control characters (U+0000 through U+001F) in strings must be escaped")]
    StrUnescControl,
    /// A backslash followed by something other than a JSON escape.
    #[error("backslash not followed by '\\', '/', '\"', 'b', 'f', 'n', 'r', 't', or 'u'")]
    StrEscInvalid,
    /// `\u` not followed by four hexadecimal digits.
    #[error("invalid hexadecimal UTF-16 code unit following \"\\u\"")]
    StrUtf16Invalid,
    /// A high surrogate escape without a low surrogate escape right after it.
    #[error(
        "escaped UTF-16 high surrogate (\\uD800 through \\uDBFF) not followed by a low surrogate (\\uDC00 through \\uDFFF)"
    )]
    StrUtf16UnpairedHigh,
    /// A low surrogate escape without a preceding high surrogate escape.
    #[error(
        "escaped UTF-16 low surrogate (\\uDC00 through \\uDFFF) not preceded by a high surrogate (\\uD800 through \\uDBFF)"
    )]
    StrUtf16UnpairedLow,
    /// Array elements must be separated by `,` and closed by `]`.
    #[error("array elements must be followed by a comma (',') or a closing bracket (']')")]
    ArrInvalidSep,
    /// An object key is not a string.
    #[error("object keys must be strings enclosed in double quotes")]
    ObjInvalidKey,
    /// A key not followed by `:`.
    #[error("the key and value of a key-value pair must be separated by a colon (':')")]
    ObjKeyValInvalidSep,
    /// Pairs must be separated by `,` and closed by `}`.
    #[error("key-value pairs must be followed by a comma (',') or a closing brace ('}}')")]
    ObjInvalidSep,
    /// The same key appears twice in one object.
    #[error("duplicate keys within the same object are not allowed")]
    ObjDuplicateKey,
    /// Non-whitespace after the root value.
    #[error("a JSON text must contain only one root value")]
    RootSurplus,
    /// Containers nest deeper than [`ParseOptions::max_depth`](crate::ParseOptions).
    #[error("containers nested deeper than {max} levels")]
    TooDeep {
        /// The configured limit.
        max: usize,
    },

    // ------------------------------------------------------------------
    // get
    // ------------------------------------------------------------------
    /// The value has a different type than requested.
    #[error("expected JSON type \"{expected}\", found \"{found}\"")]
    TypeMismatch {
        /// Requested type.
        expected: JsonType,
        /// Actual type.
        found: JsonType,
    },
    /// An index at or past the end of the array.
    #[error("expected an array long enough to have an element with index {index}")]
    ArrIndexOver {
        /// The requested index.
        index: usize,
    },
    /// Fewer elements than `min` allows.
    #[error("expected an array with at least {min} elements")]
    ArrTooShort {
        /// The violated lower bound.
        min: usize,
    },
    /// More elements than `max` allows.
    #[error("expected an array with at most {max} elements")]
    ArrTooLong {
        /// The violated upper bound.
        max: usize,
    },
    /// No pair has the requested key.
    #[error("expected an object with a key named \"{key}\"")]
    ObjKeyNotFound {
        /// The missing key.
        key: String,
    },
    /// Fewer pairs than `min` allows.
    #[error("expected an object with at least {min} key-value pairs")]
    ObjTooShort {
        /// The violated lower bound.
        min: usize,
    },
    /// More pairs than `max` allows.
    #[error("expected an object with at most {max} key-value pairs")]
    ObjTooLong {
        /// The violated upper bound.
        max: usize,
    },
    /// Fewer bytes than `min_bytes` allows.
    #[error("expected a string of at least {min} bytes")]
    StrBytesTooFew {
        /// The violated lower bound.
        min: usize,
    },
    /// More bytes than `max_bytes` allows.
    #[error("expected a string of no more than {max} bytes")]
    StrBytesTooMany {
        /// The violated upper bound.
        max: usize,
    },
    /// Fewer characters than `min_chars` allows.
    #[error("expected a string of at least {min} UTF-8 characters")]
    StrCharsTooFew {
        /// The violated lower bound.
        min: usize,
    },
    /// More characters than `max_chars` allows.
    #[error("expected a string of no more than {max} UTF-8 characters")]
    StrCharsTooMany {
        /// The violated upper bound.
        max: usize,
    },
    /// The caller's buffer cannot hold the string.
    #[error("destination buffer too small: {needed} bytes needed")]
    StrBufferTooSmall {
        /// Required capacity, including any terminator.
        needed: usize,
    },
    /// The number has a fraction or an exponent.
    #[error("expected an integer (a number without decimal point or exponent part)")]
    NumNotInteger,
    /// The number is negative but an unsigned type was requested.
    #[error("expected an unsigned integer")]
    NumNotUnsigned,
    /// Below the signed lower bound.
    #[error("expected a signed integer no less than {min}")]
    NumSignedTooSmall {
        /// The violated bound: the caller's `min` or the type's own minimum.
        min: i64,
    },
    /// Above the signed upper bound.
    #[error("expected a signed integer no greater than {max}")]
    NumSignedTooLarge {
        /// The violated bound: the caller's `max` or the type's own maximum.
        max: i64,
    },
    /// Below the unsigned lower bound.
    #[error("expected an unsigned integer no less than {min}")]
    NumUnsignedTooSmall {
        /// The violated bound.
        min: u64,
    },
    /// Above the unsigned upper bound.
    #[error("expected an unsigned integer no greater than {max}")]
    NumUnsignedTooLarge {
        /// The violated bound.
        max: u64,
    },
    /// The text does not convert to a floating point number.
    #[error("number cannot be converted to a floating point value")]
    NumNotFloat,
    /// The number overflows or underflows the requested float type.
    #[error("number is out of range for {ty}")]
    NumFloatOutOfRange {
        /// `"f32"` or `"f64"`.
        ty: &'static str,
    },

    // ------------------------------------------------------------------
    // set / generate
    // ------------------------------------------------------------------
    /// The root value was already set.
    #[error("the root value can only be set once")]
    RootAlreadySet,
    /// Appending to a value that is not an array.
    #[error("values can only be appended to an array")]
    SetNotArr,
    /// Inserting a key into a value that is not an object.
    #[error("key-value pairs can only be inserted into an object")]
    SetNotObj,
    /// The key is already present in the object being built.
    #[error("duplicate key \"{key}\" in the same object")]
    SetDuplicateKey {
        /// The rejected key.
        key: String,
    },
    /// NaN and infinities have no JSON representation.
    #[error("non-finite numbers cannot be represented in JSON")]
    SetNumNotFinite,
    /// The caller's output buffer is too small.
    #[error("output buffer too small: {needed} bytes needed")]
    BufferTooSmall {
        /// Required capacity.
        needed: usize,
    },
}

impl ErrorKind {
    /// Whether this kind was produced while parsing input text.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidType
                | ErrorKind::UntermStr
                | ErrorKind::UntermArr
                | ErrorKind::UntermObj
                | ErrorKind::False
                | ErrorKind::True
                | ErrorKind::Null
                | ErrorKind::NumSign
                | ErrorKind::NumLeadZero
                | ErrorKind::NumInvalid
                | ErrorKind::NumMultiplePoints
                | ErrorKind::NumPointNoDigit
                | ErrorKind::NumExpHeadInvalid
                | ErrorKind::NumExpInvalid
                | ErrorKind::StrUtf8Invalid
                | ErrorKind::StrUnescControl
                | ErrorKind::StrEscInvalid
                | ErrorKind::StrUtf16Invalid
                | ErrorKind::StrUtf16UnpairedHigh
                | ErrorKind::StrUtf16UnpairedLow
                | ErrorKind::ArrInvalidSep
                | ErrorKind::ObjInvalidKey
                | ErrorKind::ObjKeyValInvalidSep
                | ErrorKind::ObjInvalidSep
                | ErrorKind::ObjDuplicateKey
                | ErrorKind::RootSurplus
                | ErrorKind::TooDeep { .. }
        )
    }
}

/// An error returned by a [`Session`](crate::Session) operation.
///
/// Besides its [`ErrorKind`], an error may carry the byte offset into the
/// parsed input it refers to and a caller-supplied reason. Neither is
/// formatted until asked: [`Display`](fmt::Display) prints the kind and the
/// reason, while [`Session::describe`](crate::Session::describe) adds line,
/// character and surrounding context.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    offset: Option<usize>,
    reason: Option<String>,
}

impl Error {
    pub(crate) fn at(kind: ErrorKind, offset: usize) -> Self {
        Self {
            kind,
            offset: Some(offset),
            reason: None,
        }
    }

    pub(crate) fn because(mut self, reason: Option<&str>) -> Self {
        self.reason = reason.map(String::from);
        self
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Consumes the error, returning its kind.
    #[must_use]
    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    /// Byte offset into the parsed input, when the error refers to it.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    /// The caller-supplied reason attached through accessor options.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "{}: {reason}", self.kind),
            None => self.kind.fmt(f),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        core::error::Error::source(&self.kind)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            offset: None,
            reason: None,
        }
    }
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Self {
        ErrorKind::Alloc(err).into()
    }
}
