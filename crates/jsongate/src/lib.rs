//! A strict JSON parser, validating accessor and exact-size generator.
//!
//! A [`Session`] holds one document. It is either parsed from text and read
//! through typed getters that enforce caller constraints, or built through
//! setters and serialized. Parsing accepts exactly RFC 8259 JSON, rejecting
//! duplicate keys. Every container is first measured and then allocated at its
//! exact size.
//!
//! ```rust
//! use jsongate::{At, IntOptions, ObjOptions, Session, StrOptions};
//!
//! let mut session = Session::new();
//! session.parse(br#"{"name": "gate", "port": 8443}"#)?;
//! let root = session.get_obj(At::Root, &ObjOptions::default())?;
//! let name = session.get_str(root.at("name"), &StrOptions::default())?;
//! let port = session.get_int::<u16>(root.at("port"), &IntOptions::default())?;
//! assert_eq!((name.as_str(), port), (Some("gate"), 8443));
//!
//! let err = session
//!     .get_int::<u8>(root.at("port"), &IntOptions::default())
//!     .unwrap_err();
//! assert_eq!(
//!     session.describe_with(&err, "<", ">"),
//!     "expected an unsigned integer no greater than 255: \
//!      [LINE 1, CHAR 26] {\"name\": \"gate\", \"port\": <8>443}"
//! );
//! # Ok::<(), jsongate::Error>(())
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod context;
mod error;
mod escape;
mod generate;
mod get;
mod options;
mod out;
mod parser;
#[cfg(any(test, feature = "serde"))]
mod serde_impls;
mod session;
mod set;
mod tree;
mod unicode;

#[cfg(test)]
mod tests;

pub use error::{Error, ErrorKind, JsonType, Result};
pub use get::{
    Arr, ArrOptions, At, BoolOptions, Float, FloatOptions, IntOptions, Integer, Obj, ObjOptions,
    Str, StrOptions, ValueRef,
};
pub use options::{Indent, Newline, ParseOptions, Whitespace};
pub use out::{Handle, Slot};
pub use session::{Phase, Session};
pub use set::Number;
