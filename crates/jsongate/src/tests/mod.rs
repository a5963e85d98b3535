mod build_generate;
mod property_roundtrip;

use crate::{ErrorKind, Session};

/// A session holding `json`, which must parse.
fn parsed(json: &str) -> Session<'static> {
    let mut session = Session::new();
    if let Err(err) = session.parse(json) {
        panic!("{json:?} should parse: {}", session.describe_with(&err, ">>", "<<"));
    }
    session
}

/// Whether two kinds are the same variant, payloads aside.
fn same_kind(a: &ErrorKind, b: &ErrorKind) -> bool {
    core::mem::discriminant(a) == core::mem::discriminant(b)
}
