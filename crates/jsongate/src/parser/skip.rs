//! The allocation-free first pass over a container.
//!
//! Starting at an opening delimiter, the skip pass checks the separators of
//! that one container and counts its children. Nested values are stepped
//! over without being decoded; they are validated by their own passes once
//! the build pass reaches them.

use super::is_ws;
use crate::error::{Error, ErrorKind, Result};

fn skip_ws(src: &[u8], mut i: usize) -> usize {
    while src.get(i).copied().is_some_and(is_ws) {
        i += 1;
    }
    i
}

/// Index one past the closing quote of the string opening at `open`.
fn skip_string(src: &[u8], open: usize) -> Result<usize> {
    let mut i = open + 1;
    while let Some(&b) = src.get(i) {
        match b {
            b'"' => return Ok(i + 1),
            b'\\' => i += 2,
            _ => i += 1,
        }
    }
    Err(Error::at(ErrorKind::UntermStr, open))
}

fn unterminated(open_byte: u8) -> ErrorKind {
    if open_byte == b'[' {
        ErrorKind::UntermArr
    } else {
        ErrorKind::UntermObj
    }
}

/// Index one past the delimiter closing the container opening at `open`.
///
/// Brackets and braces share one depth counter; a mismatch surfaces as a
/// separator error when the inner container runs its own pass.
fn skip_container(src: &[u8], open: usize) -> Result<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while let Some(&b) = src.get(i) {
        match b {
            b'[' | b'{' => depth += 1,
            b']' | b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i + 1);
                }
            }
            b'"' => {
                i = skip_string(src, i)?;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    Err(Error::at(unterminated(src[open]), open))
}

/// Steps over one value of any kind. `eof` is reported when the input ends
/// where a value should start.
fn skip_value(src: &[u8], i: usize, eof: Error) -> Result<usize> {
    match src.get(i) {
        None => Err(eof),
        Some(b'"') => skip_string(src, i),
        Some(b'[' | b'{') => skip_container(src, i),
        Some(b',' | b']' | b'}' | b':') => Err(Error::at(ErrorKind::InvalidType, i)),
        Some(_) => {
            let mut end = i;
            while src
                .get(end)
                .is_some_and(|&b| !is_ws(b) && !matches!(b, b',' | b']' | b'}' | b':'))
            {
                end += 1;
            }
            Ok(end)
        }
    }
}

/// Counts the elements of the array whose `[` is at `open`.
pub(super) fn count_array(src: &[u8], open: usize) -> Result<usize> {
    let unterm = || Error::at(ErrorKind::UntermArr, open);
    let mut i = skip_ws(src, open + 1);
    if src.get(i) == Some(&b']') {
        return Ok(0);
    }
    let mut count = 0;
    loop {
        i = skip_value(src, i, unterm())?;
        count += 1;
        i = skip_ws(src, i);
        match src.get(i) {
            Some(b',') => i = skip_ws(src, i + 1),
            Some(b']') => return Ok(count),
            None => return Err(unterm()),
            Some(_) => return Err(Error::at(ErrorKind::ArrInvalidSep, i)),
        }
    }
}

/// Counts the pairs of the object whose `{` is at `open`.
pub(super) fn count_object(src: &[u8], open: usize) -> Result<usize> {
    let unterm = || Error::at(ErrorKind::UntermObj, open);
    let mut i = skip_ws(src, open + 1);
    if src.get(i) == Some(&b'}') {
        return Ok(0);
    }
    let mut count = 0;
    loop {
        match src.get(i) {
            Some(b'"') => i = skip_string(src, i)?,
            None => return Err(unterm()),
            Some(_) => return Err(Error::at(ErrorKind::ObjInvalidKey, i)),
        }
        i = skip_ws(src, i);
        match src.get(i) {
            Some(b':') => i = skip_ws(src, i + 1),
            None => return Err(unterm()),
            Some(_) => return Err(Error::at(ErrorKind::ObjKeyValInvalidSep, i)),
        }
        i = skip_value(src, i, unterm())?;
        count += 1;
        i = skip_ws(src, i);
        match src.get(i) {
            Some(b',') => i = skip_ws(src, i + 1),
            Some(b'}') => return Ok(count),
            None => return Err(unterm()),
            Some(_) => return Err(Error::at(ErrorKind::ObjInvalidSep, i)),
        }
    }
}
