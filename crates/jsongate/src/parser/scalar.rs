//! Full validation of strings, numbers and literals during the build pass.

use super::{Parser, is_ws};
use crate::{
    error::{Error, ErrorKind, Result},
    tree::Span,
    unicode::{is_high_surrogate, is_low_surrogate, parse_hex4, validate_utf8_seq},
};

/// Bytes that may follow a complete scalar.
fn ends_scalar(byte: Option<&u8>) -> bool {
    match byte {
        None => true,
        Some(&b) => is_ws(b) || matches!(b, b',' | b']' | b'}' | b':'),
    }
}

fn digits_from(src: &[u8], mut i: usize) -> usize {
    while src.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    i
}

impl Parser<'_> {
    /// Validates the string whose opening quote is at the cursor and returns
    /// the span of its content.
    pub(super) fn string(&mut self) -> Result<Span> {
        let src = self.src;
        let open = self.pos;
        let start = open + 1;
        let mut i = start;
        loop {
            let Some(&b) = src.get(i) else {
                return Err(Error::at(ErrorKind::UntermStr, open));
            };
            match b {
                b'"' => break,
                b'\\' => i = self.escape(open, i)?,
                0x00..=0x1F => return Err(Error::at(ErrorKind::StrUnescControl, i)),
                0x80..=0xFF => {
                    i += validate_utf8_seq(&src[i..])
                        .ok_or_else(|| Error::at(ErrorKind::StrUtf8Invalid, i))?;
                }
                _ => i += 1,
            }
        }
        self.pos = i + 1;
        Ok(Span {
            start,
            len: i - start,
        })
    }

    /// Validates the escape whose backslash is at `i`; returns the index
    /// after it. A high surrogate consumes the low surrogate escape that must
    /// follow it.
    fn escape(&self, open: usize, i: usize) -> Result<usize> {
        let src = self.src;
        match src.get(i + 1) {
            None => Err(Error::at(ErrorKind::UntermStr, open)),
            Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => Ok(i + 2),
            Some(b'u') => {
                let unit = parse_hex4(&src[i + 2..])
                    .ok_or_else(|| Error::at(ErrorKind::StrUtf16Invalid, i))?;
                if is_low_surrogate(unit) {
                    return Err(Error::at(ErrorKind::StrUtf16UnpairedLow, i));
                }
                if !is_high_surrogate(unit) {
                    return Ok(i + 6);
                }
                let next = i + 6;
                if src.get(next..next + 2) != Some(b"\\u".as_slice()) {
                    return Err(Error::at(ErrorKind::StrUtf16UnpairedHigh, i));
                }
                match parse_hex4(&src[next + 2..]) {
                    Some(low) if is_low_surrogate(low) => Ok(next + 6),
                    Some(_) => Err(Error::at(ErrorKind::StrUtf16UnpairedHigh, i)),
                    None => Err(Error::at(ErrorKind::StrUtf16Invalid, next)),
                }
            }
            Some(_) => Err(Error::at(ErrorKind::StrEscInvalid, i)),
        }
    }

    /// Validates the number starting at the cursor against the JSON grammar
    /// and returns its span. The text is kept as is; conversion happens in
    /// the accessors.
    pub(super) fn number(&mut self) -> Result<Span> {
        let src = self.src;
        let start = self.pos;
        let mut i = start;
        if src.get(i) == Some(&b'-') {
            i += 1;
        }
        match src.get(i) {
            Some(b'0') => {
                i += 1;
                if src.get(i).is_some_and(u8::is_ascii_digit) {
                    return Err(Error::at(ErrorKind::NumLeadZero, i));
                }
            }
            Some(b'1'..=b'9') => i = digits_from(src, i),
            _ => return Err(Error::at(ErrorKind::NumSign, i)),
        }
        if src.get(i) == Some(&b'.') {
            i += 1;
            if !src.get(i).is_some_and(u8::is_ascii_digit) {
                return Err(Error::at(ErrorKind::NumPointNoDigit, i));
            }
            i = digits_from(src, i);
            if src.get(i) == Some(&b'.') {
                return Err(Error::at(ErrorKind::NumMultiplePoints, i));
            }
        }
        if matches!(src.get(i), Some(b'e' | b'E')) {
            i += 1;
            if matches!(src.get(i), Some(b'+' | b'-')) {
                i += 1;
            }
            if !src.get(i).is_some_and(u8::is_ascii_digit) {
                return Err(Error::at(ErrorKind::NumExpHeadInvalid, i));
            }
            i = digits_from(src, i);
            if matches!(src.get(i), Some(b'+' | b'-' | b'.' | b'e' | b'E')) {
                return Err(Error::at(ErrorKind::NumExpInvalid, i));
            }
        }
        if !ends_scalar(src.get(i)) {
            return Err(Error::at(ErrorKind::NumInvalid, i));
        }
        self.pos = i;
        Ok(Span {
            start,
            len: i - start,
        })
    }

    /// Matches one of `true`, `false` or `null` at the cursor.
    pub(super) fn literal(&mut self, word: &'static [u8], kind: ErrorKind) -> Result<()> {
        let end = self.pos + word.len();
        if self.src.get(self.pos..end) != Some(word) || !ends_scalar(self.src.get(end)) {
            return Err(Error::at(kind, self.pos));
        }
        self.pos = end;
        Ok(())
    }
}
