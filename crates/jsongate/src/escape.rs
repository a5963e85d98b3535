//! Conversions between JSON string content (the text between the quotes,
//! possibly containing backslash escapes) and plain UTF-8.
//!
//! The read-side functions assume content the parser already validated.
//! Malformed escapes in unvalidated text end the iteration early rather than
//! panicking.

use alloc::string::String;
use core::{fmt, str::Chars};

use crate::{
    error::Result,
    unicode::{combine_surrogates, is_high_surrogate},
};

/// Iterator decoding escaped JSON string content into characters.
#[derive(Clone)]
pub(crate) struct Unescape<'a> {
    rest: Chars<'a>,
}

impl<'a> Unescape<'a> {
    pub(crate) fn new(escaped: &'a str) -> Self {
        Self {
            rest: escaped.chars(),
        }
    }

    fn hex4(&mut self) -> Option<u16> {
        let mut unit = 0u16;
        for _ in 0..4 {
            let digit = self.rest.next()?.to_digit(16)?;
            unit = unit << 4 | u16::try_from(digit).ok()?;
        }
        Some(unit)
    }

    fn unicode_escape(&mut self) -> Option<char> {
        let unit = self.hex4()?;
        if is_high_surrogate(unit) {
            let mut look = self.rest.clone();
            if look.next() == Some('\\') && look.next() == Some('u') {
                self.rest = look;
                let low = self.hex4()?;
                return char::from_u32(combine_surrogates(unit, low));
            }
        }
        Some(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER))
    }
}

impl Iterator for Unescape<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let c = self.rest.next()?;
        if c != '\\' {
            return Some(c);
        }
        Some(match self.rest.next()? {
            'b' => '\u{8}',
            'f' => '\u{c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => self.unicode_escape()?,
            other => other,
        })
    }
}

/// Byte length of `escaped` once unescaped.
pub(crate) fn unescaped_len(escaped: &str) -> usize {
    if !escaped.contains('\\') {
        return escaped.len();
    }
    Unescape::new(escaped).map(char::len_utf8).sum()
}

/// Unescapes into a string allocated once at its exact final size.
pub(crate) fn unescape(escaped: &str) -> Result<String> {
    let mut out = String::new();
    out.try_reserve_exact(unescaped_len(escaped))?;
    out.extend(Unescape::new(escaped));
    Ok(out)
}

/// Equality of two escaped strings by their unescaped contents.
pub(crate) fn json_eq(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    if !a.contains('\\') && !b.contains('\\') {
        return false;
    }
    Unescape::new(a).eq(Unescape::new(b))
}

/// Equality of an escaped string and a plain one.
///
/// Bytes are compared directly up to the first backslash; only the remainder
/// is decoded.
pub(crate) fn json_eq_plain(escaped: &str, plain: &str) -> bool {
    let Some(slash) = escaped.find('\\') else {
        return escaped == plain;
    };
    match plain.get(..slash) {
        Some(head) if head == &escaped[..slash] => {
            Unescape::new(&escaped[slash..]).eq(plain[slash..].chars())
        }
        _ => false,
    }
}

fn escape_for(c: char) -> Option<&'static str> {
    Some(match c {
        '"' => "\\\"",
        '\\' => "\\\\",
        '\u{8}' => "\\b",
        '\t' => "\\t",
        '\n' => "\\n",
        '\u{c}' => "\\f",
        '\r' => "\\r",
        _ => return None,
    })
}

/// Writes `src` as JSON string content: quotes, backslashes and control
/// characters escaped, everything else verbatim.
pub(crate) fn write_escaped<W: fmt::Write>(src: &str, f: &mut W) -> fmt::Result {
    let mut start = 0;
    for (i, c) in src.char_indices() {
        let named = escape_for(c);
        if named.is_none() && c >= ' ' {
            continue;
        }
        f.write_str(&src[start..i])?;
        match named {
            Some(esc) => f.write_str(esc)?,
            None => write!(f, "\\u{:04X}", u32::from(c))?,
        }
        start = i + c.len_utf8();
    }
    f.write_str(&src[start..])
}

/// Byte length of [`write_escaped`]'s output for `src`.
pub(crate) fn escaped_len(src: &str) -> usize {
    src.chars()
        .map(|c| match escape_for(c) {
            Some(esc) => esc.len(),
            None if c < ' ' => 6,
            None => c.len_utf8(),
        })
        .sum()
}

/// Escapes into a string allocated once at its exact final size.
pub(crate) fn escape(src: &str) -> Result<String> {
    let mut out = String::new();
    out.try_reserve_exact(escaped_len(src))?;
    // Writing into a `String` cannot fail.
    let _ = write_escaped(src, &mut out);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::plain("hello", "hello")]
    #[case::named(r#"a\"b\\c\/d"#, "a\"b\\c/d")]
    #[case::controls(r"\b\f\n\r\t", "\u{8}\u{c}\n\r\t")]
    #[case::bmp("r\\u00e9sum\\u00E9", "résumé")]
    #[case::pair("\\uD83D\\uDE00", "😀")]
    #[case::nul(r"\u0000", "\0")]
    fn unescapes(#[case] escaped: &str, #[case] plain: &str) {
        assert_eq!(unescape(escaped).unwrap(), plain);
        assert_eq!(unescaped_len(escaped), plain.len());
        assert_eq!(Unescape::new(escaped).count(), plain.chars().count());
    }

    #[test]
    fn surrogate_pair_unescapes_to_four_bytes() {
        let out = unescape("\\uD83D\\ude00").unwrap();
        assert_eq!(out.as_bytes(), &[0xF0, 0x9F, 0x98, 0x80]);
    }

    #[test]
    fn escapes_named_and_other_controls() {
        let src = "q\"b\\\u{8}\t\n\u{c}\r\u{1}\u{1f}/é";
        let out = escape(src).unwrap();
        assert_eq!(out, r#"q\"b\\\b\t\n\f\r\u0001\u001F/é"#);
        assert_eq!(out.len(), escaped_len(src));
        assert_eq!(unescape(&out).unwrap(), src);
    }

    #[test]
    fn escaped_equality_normalises_both_sides() {
        assert!(json_eq("abc", "abc"));
        assert!(json_eq("\\u0061bc", "a\\u0062c"));
        assert!(!json_eq("abc", "abd"));
        assert!(json_eq_plain("caf\\u00e9", "café"));
        assert!(json_eq_plain("café", "café"));
        assert!(!json_eq_plain("caf\\u00e9", "cafe"));
        assert!(!json_eq_plain(r"xy\n", "ab\n"));
        assert!(!json_eq_plain(r"ab\n", "ab"));
    }

    #[test]
    fn truncated_escape_stops_iteration() {
        let decoded: String = Unescape::new(r"ab\u12").collect();
        assert_eq!(decoded, "ab".to_string());
    }
}
