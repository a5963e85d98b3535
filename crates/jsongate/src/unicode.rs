//! UTF-8 and UTF-16 helpers shared by the parser, the accessors and error
//! rendering. Everything here is pure and byte-oriented.

/// `true` for the `10xxxxxx` bytes that continue a multi-byte sequence.
#[inline]
pub(crate) const fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Sequence width announced by a lead byte, or 0 if `lead` cannot start one.
#[inline]
pub(crate) const fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

/// Validates the multi-byte sequence at the start of `bytes` and returns its
/// width.
///
/// Overlong encodings, UTF-16 surrogates (`ED A0..BF`) and code points above
/// U+10FFFF are rejected, following the well-formed byte table of Unicode
/// 3.9.
pub(crate) fn validate_utf8_seq(bytes: &[u8]) -> Option<usize> {
    let lead = *bytes.first()?;
    let (width, second) = match lead {
        0xC2..=0xDF => (2, 0x80..=0xBF),
        0xE0 => (3, 0xA0..=0xBF),
        0xE1..=0xEC | 0xEE..=0xEF => (3, 0x80..=0xBF),
        0xED => (3, 0x80..=0x9F),
        0xF0 => (4, 0x90..=0xBF),
        0xF1..=0xF3 => (4, 0x80..=0xBF),
        0xF4 => (4, 0x80..=0x8F),
        _ => return None,
    };
    let tail = bytes.get(1..width)?;
    if !second.contains(&tail[0]) {
        return None;
    }
    tail[1..]
        .iter()
        .all(|&b| is_continuation(b))
        .then_some(width)
}

/// Byte length of the character at `at`, clamped to the end of `src`.
///
/// Used to cut the offending character out of the input when rendering
/// error context; the input there may not be valid UTF-8.
pub(crate) fn char_len_at(src: &[u8], at: usize) -> usize {
    let Some(&lead) = src.get(at) else {
        return 0;
    };
    utf8_width(lead).max(1).min(src.len() - at)
}

/// Number of code points in valid UTF-8.
pub(crate) fn count_codepoints(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| !is_continuation(b)).count()
}

/// Parses exactly four hexadecimal digits into a UTF-16 code unit.
pub(crate) fn parse_hex4(bytes: &[u8]) -> Option<u16> {
    bytes.get(..4)?.iter().try_fold(0u16, |acc, &b| {
        let digit = char::from(b).to_digit(16)?;
        Some(acc << 4 | u16::try_from(digit).ok()?)
    })
}

#[inline]
pub(crate) const fn is_high_surrogate(unit: u16) -> bool {
    matches!(unit, 0xD800..=0xDBFF)
}

#[inline]
pub(crate) const fn is_low_surrogate(unit: u16) -> bool {
    matches!(unit, 0xDC00..=0xDFFF)
}

/// Combines a high and a low surrogate into the code point they encode.
#[inline]
pub(crate) fn combine_surrogates(high: u16, low: u16) -> u32 {
    0x10000 + 0x400 * (u32::from(high) - 0xD800) + (u32::from(low) - 0xDC00)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::ascii(b"a", Some(1))]
    #[case::two_byte("é".as_bytes(), Some(2))]
    #[case::three_byte("€".as_bytes(), Some(3))]
    #[case::four_byte("😀".as_bytes(), Some(4))]
    #[case::overlong_two(b"\xC0\xAF", None)]
    #[case::overlong_three(b"\xE0\x80\xAF", None)]
    #[case::surrogate(b"\xED\xA0\x80", None)]
    #[case::above_max(b"\xF4\x90\x80\x80", None)]
    #[case::truncated(b"\xE2\x82", None)]
    #[case::bad_tail(b"\xE2\x82\x41", None)]
    #[case::lone_continuation(b"\x80", None)]
    fn utf8_sequences(#[case] bytes: &[u8], #[case] expected: Option<usize>) {
        // ASCII is handled by the caller; the validator only sees lead bytes.
        let got = if bytes[0] < 0x80 {
            Some(1)
        } else {
            validate_utf8_seq(bytes)
        };
        assert_eq!(got, expected);
    }

    #[test]
    fn counts_codepoints_not_bytes() {
        let word = "résumé";
        assert_eq!(word.len(), 8);
        assert_eq!(count_codepoints(word.as_bytes()), 6);
    }

    #[test]
    fn hex_digits_are_case_insensitive() {
        assert_eq!(parse_hex4(b"00e9"), Some(0xE9));
        assert_eq!(parse_hex4(b"D83D"), Some(0xD83D));
        assert_eq!(parse_hex4(b"d83d\""), Some(0xD83D));
        assert_eq!(parse_hex4(b"12G4"), None);
        assert_eq!(parse_hex4(b"123"), None);
    }

    #[test]
    fn surrogate_pair_combines_to_emoji() {
        assert!(is_high_surrogate(0xD83D));
        assert!(is_low_surrogate(0xDE00));
        assert_eq!(combine_surrogates(0xD83D, 0xDE00), 0x1F600);
    }

    #[test]
    fn char_len_clamps_at_end() {
        let src = "a€".as_bytes();
        assert_eq!(char_len_at(src, 0), 1);
        assert_eq!(char_len_at(src, 1), 3);
        assert_eq!(char_len_at(&src[..3], 1), 2);
        assert_eq!(char_len_at(src, 4), 0);
        assert_eq!(char_len_at(b"\x80", 0), 1);
    }
}
