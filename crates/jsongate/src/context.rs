//! Human-readable error messages that point into the parsed input.

use alloc::string::String;
use core::fmt::{self, Write as _};

use bstr::ByteSlice;

use crate::{error::Error, session::Session, unicode};

/// Most bytes of context shown on either side of the error position.
const CONTEXT_MAX: usize = 80;

/// ANSI red.
const MARK_BEFORE: &str = "\x1b[0;31m";
/// ANSI reset.
const MARK_AFTER: &str = "\x1b[0m";

/// 1-based line and character of `at`. CR, LF and CRLF each end a line, and
/// characters are counted by UTF-8 lead bytes.
fn line_and_char(src: &[u8], at: usize) -> (usize, usize, usize) {
    let (mut line, mut col, mut line_start) = (1, 1, 0);
    let mut i = 0;
    while i < at {
        match src[i] {
            b'\r' | b'\n' => {
                if src[i] == b'\r' && i + 1 < at && src[i + 1] == b'\n' {
                    i += 1;
                }
                i += 1;
                line += 1;
                col = 1;
                line_start = i;
            }
            b => {
                col += usize::from(!unicode::is_continuation(b));
                i += 1;
            }
        }
    }
    (line, col, line_start)
}

struct Context<'a> {
    line: usize,
    col: usize,
    before: &'a [u8],
    mark: &'a [u8],
    after: &'a [u8],
}

impl<'a> Context<'a> {
    fn new(src: &'a [u8], at: usize) -> Self {
        let at = at.min(src.len());
        let (line, col, line_start) = line_and_char(src, at);
        let before = &src[line_start.max(at.saturating_sub(CONTEXT_MAX))..at];
        let mark_end = at + unicode::char_len_at(src, at);
        let rest = &src[mark_end..];
        let line_end = rest
            .iter()
            .position(|&b| b == b'\r' || b == b'\n')
            .unwrap_or(rest.len());
        Self {
            line,
            col,
            before,
            mark: &src[at..mark_end],
            after: &rest[..line_end.min(CONTEXT_MAX)],
        }
    }

    fn write(&self, out: &mut String, mark_before: &str, mark_after: &str) -> fmt::Result {
        write!(
            out,
            "[LINE {}, CHAR {}] {}{mark_before}{}{mark_after}{}",
            self.line,
            self.col,
            self.before.as_bstr(),
            self.mark.as_bstr(),
            self.after.as_bstr(),
        )
    }
}

impl Session<'_> {
    /// Renders `err` with the line, character and surrounding text of the
    /// position it refers to, highlighted in red for a terminal.
    ///
    /// Errors that do not refer to the input render as their
    /// [`Display`](fmt::Display) form.
    ///
    /// ```rust
    /// use jsongate::Session;
    ///
    /// let mut session = Session::new();
    /// let err = session.parse("[\n  1,\n  2 3\n]").unwrap_err();
    /// assert_eq!(
    ///     session.describe_with(&err, "<", ">"),
    ///     "array elements must be followed by a comma (',') or a closing bracket (']'): \
    ///      [LINE 3, CHAR 5]   2 <3>"
    /// );
    /// ```
    #[must_use]
    pub fn describe(&self, err: &Error) -> String {
        self.describe_with(err, MARK_BEFORE, MARK_AFTER)
    }

    /// Like [`describe`](Self::describe), with custom text around the
    /// character at the error position.
    #[must_use]
    pub fn describe_with(&self, err: &Error, mark_before: &str, mark_after: &str) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write!(out, "{err}");
        if let (Some(at), Some(src)) = (err.offset(), self.input()) {
            let _ = out.write_str(": ");
            let _ = Context::new(src, at).write(&mut out, mark_before, mark_after);
        }
        out
    }
}
