/// Configuration for parsing.
///
/// # Examples
///
/// ```rust
/// use jsongate::{ParseOptions, Session};
///
/// let mut session = Session::with_options(ParseOptions {
///     max_depth: 4,
///     ..Default::default()
/// });
/// assert!(session.parse(b"[[[[[0]]]]]").is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Maximum nesting depth of arrays and objects.
    ///
    /// The parser recurses once per nesting level, so this bounds its stack
    /// use on hostile input. A scalar root has depth 0 and `[]` has depth 1.
    ///
    /// # Default
    ///
    /// `128`
    pub max_depth: usize,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on parse errors instead of returning them.
    ///
    /// Enabled only in test and fuzz builds to get a backtrace at the failing
    /// input.
    pub panic_on_error: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: 128,
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: false,
        }
    }
}

/// Character used for one level of indentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Indent {
    /// `indent` spaces per level.
    #[default]
    Spaces,
    /// `indent` tabs per level.
    Tabs,
}

/// Line terminator written by the generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Newline {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

/// Whitespace layout for generated JSON.
///
/// Arrays are written on one line with `", "` between elements; each object
/// pair goes on its own line, indented one level deeper than its object.
///
/// # Examples
///
/// ```rust
/// use jsongate::{Session, Slot, Whitespace};
///
/// let mut session = Session::new();
/// let root = session.set_obj(Slot::Root)?;
/// session.set_num(root.key("n"), 1)?;
/// let compact = session.generate(&Whitespace {
///     compact: true,
///     ..Default::default()
/// })?;
/// assert_eq!(compact, r#"{"n":1}"#);
/// # Ok::<(), jsongate::Error>(())
/// ```
///
/// # Default
///
/// Two spaces per level, `\n` line endings, and a final newline only when
/// writing a file.
#[derive(Debug, Clone, Copy)]
pub struct Whitespace {
    /// Indentation characters per nesting level.
    ///
    /// # Default
    ///
    /// `2`
    pub indent: usize,

    /// Whether indentation uses spaces or tabs.
    ///
    /// # Default
    ///
    /// [`Indent::Spaces`]
    pub indent_with: Indent,

    /// Line terminator.
    ///
    /// # Default
    ///
    /// [`Newline::Lf`]
    pub newline: Newline,

    /// Omit all insignificant whitespace, overriding the options above.
    ///
    /// # Default
    ///
    /// `false`
    pub compact: bool,

    /// Whether the text ends with a line terminator. `None` means "only for
    /// files".
    ///
    /// # Default
    ///
    /// `None`
    pub final_newline: Option<bool>,
}

impl Default for Whitespace {
    fn default() -> Self {
        Self {
            indent: 2,
            indent_with: Indent::Spaces,
            newline: Newline::Lf,
            compact: false,
            final_newline: None,
        }
    }
}

impl Whitespace {
    pub(crate) fn newline_str(&self) -> &'static str {
        match self.newline {
            Newline::Lf => "\n",
            Newline::CrLf => "\r\n",
        }
    }

    pub(crate) fn indent_char(&self) -> char {
        match self.indent_with {
            Indent::Spaces => ' ',
            Indent::Tabs => '\t',
        }
    }
}
