//! The session: one document, parsed or built, and its lifecycle.

use alloc::vec::Vec;
use core::cell::Cell;

use log::debug;

use crate::{
    error::{ErrorKind, Result},
    options::ParseOptions,
    out::OutTree,
    parser,
    tree::Node,
};

/// Lifecycle phase of a [`Session`].
///
/// A session either reads (`Empty → Parsing → Queryable`) or writes
/// (`Empty → Building → Renderable`). [`Session::reset`] returns it to
/// `Empty` from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing parsed or set yet.
    Empty,
    /// A document was parsed and has not been queried yet.
    Parsing,
    /// At least one getter succeeded.
    Queryable,
    /// At least one setter succeeded.
    Building,
    /// At least one generation succeeded. The document may be generated
    /// again but no longer extended.
    Renderable,
    /// The last parse failed. Only [`Session::reset`] is accepted.
    Failed,
}

/// Maps an I/O failure of `op` into an [`ErrorKind::Io`] error.
#[cfg(feature = "std")]
pub(crate) fn io(op: &'static str) -> impl FnOnce(std::io::Error) -> crate::Error {
    move |source| ErrorKind::Io { op, source }.into()
}

#[derive(Debug)]
pub(crate) enum Input<'src> {
    Owned(Vec<u8>),
    Borrowed(&'src [u8]),
}

impl Input<'_> {
    pub(crate) fn bytes(&self) -> &[u8] {
        match self {
            Input::Owned(bytes) => bytes,
            Input::Borrowed(bytes) => bytes,
        }
    }
}

/// A JSON document being read or written.
///
/// The lifetime `'src` covers buffers the caller lends to the session:
/// input handed to [`parse_borrowed`](Self::parse_borrowed) and strings
/// handed to [`set_caller_str`](Self::set_caller_str).
///
/// Reading:
///
/// ```rust
/// use jsongate::{At, ArrOptions, ObjOptions, Session, StrOptions};
///
/// let mut session = Session::new();
/// session.parse(br#"{"a":[1,2,"x"],"b":null}"#)?;
/// let root = session.get_obj(At::Root, &ObjOptions::default())?;
/// let a = session.get_arr(root.at("a"), &ArrOptions::default())?;
/// assert_eq!(a.len(), 3);
/// let x = session.get_str(a.at(2), &StrOptions::default())?;
/// assert_eq!(x.as_str(), Some("x"));
/// session.get_null(root.at("b"))?;
/// # Ok::<(), jsongate::Error>(())
/// ```
///
/// Writing:
///
/// ```rust
/// use jsongate::{Session, Slot, Whitespace};
///
/// let mut session = Session::new();
/// let root = session.set_obj(Slot::Root)?;
/// let tags = session.set_arr(root.key("tags"))?;
/// session.set_str(tags.push(), "fast")?;
/// session.set_str(tags.push(), "strict")?;
/// session.set_bool(root.key("ok"), true)?;
/// assert_eq!(
///     session.generate(&Whitespace::default())?,
///     "{\n  \"tags\": [\"fast\", \"strict\"],\n  \"ok\": true\n}"
/// );
/// # Ok::<(), jsongate::Error>(())
/// ```
#[derive(Debug)]
pub struct Session<'src> {
    phase: Cell<Phase>,
    options: ParseOptions,
    pub(crate) input: Option<Input<'src>>,
    pub(crate) root: Option<Node>,
    pub(crate) out: OutTree<'src>,
}

impl Default for Session<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'src> Session<'src> {
    /// An empty session with default [`ParseOptions`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// An empty session parsing with `options`.
    #[must_use]
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            phase: Cell::new(Phase::Empty),
            options,
            input: None,
            root: None,
            out: OutTree::default(),
        }
    }

    /// The current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub(crate) fn set_phase(&self, phase: Phase) {
        let from = self.phase.replace(phase);
        if from != phase {
            debug!("session phase {from:?} -> {phase:?}");
        }
    }

    /// Releases the document and any buffers, returning to [`Phase::Empty`].
    /// Parse options are kept.
    pub fn reset(&mut self) {
        self.input = None;
        self.root = None;
        self.out.clear();
        self.set_phase(Phase::Empty);
    }

    fn check_parse(&self) -> Result<()> {
        if self.phase() == Phase::Empty {
            Ok(())
        } else {
            Err(ErrorKind::StateNotParse.into())
        }
    }

    /// Parses a copy of `json`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::StateNotParse`] unless the session is empty, an
    /// allocation error, or any parse error. After a parse error the session
    /// is [`Phase::Failed`] and keeps the input for
    /// [`describe`](Self::describe).
    pub fn parse(&mut self, json: impl AsRef<[u8]>) -> Result<()> {
        self.check_parse()?;
        let json = json.as_ref();
        let mut owned = Vec::new();
        owned.try_reserve_exact(json.len())?;
        owned.extend_from_slice(json);
        self.load(Input::Owned(owned))
    }

    /// Parses `json` in place. The buffer must outlive the session; string
    /// and number values keep pointing into it.
    ///
    /// # Errors
    ///
    /// As for [`parse`](Self::parse).
    pub fn parse_borrowed(&mut self, json: &'src [u8]) -> Result<()> {
        self.check_parse()?;
        self.load(Input::Borrowed(json))
    }

    /// Reads the whole file at `path` and parses it.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::Io`] if the file cannot be opened or read, otherwise as
    /// for [`parse`](Self::parse).
    #[cfg(feature = "std")]
    pub fn parse_file(&mut self, path: impl AsRef<std::path::Path>) -> Result<()> {
        use std::io::Read;

        self.check_parse()?;
        let mut file = std::fs::File::open(path).map_err(io("open"))?;
        let len = file.metadata().map_err(io("stat"))?.len();
        let mut owned = Vec::new();
        owned.try_reserve_exact(usize::try_from(len).unwrap_or(0))?;
        file.read_to_end(&mut owned).map_err(io("read"))?;
        self.load(Input::Owned(owned))
    }

    fn load(&mut self, input: Input<'src>) -> Result<()> {
        let result = parser::parse(input.bytes(), self.options);
        let len = input.bytes().len();
        self.input = Some(input);
        match result {
            Ok(root) => {
                debug!("parsed {len} bytes");
                self.root = Some(root);
                self.set_phase(Phase::Parsing);
                Ok(())
            }
            Err(err) => {
                #[cfg(any(test, feature = "fuzzing"))]
                if self.options.panic_on_error {
                    panic!("parse failed: {err} at {:?}", err.offset());
                }
                debug!("parse failed: {err}");
                self.set_phase(Phase::Failed);
                Err(err)
            }
        }
    }

    /// The input buffer and the parsed root, if the phase allows getters.
    pub(crate) fn document(&self) -> Result<(&[u8], &Node)> {
        match (self.phase(), &self.input, &self.root) {
            (Phase::Parsing | Phase::Queryable, Some(input), Some(root)) => {
                Ok((input.bytes(), root))
            }
            _ => Err(ErrorKind::StateNotGet.into()),
        }
    }

    /// The raw input, available after any parse attempt.
    #[must_use]
    pub fn input(&self) -> Option<&[u8]> {
        self.input.as_ref().map(Input::bytes)
    }
}
