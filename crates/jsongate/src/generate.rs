//! Serialization of the output tree.
//!
//! Generation runs the same walk twice: once into a [`Counter`] to learn the
//! exact byte length, then into storage sized for exactly that length.

use alloc::{string::String, vec::Vec};

use log::debug;

use crate::{
    error::{ErrorKind, Result},
    options::Whitespace,
    out::{OutTree, OutValue},
    session::{Phase, Session},
};

pub(crate) trait Sink {
    fn put(&mut self, s: &str);

    fn put_char(&mut self, c: char) {
        self.put(c.encode_utf8(&mut [0; 4]));
    }
}

#[derive(Default)]
pub(crate) struct Counter(pub usize);

impl Sink for Counter {
    fn put(&mut self, s: &str) {
        self.0 += s.len();
    }

    fn put_char(&mut self, c: char) {
        self.0 += c.len_utf8();
    }
}

impl Sink for String {
    fn put(&mut self, s: &str) {
        self.push_str(s);
    }
}

/// Writes into a caller buffer already checked to be large enough.
struct SliceSink<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl Sink for SliceSink<'_> {
    fn put(&mut self, s: &str) {
        let end = self.len + s.len();
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
    }
}

struct Writer<'t, 'src, 'w, S> {
    tree: &'t OutTree<'src>,
    ws: &'w Whitespace,
    indent: usize,
    sink: S,
}

impl<S: Sink> Writer<'_, '_, '_, S> {
    fn newline(&mut self) {
        if !self.ws.compact {
            self.sink.put(self.ws.newline_str());
        }
    }

    fn space(&mut self) {
        if !self.ws.compact {
            self.sink.put(" ");
        }
    }

    fn pad(&mut self) {
        if !self.ws.compact {
            let c = self.ws.indent_char();
            for _ in 0..self.indent {
                self.sink.put_char(c);
            }
        }
    }

    fn quoted(&mut self, escaped: &str) {
        self.sink.put("\"");
        self.sink.put(escaped);
        self.sink.put("\"");
    }

    /// Writes a scalar or an empty container in full. A non-empty container
    /// is only opened, and returned as a frame for its members.
    fn open(&mut self, value: &OutValue<'_>) -> Option<Frame> {
        match value {
            OutValue::Null => self.sink.put("null"),
            OutValue::Bool(true) => self.sink.put("true"),
            OutValue::Bool(false) => self.sink.put("false"),
            OutValue::Number(text) => self.sink.put(text),
            OutValue::String(text) => self.quoted(text),
            OutValue::Array(list) if list.len == 0 => self.sink.put("[]"),
            OutValue::Object(list) if list.len == 0 => self.sink.put("{}"),
            OutValue::Array(list) => {
                self.sink.put("[");
                return Some(Frame {
                    next: list.first,
                    object: false,
                    started: false,
                });
            }
            OutValue::Object(list) => {
                self.sink.put("{");
                self.indent += self.ws.indent;
                return Some(Frame {
                    next: list.first,
                    object: true,
                    started: false,
                });
            }
        }
        None
    }

    fn close(&mut self, frame: &Frame) {
        if frame.object {
            self.indent -= self.ws.indent;
            self.newline();
            self.pad();
            self.sink.put("}");
        } else {
            self.sink.put("]");
        }
    }

    /// Writes `value` with an explicit stack of open containers, so nesting
    /// depth is bounded by memory rather than by the call stack.
    fn value(&mut self, value: &OutValue<'_>) {
        let tree = self.tree;
        let mut stack: Vec<Frame> = Vec::new();
        stack.extend(self.open(value));
        while let Some(frame) = stack.last_mut() {
            let Some(id) = frame.next else {
                if let Some(frame) = stack.pop() {
                    self.close(&frame);
                }
                continue;
            };
            let node = &tree.nodes[id];
            let (object, started) = (frame.object, frame.started);
            frame.next = node.next;
            frame.started = true;

            if started {
                self.sink.put(",");
            }
            if object {
                self.newline();
                self.pad();
                if let Some(key) = &node.key {
                    self.quoted(key);
                }
                self.sink.put(":");
                self.space();
            } else if started {
                self.space();
            }
            stack.extend(self.open(&node.value));
        }
    }
}

/// A container whose members are being written.
struct Frame {
    /// The next member to write.
    next: Option<usize>,
    object: bool,
    /// Whether a member was already written.
    started: bool,
}

/// Walks the whole tree into `sink`, then the final newline if `eof` asks
/// for one.
fn walk<S: Sink>(tree: &OutTree<'_>, ws: &Whitespace, eof: bool, sink: S) -> S {
    let mut writer = Writer {
        tree,
        ws,
        indent: 0,
        sink,
    };
    if let Some(root) = tree.root {
        writer.value(&tree.nodes[root].value);
    }
    if eof {
        writer.sink.put(ws.newline_str());
    }
    writer.sink
}

/// Exact byte length of the generated text.
fn measure(tree: &OutTree<'_>, ws: &Whitespace, eof: bool) -> usize {
    walk(tree, ws, eof, Counter::default()).0
}

/// Generates into a string allocated once at its final size.
fn to_string(tree: &OutTree<'_>, ws: &Whitespace, eof: bool) -> Result<String> {
    let len = measure(tree, ws, eof);
    let mut out = String::new();
    out.try_reserve_exact(len)?;
    let out = walk(tree, ws, eof, out);
    debug!("generated {len} bytes");
    Ok(out)
}

/// Generates into `buf`, or only measures when `buf` is `None`. Returns the
/// generated length.
fn to_slice(
    tree: &OutTree<'_>,
    ws: &Whitespace,
    eof: bool,
    buf: Option<&mut [u8]>,
) -> Result<usize> {
    let needed = measure(tree, ws, eof);
    let Some(buf) = buf else {
        return Ok(needed);
    };
    if buf.len() < needed {
        return Err(ErrorKind::BufferTooSmall { needed }.into());
    }
    let sink = walk(tree, ws, eof, SliceSink { buf, len: 0 });
    debug!("generated {} bytes into caller buffer", sink.len);
    Ok(sink.len)
}

impl Session<'_> {
    fn check_generate(&self) -> Result<&OutTree<'_>> {
        match self.phase() {
            Phase::Building | Phase::Renderable if !self.out.is_empty() => Ok(&self.out),
            _ => Err(ErrorKind::StateNotGenerate.into()),
        }
    }

    fn rendered<T>(&self, value: T) -> T {
        self.set_phase(Phase::Renderable);
        value
    }

    /// Serializes the built document to a string. No final newline is
    /// written unless `ws.final_newline` asks for one.
    ///
    /// ```rust
    /// use jsongate::{Indent, Session, Slot, Whitespace};
    ///
    /// let mut session = Session::new();
    /// let root = session.set_obj(Slot::Root)?;
    /// session.set_arr(root.key("empty"))?;
    /// let tabs = Whitespace {
    ///     indent: 1,
    ///     indent_with: Indent::Tabs,
    ///     ..Default::default()
    /// };
    /// assert_eq!(session.generate(&tabs)?, "{\n\t\"empty\": []\n}");
    /// # Ok::<(), jsongate::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// [`ErrorKind::StateNotGenerate`] before any value was set, or an
    /// allocation error.
    pub fn generate(&self, ws: &Whitespace) -> Result<String> {
        let tree = self.check_generate()?;
        to_string(tree, ws, ws.final_newline.unwrap_or(false)).map(|s| self.rendered(s))
    }

    /// Serializes the built document into `buf` and returns the number of
    /// bytes written. With `None`, only returns the number of bytes needed.
    ///
    /// # Errors
    ///
    /// As for [`generate`](Self::generate), plus
    /// [`ErrorKind::BufferTooSmall`]; nothing is written in that case.
    pub fn generate_into(&self, ws: &Whitespace, buf: Option<&mut [u8]>) -> Result<usize> {
        let tree = self.check_generate()?;
        let written = buf.is_some();
        let len = to_slice(tree, ws, ws.final_newline.unwrap_or(false), buf)?;
        Ok(if written { self.rendered(len) } else { len })
    }

    /// Serializes the built document to a new file at `path`, replacing any
    /// existing one. A final newline is written unless `ws.final_newline` is
    /// `Some(false)`.
    ///
    /// # Errors
    ///
    /// As for [`generate`](Self::generate), plus [`ErrorKind::Io`].
    #[cfg(feature = "std")]
    pub fn generate_file(
        &self,
        path: impl AsRef<std::path::Path>,
        ws: &Whitespace,
    ) -> Result<()> {
        use std::io::Write;

        let tree = self.check_generate()?;
        let text = to_string(tree, ws, ws.final_newline.unwrap_or(true))?;
        let mut file = std::fs::File::create(path).map_err(crate::session::io("create"))?;
        file.write_all(text.as_bytes())
            .map_err(crate::session::io("write"))?;
        file.flush().map_err(crate::session::io("write"))?;
        self.set_phase(Phase::Renderable);
        Ok(())
    }
}
