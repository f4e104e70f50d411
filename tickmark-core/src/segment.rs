//! Collected segments.
//!
//! [`SegmentLog`] is a [`Sink`] that coalesces incremental appends back into
//! whole segments. It is the easiest way to inspect tokenizer output and the
//! representation the chunk-boundary tests compare.
//!
//! # Example
//!
//! ```
//! use tickmark_core::{tokenize, Segment};
//!
//! let segments = tokenize("run `cargo test` first");
//! assert_eq!(
//!     segments,
//!     vec![
//!         Segment::plain("run "),
//!         Segment::inline_code("cargo test"),
//!         Segment::plain(" first"),
//!     ]
//! );
//! ```

use crate::event::{Sink, Style};
use crate::options::TokenizerOptions;
use crate::tokenizer::Tokenizer;

/// A span of text with one style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub style: Style,
    pub text: String,
}

impl Segment {
    pub fn new(style: Style, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(Style::Plain, text)
    }

    pub fn inline_code(text: impl Into<String>) -> Self {
        Self::new(Style::InlineCode, text)
    }

    pub fn code_block(text: impl Into<String>) -> Self {
        Self::new(Style::CodeBlock, text)
    }
}

/// Sink that records segments.
///
/// Closed segments are kept in order; at most one segment is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentLog {
    closed: Vec<Segment>,
    open: Option<Segment>,
    /// Number of `emit` calls received
    appends: usize,
}

impl SegmentLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Segments that have been ended.
    pub fn segments(&self) -> &[Segment] {
        &self.closed
    }

    /// The segment still receiving text, if any.
    pub fn open_segment(&self) -> Option<&Segment> {
        self.open.as_ref()
    }

    /// How many appends built the recorded segments.
    pub fn appends(&self) -> usize {
        self.appends
    }

    /// Closed segments followed by the open one.
    pub fn into_segments(self) -> Vec<Segment> {
        let mut segments = self.closed;
        segments.extend(self.open);
        segments
    }

    /// Text of all segments, open one included, ignoring style.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for segment in self.closed.iter().chain(self.open.as_ref()) {
            out.push_str(&segment.text);
        }
        out
    }

    /// Forget everything recorded.
    pub fn clear(&mut self) {
        self.closed.clear();
        self.open = None;
        self.appends = 0;
    }
}

impl Sink for SegmentLog {
    fn emit(&mut self, style: Style, text: &str) {
        self.appends += 1;
        match &mut self.open {
            Some(open) if open.style == style => open.text.push_str(text),
            open => {
                // A different style arriving means the previous segment
                // was never ended.
                if let Some(previous) = open.take() {
                    self.closed.push(previous);
                }
                *open = Some(Segment::new(style, text));
            }
        }
    }

    fn end_segment(&mut self, style: Style) {
        if let Some(open) = self.open.take() {
            debug_assert_eq!(open.style, style);
            self.closed.push(open);
        }
    }
}

/// Tokenize a complete string with default options.
pub fn tokenize(input: &str) -> Vec<Segment> {
    tokenize_chunks([input])
}

/// Tokenize a sequence of chunks with default options.
pub fn tokenize_chunks<I, T>(chunks: I) -> Vec<Segment>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    tokenize_chunks_with(chunks, TokenizerOptions::default()).into_segments()
}

/// Tokenize a sequence of chunks, returning the full log.
///
/// With [`EndOfStream::Discard`](crate::EndOfStream::Discard) an
/// unterminated segment remains in [`SegmentLog::open_segment`].
pub fn tokenize_chunks_with<I, T>(chunks: I, options: TokenizerOptions) -> SegmentLog
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut tokenizer = Tokenizer::with_options(options);
    let mut log = SegmentLog::new();
    for chunk in chunks {
        tokenizer.push_chunk(chunk.as_ref(), &mut log);
    }
    tokenizer.finish(&mut log);
    log
}
