//! Tokenizer events - the core output of the tickmark streaming tokenizer.
//!
//! This is a SAX-style event model: text is handed to the sink as soon as
//! it is known to belong to a segment, and segment boundaries arrive as
//! separate end events. A segment is never re-emitted; its content is the
//! concatenation of every `Text` event between its first `Text` and its
//! `End`.
//!
//! For a stream like `` see `x` here `` the sink observes:
//! ```text
//! Text { Plain, "see " }
//! End  { Plain }
//! Text { InlineCode, "x" }
//! End  { InlineCode }
//! Text { Plain, " here" }      // segment stays open until a boundary or finish()
//! ```
//!
//! These types are stable and hand-written.

use std::fmt;

/// Style class of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Style {
    /// Unstyled text.
    Plain,
    /// Single-backtick span: monospace, padded, light background, inline.
    InlineCode,
    /// Triple-backtick fence: monospace, padded, light background, on its
    /// own block, whitespace preserved exactly.
    CodeBlock,
}

impl Style {
    /// Stable lowercase name, as used in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::InlineCode => "inline_code",
            Self::CodeBlock => "code_block",
        }
    }

    /// True for the two monospace styles.
    #[inline]
    pub fn is_code(self) -> bool {
        !matches!(self, Self::Plain)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Events delivered to closure sinks.
///
/// The lifetime `'a` borrows the tokenizer's output buffer; copy the text
/// out if it must outlive the callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    /// Append `text` to the open segment of `style`, opening one if no
    /// segment is open. Never empty.
    Text { style: Style, text: &'a str },

    /// The open segment of `style` is complete.
    End { style: Style },
}

impl Event<'_> {
    /// Style of the segment this event belongs to.
    pub fn style(&self) -> Style {
        match self {
            Self::Text { style, .. } => *style,
            Self::End { style } => *style,
        }
    }
}

/// Receiver of tokenizer output.
///
/// Implementations may be called many times for the same open segment
/// before `end_segment` closes it. `end_segment` is only ever called for a
/// segment that received at least one `emit`.
///
/// Any `FnMut(Event<'_>)` closure is a sink:
///
/// ```
/// use tickmark_core::{Event, Tokenizer};
///
/// let mut events = Vec::new();
/// let mut tokenizer = Tokenizer::new();
/// tokenizer.push_chunk("a `b`", &mut |event: Event<'_>| {
///     events.push(format!("{:?}", event));
/// });
/// assert_eq!(events.len(), 4);
/// ```
pub trait Sink {
    /// Append text to the open segment of `style`.
    fn emit(&mut self, style: Style, text: &str);

    /// Close the open segment of `style`.
    fn end_segment(&mut self, style: Style);
}

impl<F> Sink for F
where
    F: FnMut(Event<'_>),
{
    #[inline]
    fn emit(&mut self, style: Style, text: &str) {
        self(Event::Text { style, text })
    }

    #[inline]
    fn end_segment(&mut self, style: Style) {
        self(Event::End { style })
    }
}
