//! The incremental tokenizer.
//!
//! Input arrives in chunks of any size, split anywhere. Each chunk is
//! consumed completely; anything that can be rendered is handed to the
//! sink before `push_chunk` returns, and only an unresolved backtick run is
//! held back.
//!
//! # Chunk-boundary independence
//!
//! Chunking only changes *how many* `emit` calls carry a segment's text,
//! never the segments themselves: boundaries come exclusively from the
//! transition table. Feeding `"`a`"` whole, as `["`a", "`"]`, or one char
//! at a time yields the same single inline-code segment `a`.
//!
//! # Scanning
//!
//! In a stable state every non-backtick character is appended unchanged, so
//! the tokenizer jumps to the next backtick with `memchr` and appends the
//! run in one step. Backticks, and every character seen while a run is
//! pending, go through [`transition`] one at a time.

use memchr::memchr;
use tracing::{debug, trace};

use crate::event::{Sink, Style};
use crate::options::{EndOfStream, TokenizerOptions};
use crate::state::{transition, Action, Input, ParserState, BACKTICK};
use crate::streaming::Utf8Carry;

/// Owned state for one text stream.
///
/// Create one per stream; call [`finish`](Self::finish) (or
/// [`reset`](Self::reset)) before reusing it for another.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    state: ParserState,
    /// Unconfirmed backticks of the current run
    pending: u8,
    /// Text of the current segment not yet handed to the sink
    buffer: String,
    /// Style of the segment open in the sink
    active: Option<Style>,
    options: TokenizerOptions,
    utf8: Utf8Carry,
    /// Bytes of text consumed since the stream started
    offset: u64,
}

impl Tokenizer {
    /// Create a tokenizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tokenizer with the given options.
    pub fn with_options(options: TokenizerOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// Current state of the automaton.
    #[inline]
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Backticks seen but not yet classified.
    #[inline]
    pub fn pending_backticks(&self) -> u8 {
        self.pending
    }

    /// Style of the segment currently open in the sink, if any.
    #[inline]
    pub fn active_style(&self) -> Option<Style> {
        self.active
    }

    /// Text accumulated but not yet emitted.
    ///
    /// Always empty between `push_chunk` calls: the buffer is flushed at
    /// the end of every chunk.
    #[inline]
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    /// Total bytes of text consumed (after UTF-8 reassembly).
    #[inline]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Consume a chunk of text.
    ///
    /// Never fails. Buffered segment text is emitted before returning so the
    /// host can render the open segment live.
    pub fn push_chunk<S>(&mut self, chunk: &str, sink: &mut S)
    where
        S: Sink + ?Sized,
    {
        self.consume(chunk, sink);
        self.flush(sink);
    }

    /// Consume a chunk of raw bytes whose boundaries may split a UTF-8
    /// character.
    ///
    /// Invalid UTF-8 decodes to U+FFFD.
    pub fn push_bytes<S>(&mut self, bytes: &[u8], sink: &mut S)
    where
        S: Sink + ?Sized,
    {
        let mut utf8 = std::mem::take(&mut self.utf8);
        utf8.decode(bytes, |text| self.consume(text, sink));
        self.utf8 = utf8;
        self.flush(sink);
    }

    /// Signal the end of the stream and reset for reuse.
    ///
    /// Behaviour depends on [`EndOfStream`]:
    ///
    /// - `Flush`: pending backticks become literal text of the segment they
    ///   were seen in (plain text, or code-block content for a short closing
    ///   fence), the buffer is flushed, and the open segment is ended.
    /// - `Discard`: pending backticks are dropped and the open segment is
    ///   left unterminated.
    pub fn finish<S>(&mut self, sink: &mut S)
    where
        S: Sink + ?Sized,
    {
        let mut utf8 = std::mem::take(&mut self.utf8);
        utf8.finish(|text| self.consume(text, sink));

        debug!(
            state = ?self.state,
            pending = self.pending,
            policy = %self.options.end_of_stream,
            "end of stream"
        );

        match self.options.end_of_stream {
            EndOfStream::Flush => {
                if !self.state.is_stable() {
                    push_backticks(&mut self.buffer, self.pending);
                }
                self.flush(sink);
                self.end_segment(sink);
            }
            EndOfStream::Discard => {
                if !self.buffer.is_empty() {
                    trace!(dropped = self.buffer.len(), "discarding buffered text");
                }
            }
        }

        self.reset();
    }

    /// Return to the initial state without notifying any sink.
    ///
    /// Options are kept.
    pub fn reset(&mut self) {
        self.state = ParserState::Normal;
        self.pending = 0;
        self.buffer.clear();
        self.active = None;
        self.utf8.clear();
        self.offset = 0;
    }

    /// Feed text through the automaton without the end-of-chunk flush.
    fn consume<S>(&mut self, text: &str, sink: &mut S)
    where
        S: Sink + ?Sized,
    {
        self.offset += text.len() as u64;

        let mut rest = text;
        while !rest.is_empty() {
            if self.state.is_stable() {
                match memchr(BACKTICK as u8, rest.as_bytes()) {
                    Some(idx) => {
                        // The backtick is ASCII, so idx is a char boundary.
                        self.buffer.push_str(&rest[..idx]);
                        rest = &rest[idx..];
                    }
                    None => {
                        self.buffer.push_str(rest);
                        return;
                    }
                }
            }

            let mut chars = rest.chars();
            let Some(ch) = chars.next() else { break };
            rest = chars.as_str();
            self.step(ch, sink);
        }
    }

    /// Apply one row of the transition table.
    fn step<S>(&mut self, ch: char, sink: &mut S)
    where
        S: Sink + ?Sized,
    {
        let next = transition(self.state, self.pending, Input::classify(ch));
        if next.next != self.state {
            trace!(from = ?self.state, to = ?next.next, action = ?next.action, "transition");
        }

        match next.action {
            Action::Append(ch) => self.buffer.push(ch),
            Action::FlushPlain => self.flush(sink),
            Action::Hold => {}
            Action::OpenInline { literal, ch } => {
                self.end_segment(sink);
                push_backticks(&mut self.buffer, literal);
                self.buffer.push(ch);
            }
            Action::OpenBlock => self.end_segment(sink),
            Action::Close(style) => {
                debug_assert_eq!(style, self.state.style());
                self.flush(sink);
                self.end_segment(sink);
            }
            Action::Release { literal, ch } => {
                push_backticks(&mut self.buffer, literal);
                self.buffer.push(ch);
            }
        }

        self.state = next.next;
        self.pending = next.pending;
    }

    /// Hand buffered text to the sink as part of the open segment.
    fn flush<S>(&mut self, sink: &mut S)
    where
        S: Sink + ?Sized,
    {
        if self.buffer.is_empty() {
            return;
        }
        let style = self.state.style();
        match self.active {
            None => {
                debug!(%style, "segment opened");
                self.active = Some(style);
            }
            Some(active) => debug_assert_eq!(active, style),
        }
        sink.emit(style, &self.buffer);
        self.buffer.clear();
    }

    /// Close the segment open in the sink, if any.
    fn end_segment<S>(&mut self, sink: &mut S)
    where
        S: Sink + ?Sized,
    {
        if let Some(style) = self.active.take() {
            debug!(%style, "segment ended");
            sink.end_segment(style);
        }
    }
}

#[inline]
fn push_backticks(buffer: &mut String, count: u8) {
    for _ in 0..count {
        buffer.push(BACKTICK);
    }
}
