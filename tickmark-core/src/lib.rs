//! tickmark core tokenizer
//!
//! Incremental tokenizer for the backtick subset of markdown: plain text,
//! `` `inline code` `` and ```` ```fenced blocks``` ````. Built for text that
//! arrives a few characters at a time from a generative source, split at
//! arbitrary points.
//!
//! # Architecture
//!
//! - **state.rs** - Pure transition table (state × input → next state, action)
//! - **tokenizer.rs** - Owned automaton applying the table, buffering and flushing
//! - **event.rs** - Style, Event, and the Sink trait
//! - **segment.rs** - SegmentLog sink and `tokenize` helpers
//! - **render.rs** - HTML and ANSI writer-backed sinks
//! - **streaming.rs** - UTF-8 reassembly for byte chunks
//! - **options.rs** - End-of-stream policy

pub mod error;
pub mod event;
pub mod options;
pub mod render;
pub mod segment;
pub mod state;
pub mod streaming;
pub mod tokenizer;

pub use error::{RenderError, UnknownPolicy};
pub use event::{Event, Sink, Style};
pub use options::{EndOfStream, TokenizerOptions};
pub use render::{AnsiRenderer, HtmlRenderer};
pub use segment::{tokenize, tokenize_chunks, tokenize_chunks_with, Segment, SegmentLog};
pub use state::{transition, Action, Input, ParserState, Transition};
pub use streaming::Utf8Carry;
pub use tokenizer::Tokenizer;
