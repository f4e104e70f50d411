//! The backtick state machine as a pure transition table.
//!
//! `transition` is the single source of truth for how the tokenizer reacts
//! to a character. It performs no side effects: the returned [`Action`] is
//! applied by [`Tokenizer`](crate::Tokenizer), which owns the output buffer
//! and the sink.
//!
//! ```text
//! Normal        `  -> Pending1          other -> Normal (append)
//! Pending1      `  -> Pending2          other -> InlineCode
//! Pending2      `  -> CodeBlock         other -> InlineCode ("`" + char)
//! InlineCode    `  -> Normal (close)    other -> InlineCode
//! CodeBlock     `  -> PendingClose      other -> CodeBlock
//! PendingClose  `  -> PendingClose / Normal on the third (close)
//!               other -> CodeBlock (pending backticks become content)
//! ```

use crate::event::Style;

/// The one backtick that drives every transition.
pub const BACKTICK: char = '`';

/// Length of a fence run. Longer runs are never accumulated.
pub const FENCE_LEN: u8 = 3;

/// Tokenizer state. Exactly one is current at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParserState {
    /// Plain text.
    #[default]
    Normal,
    /// Inside a single-backtick span.
    InlineCode,
    /// Inside a triple-backtick fence.
    CodeBlock,
    /// Saw one backtick while in `Normal`.
    PendingBacktick1,
    /// Saw two backticks in a row while in `Normal`.
    PendingBacktick2,
    /// Saw one or two backticks inside a code block: a possible close.
    PendingCloseBacktick,
}

impl ParserState {
    /// Stable states have no unresolved backticks.
    #[inline]
    pub fn is_stable(self) -> bool {
        matches!(self, Self::Normal | Self::InlineCode | Self::CodeBlock)
    }

    /// Style of text accumulated while in this state.
    #[inline]
    pub fn style(self) -> Style {
        match self {
            Self::Normal | Self::PendingBacktick1 | Self::PendingBacktick2 => Style::Plain,
            Self::InlineCode => Style::InlineCode,
            Self::CodeBlock | Self::PendingCloseBacktick => Style::CodeBlock,
        }
    }
}

/// Input class of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Backtick,
    Other(char),
}

impl Input {
    #[inline]
    pub fn classify(ch: char) -> Self {
        if ch == BACKTICK {
            Self::Backtick
        } else {
            Self::Other(ch)
        }
    }
}

/// What the tokenizer must do with its buffer and sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Append the character to the output buffer.
    Append(char),

    /// A backtick run started in plain text: hand the buffered plain text
    /// to the sink. The plain segment stays open until the run resolves.
    FlushPlain,

    /// Backtick counted; nothing to emit until the run is classified.
    Hold,

    /// The run resolved to inline code: end the plain segment, then start
    /// the inline buffer with `literal` backticks followed by `ch`.
    OpenInline { literal: u8, ch: char },

    /// The run reached three: end the plain segment, enter the block.
    /// The three backticks are not rendered.
    OpenBlock,

    /// Closing delimiter: flush the buffer and end the segment.
    Close(Style),

    /// A possible closing fence fell short: its `literal` backticks are
    /// block content, followed by `ch`.
    Release { literal: u8, ch: char },
}

/// Result of one table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: ParserState,
    /// Unconfirmed backticks after this step (0 once a run is resolved).
    pub pending: u8,
    pub action: Action,
}

impl Transition {
    #[inline]
    const fn new(next: ParserState, pending: u8, action: Action) -> Self {
        Self { next, pending, action }
    }
}

/// Look up the transition for `input` in `state` with `pending` unconfirmed
/// backticks.
///
/// `pending` only distinguishes the second from the third backtick of a
/// closing fence; every other row is determined by `state` alone.
pub fn transition(state: ParserState, pending: u8, input: Input) -> Transition {
    use Action::*;
    use ParserState::*;

    match (state, input) {
        (Normal, Input::Backtick) => Transition::new(PendingBacktick1, 1, FlushPlain),
        (Normal, Input::Other(ch)) => Transition::new(Normal, 0, Append(ch)),

        (PendingBacktick1, Input::Backtick) => Transition::new(PendingBacktick2, 2, Hold),
        (PendingBacktick1, Input::Other(ch)) => {
            Transition::new(InlineCode, 0, OpenInline { literal: 0, ch })
        }

        (PendingBacktick2, Input::Backtick) => Transition::new(CodeBlock, 0, OpenBlock),
        // One backtick of the pair delimits, the other is literal content.
        (PendingBacktick2, Input::Other(ch)) => {
            Transition::new(InlineCode, 0, OpenInline { literal: 1, ch })
        }

        (InlineCode, Input::Backtick) => Transition::new(Normal, 0, Close(Style::InlineCode)),
        (InlineCode, Input::Other(ch)) => Transition::new(InlineCode, 0, Append(ch)),

        (CodeBlock, Input::Backtick) => Transition::new(PendingCloseBacktick, 1, Hold),
        (CodeBlock, Input::Other(ch)) => Transition::new(CodeBlock, 0, Append(ch)),

        (PendingCloseBacktick, Input::Backtick) => {
            let count = pending.saturating_add(1);
            if count >= FENCE_LEN {
                Transition::new(Normal, 0, Close(Style::CodeBlock))
            } else {
                Transition::new(PendingCloseBacktick, count, Hold)
            }
        }
        (PendingCloseBacktick, Input::Other(ch)) => Transition::new(
            CodeBlock,
            0,
            Release {
                literal: pending.min(FENCE_LEN - 1),
                ch,
            },
        ),
    }
}
