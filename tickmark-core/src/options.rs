//! Tokenizer configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownPolicy;

/// What [`Tokenizer::finish`](crate::Tokenizer::finish) does with content
/// that is still unresolved when the stream ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EndOfStream {
    /// Resolve pending backticks as literal text, flush the buffer and end
    /// the open segment. An unterminated fence becomes a complete code block.
    #[default]
    Flush,
    /// Drop pending backticks and leave the open segment unterminated.
    /// Text already emitted stays emitted.
    Discard,
}

impl EndOfStream {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flush => "flush",
            Self::Discard => "discard",
        }
    }
}

impl fmt::Display for EndOfStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndOfStream {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flush" => Ok(Self::Flush),
            "discard" => Ok(Self::Discard),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

/// Options for a [`Tokenizer`](crate::Tokenizer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TokenizerOptions {
    pub end_of_stream: EndOfStream,
}

impl TokenizerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_end_of_stream(mut self, policy: EndOfStream) -> Self {
        self.end_of_stream = policy;
        self
    }
}
