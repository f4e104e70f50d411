//! Error types.
//!
//! Tokenizing never fails. Errors only arise at the edges: writing rendered
//! output and parsing configuration values.

use thiserror::Error;

/// Error reported by a writer-backed renderer when it is finished.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write rendered output: {0}")]
    Io(#[from] std::io::Error),
}

/// Unrecognized end-of-stream policy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown end-of-stream policy `{0}` (expected `flush` or `discard`)")]
pub struct UnknownPolicy(pub String);
