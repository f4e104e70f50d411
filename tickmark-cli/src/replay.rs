//! Chunked delivery.
//!
//! Splits a document into random-sized chunks, the way a model stream
//! arrives, and feeds them to a tokenizer one at a time.

use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tickmark_core::{Sink, Tokenizer};
use tracing::{debug, trace};

/// Seeded splitter producing chunks of `min..=max` characters.
#[derive(Debug)]
pub struct Chunker {
    rng: StdRng,
    min: usize,
    max: usize,
}

impl Chunker {
    /// `min` must be at least 1 and no larger than `max`.
    pub fn new(seed: u64, min: usize, max: usize) -> Self {
        debug_assert!(min >= 1 && min <= max);
        Self {
            rng: StdRng::seed_from_u64(seed),
            min,
            max,
        }
    }

    /// Split on char boundaries. The final chunk may be shorter than `min`.
    pub fn split<'a>(&mut self, text: &'a str) -> Vec<&'a str> {
        let mut chunks = Vec::new();
        let mut rest = text;
        while !rest.is_empty() {
            let take = self.rng.gen_range(self.min..=self.max);
            let end = rest
                .char_indices()
                .nth(take)
                .map(|(idx, _)| idx)
                .unwrap_or(rest.len());
            let (chunk, tail) = rest.split_at(end);
            chunks.push(chunk);
            rest = tail;
        }
        chunks
    }
}

/// Feed `chunks` to `tokenizer`, calling `after_chunk` after each one and
/// pausing `delay` in between, then finish the stream.
pub fn deliver<S, F>(
    tokenizer: &mut Tokenizer,
    chunks: &[&str],
    delay: Duration,
    sink: &mut S,
    mut after_chunk: F,
) where
    S: Sink + ?Sized,
    F: FnMut(&mut S),
{
    debug!(chunks = chunks.len(), ?delay, "delivering");
    for (index, chunk) in chunks.iter().enumerate() {
        trace!(index, chunk, "chunk");
        tokenizer.push_chunk(chunk, sink);
        after_chunk(sink);
        if !delay.is_zero() && index + 1 < chunks.len() {
            thread::sleep(delay);
        }
    }
    tokenizer.finish(sink);
}
