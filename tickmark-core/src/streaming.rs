//! Byte-level streaming input.
//!
//! Text sources that deliver raw bytes (sockets, pipes, model token
//! streams) do not respect UTF-8 boundaries: a multi-byte character may be
//! split across two chunks. [`Utf8Carry`] reassembles such characters so the
//! tokenizer only ever sees complete `&str` slices.
//!
//! ```text
//! chunk 1: 61 E2 82        chunk 2: AC 62
//!          │  └──┴─ carried ──┘
//!          "a"      "€"              "b"
//! ```
//!
//! Invalid sequences decode to U+FFFD; decoding never fails.

/// Replacement for bytes that are not valid UTF-8.
pub const REPLACEMENT: &str = "\u{FFFD}";

/// Longest possible incomplete UTF-8 prefix.
const MAX_CARRY: usize = 3;

/// Incomplete UTF-8 sequence left over from the previous chunk.
#[derive(Debug, Clone, Default)]
pub struct Utf8Carry {
    /// Carried bytes followed by the next chunk, reused between calls
    scratch: Vec<u8>,
    /// Number of carried bytes at the front of `scratch`
    len: usize,
}

impl Utf8Carry {
    /// Create an empty carry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes waiting for the rest of their character.
    #[inline]
    pub fn pending(&self) -> usize {
        self.len
    }

    /// Check if a partial character is being carried.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Decode `bytes`, calling `on_text` with every complete run of text.
    ///
    /// A trailing incomplete character is kept for the next call.
    pub fn decode<F>(&mut self, bytes: &[u8], mut on_text: F)
    where
        F: FnMut(&str),
    {
        if self.len == 0 {
            let tail = decode_complete(bytes, &mut on_text);
            self.carry(tail);
            return;
        }

        let mut scratch = std::mem::take(&mut self.scratch);
        scratch.truncate(self.len);
        scratch.extend_from_slice(bytes);
        let tail = decode_complete(&scratch, &mut on_text);
        let tail_start = scratch.len() - tail.len();
        scratch.copy_within(tail_start.., 0);
        self.len = scratch.len() - tail_start;
        scratch.truncate(self.len);
        self.scratch = scratch;
    }

    /// Flush a dangling partial character as U+FFFD.
    pub fn finish<F>(&mut self, mut on_text: F)
    where
        F: FnMut(&str),
    {
        if self.len > 0 {
            on_text(REPLACEMENT);
        }
        self.clear();
    }

    /// Drop any carried bytes.
    pub fn clear(&mut self) {
        self.scratch.clear();
        self.len = 0;
    }

    fn carry(&mut self, tail: &[u8]) {
        debug_assert!(tail.len() <= MAX_CARRY);
        self.scratch.clear();
        self.scratch.extend_from_slice(tail);
        self.len = tail.len();
    }
}

/// Decode all complete characters in `input`, returning the incomplete tail.
fn decode_complete<'a, F>(mut input: &'a [u8], on_text: &mut F) -> &'a [u8]
where
    F: FnMut(&str),
{
    loop {
        match std::str::from_utf8(input) {
            Ok(text) => {
                if !text.is_empty() {
                    on_text(text);
                }
                return &[];
            }
            Err(err) => {
                let valid = err.valid_up_to();
                if valid > 0 {
                    // SAFETY: from_utf8 validated input[..valid]
                    on_text(unsafe { std::str::from_utf8_unchecked(&input[..valid]) });
                }
                match err.error_len() {
                    Some(bad) => {
                        on_text(REPLACEMENT);
                        input = &input[valid + bad..];
                    }
                    None => return &input[valid..],
                }
            }
        }
    }
}
