//! Stochastic generators for chunking and input
//!
//! Uses seeded RNG for reproducibility. Print seed on failure for replay.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded generator for reproducible stochastic tests
pub struct Gen {
    pub rng: StdRng,
    pub seed: u64,
}

impl Gen {
    /// Create with specific seed (for reproduction)
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create from environment or random seed
    pub fn from_env_or_random() -> Self {
        let seed = std::env::var("TICKMARK_TEST_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(rand::random);
        Self::new(seed)
    }

    /// Geometric distribution: count until rand > alpha
    pub fn geometric(&mut self, alpha: f64) -> usize {
        let mut n = 0;
        while self.rng.gen::<f64>() < alpha {
            n += 1;
        }
        n
    }

    /// Poisson-like count (simplified)
    pub fn poisson(&mut self, lambda: f64) -> usize {
        let l = (-lambda).exp();
        let mut k = 0;
        let mut p = 1.0;
        loop {
            k += 1;
            p *= self.rng.gen::<f64>();
            if p <= l {
                break;
            }
        }
        k - 1
    }

    /// Random boolean with probability p
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    /// Split text into chunks of `min..=max` chars, like a model emitting
    /// tokens of uneven length. Empty chunks are occasionally injected.
    pub fn split<'a>(&mut self, text: &'a str, min: usize, max: usize) -> Vec<&'a str> {
        let mut chunks = Vec::new();
        let mut rest = text;
        while !rest.is_empty() {
            if self.chance(0.05) {
                chunks.push("");
            }
            let take = self.rng.gen_range(min..=max);
            let end = rest
                .char_indices()
                .nth(take)
                .map(|(idx, _)| idx)
                .unwrap_or(rest.len());
            chunks.push(&rest[..end]);
            rest = &rest[end..];
        }
        chunks
    }

    /// Split bytes at arbitrary positions, ignoring char boundaries.
    pub fn split_bytes<'a>(&mut self, bytes: &'a [u8], max: usize) -> Vec<&'a [u8]> {
        let mut chunks = Vec::new();
        let mut rest = bytes;
        while !rest.is_empty() {
            let take = self.rng.gen_range(1..=max).min(rest.len());
            let (head, tail) = rest.split_at(take);
            chunks.push(head);
            rest = tail;
        }
        chunks
    }

    /// Random text dense in backtick runs, newlines, and multi-byte chars.
    pub fn markdown_fragment(&mut self) -> String {
        const PIECES: &[&str] = &[
            "`", "``", "```", "````", "a", "word ", "\n", "fn main() {}", "é", "🦀", " ", "x",
        ];
        let len = 1 + self.geometric(0.95);
        let mut out = String::new();
        for _ in 0..len {
            out.push_str(PIECES[self.rng.gen_range(0..PIECES.len())]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproducibility() {
        let mut g1 = Gen::new(42);
        let mut g2 = Gen::new(42);

        for _ in 0..10 {
            assert_eq!(g1.markdown_fragment(), g2.markdown_fragment());
            assert_eq!(g1.geometric(0.9), g2.geometric(0.9));
        }
    }

    #[test]
    fn test_split_preserves_text() {
        let mut gen = Gen::new(7);
        let text = "a🦀b`c``é";
        for _ in 0..50 {
            let chunks = gen.split(text, 1, 3);
            assert_eq!(chunks.concat(), text);
        }
    }
}
