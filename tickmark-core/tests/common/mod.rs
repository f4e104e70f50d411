//! Test infrastructure for the tickmark tokenizer
//!
//! Provides fixture loading, stochastic chunking, and assertion helpers.

#![allow(dead_code)]

mod generators;
mod harness;
mod loader;

pub use generators::Gen;
pub use harness::{format_segments, run_test, run_with_chunking, run_every_split, tokenize_bytes};
pub use loader::{load_fixtures_by_name, TestCase};
