//! Test harness for running fixtures whole and under re-chunking

use crate::common::{Gen, TestCase};
use tickmark_core::{Segment, SegmentLog, Tokenizer};

/// Result of running a test
#[derive(Debug)]
pub struct TestResult {
    pub passed: bool,
    pub input: String,
    pub chunks: Vec<String>,
    pub expected: Vec<String>,
    pub actual: Vec<String>,
    pub seed: u64,
    pub errors: Vec<String>,
}

/// Format segments for comparison
pub fn format_segments(segments: &[Segment]) -> Vec<String> {
    segments
        .iter()
        .map(|s| format!("{} {:?}", s.style, s.text))
        .collect()
}

fn expected_of(case: &TestCase) -> Vec<String> {
    case.segments
        .iter()
        .map(|e| format!("{} {:?}", e.style(), e.text()))
        .collect()
}

/// Tokenize string chunks with default options
fn tokenize_str_chunks(chunks: &[&str]) -> Vec<Segment> {
    tickmark_core::tokenize_chunks(chunks.iter().copied())
}

/// Tokenize byte chunks with default options
pub fn tokenize_bytes(chunks: &[&[u8]]) -> Vec<Segment> {
    let mut tokenizer = Tokenizer::new();
    let mut log = SegmentLog::new();
    for chunk in chunks {
        tokenizer.push_bytes(chunk, &mut log);
    }
    tokenizer.finish(&mut log);
    log.into_segments()
}

fn compare(expected: &[String], actual: &[String]) -> Vec<String> {
    let mut errors = Vec::new();

    if actual.len() != expected.len() {
        errors.push(format!(
            "Segment count mismatch: expected {}, got {}",
            expected.len(),
            actual.len()
        ));
    }

    for (i, (act, exp)) in actual.iter().zip(expected.iter()).enumerate() {
        if act != exp {
            errors.push(format!("Segment {}: expected '{}', got '{}'", i, exp, act));
        }
    }

    errors
}

/// Run a single test case as one chunk
pub fn run_test(case: &TestCase) -> TestResult {
    let actual = format_segments(&tickmark_core::tokenize(&case.input));
    let expected = expected_of(case);
    let errors = compare(&expected, &actual);

    TestResult {
        passed: errors.is_empty(),
        input: case.input.clone(),
        chunks: vec![case.input.clone()],
        expected,
        actual,
        seed: 0,
        errors,
    }
}

/// Run a test case with every two-way split point, char by char, and
/// byte by byte. Stops at the first mismatch.
pub fn run_every_split(case: &TestCase) -> TestResult {
    let expected = expected_of(case);
    let input = case.input.as_str();

    let mut attempts: Vec<(Vec<String>, Vec<String>)> = Vec::new();

    for (idx, _) in input.char_indices().skip(1) {
        let chunks = [&input[..idx], &input[idx..]];
        attempts.push((
            chunks.iter().map(|c| c.to_string()).collect(),
            format_segments(&tokenize_str_chunks(&chunks)),
        ));
    }

    let chars: Vec<String> = input.chars().map(String::from).collect();
    let char_refs: Vec<&str> = chars.iter().map(String::as_str).collect();
    attempts.push((chars.clone(), format_segments(&tokenize_str_chunks(&char_refs))));

    let bytes: Vec<&[u8]> = input.as_bytes().chunks(1).collect();
    attempts.push((
        bytes.iter().map(|b| format!("{:?}", b)).collect(),
        format_segments(&tokenize_bytes(&bytes)),
    ));

    for (chunks, actual) in attempts {
        let errors = compare(&expected, &actual);
        if !errors.is_empty() {
            return TestResult {
                passed: false,
                input: case.input.clone(),
                chunks,
                expected,
                actual,
                seed: 0,
                errors,
            };
        }
    }

    TestResult {
        passed: true,
        input: case.input.clone(),
        chunks: Vec::new(),
        expected: expected.clone(),
        actual: expected,
        seed: 0,
        errors: Vec::new(),
    }
}

/// Run a test case under random chunking (2..=19 chars, as a token stream
/// would deliver it) and random byte chunking.
pub fn run_with_chunking(case: &TestCase, gen: &mut Gen) -> TestResult {
    let expected = expected_of(case);

    let chunks = gen.split(&case.input, 2, 19);
    let actual = format_segments(&tokenize_str_chunks(&chunks));
    let mut errors = compare(&expected, &actual);

    let byte_chunks = gen.split_bytes(case.input.as_bytes(), 5);
    let byte_actual = format_segments(&tokenize_bytes(&byte_chunks));
    for err in compare(&expected, &byte_actual) {
        errors.push(format!("(bytes) {}", err));
    }

    TestResult {
        passed: errors.is_empty(),
        input: case.input.clone(),
        chunks: chunks.iter().map(|c| c.to_string()).collect(),
        expected,
        actual,
        seed: gen.seed,
        errors,
    }
}

impl TestResult {
    /// Print detailed failure info
    pub fn print_failure(&self, case_id: &str) {
        eprintln!("\n=== FAILED: {} ===", case_id);
        eprintln!("Seed: {} (set TICKMARK_TEST_SEED={} to reproduce)", self.seed, self.seed);
        eprintln!("\nInput: {:?}", self.input);
        eprintln!("Chunks: {:?}", self.chunks);
        eprintln!("\nExpected segments:");
        for (i, e) in self.expected.iter().enumerate() {
            eprintln!("  {}: {}", i, e);
        }
        eprintln!("\nActual segments:");
        for (i, e) in self.actual.iter().enumerate() {
            eprintln!("  {}: {}", i, e);
        }
        eprintln!("\nErrors:");
        for e in &self.errors {
            eprintln!("  - {}", e);
        }
    }
}
