//! Fixture loading from YAML files

use serde::Deserialize;
use std::path::Path;

/// A single test case from a fixture file
#[derive(Debug, Clone, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub desc: String,
    pub input: String,
    /// Expected segments as `[style, text]` pairs, after `finish`
    pub segments: Vec<ExpectedSegment>,
}

/// Expected segment: `[style, text]`
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedSegment(pub String, pub String);

impl ExpectedSegment {
    pub fn style(&self) -> &str {
        &self.0
    }

    pub fn text(&self) -> &str {
        &self.1
    }
}

/// Load all test cases from a YAML fixture file
pub fn load_fixtures(path: &Path) -> Vec<TestCase> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read fixture file {:?}: {}", path, e));
    serde_yaml::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture file {:?}: {}", path, e))
}

/// Load fixtures from the standard fixtures directory
pub fn load_fixtures_by_name(name: &str) -> Vec<TestCase> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}.yaml", name));
    load_fixtures(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_inline() {
        let cases = load_fixtures_by_name("inline");
        assert!(!cases.is_empty());
        assert!(cases.iter().any(|c| c.id == "inline_simple"));
    }
}
