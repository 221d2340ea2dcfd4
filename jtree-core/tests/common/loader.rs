//! Fixture loading from YAML files

use serde::Deserialize;

use std::path::Path;

/// A single test case from a fixture file
///
/// Exactly one of `output` (the compact serialization of the parsed tree)
/// or `error` (the `ParseErrorCode` variant name) is set.
#[derive(Debug, Clone, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub desc: String,
    pub json: String,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl TestCase {
    /// The expected outcome as a single comparable line
    pub fn expected(&self) -> String {
        match (&self.output, &self.error) {
            (Some(output), None) => format!("Ok {output}"),
            (None, Some(code)) => format!("Err {code}"),
            _ => panic!("fixture {} must set exactly one of output/error", self.id),
        }
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
    fn test_load_literals() {
        let cases = load_fixtures_by_name("literals");
        assert!(!cases.is_empty());
        assert!(cases.iter().any(|c| c.id == "null_literal"));
    }
}
