//! Test harness for running tests with stochastic variations

use crate::common::{Gen, TestCase};
use jtree_core::{parse, to_string};

/// Result of running a test
#[derive(Debug)]
pub struct TestResult {
    pub passed: bool,
    pub input: String,
    pub expected: String,
    pub actual: String,
    pub seed: u64,
    pub errors: Vec<String>,
}

/// Parse and render the outcome the way fixtures spell it
fn outcome(input: &str) -> String {
    match parse(input) {
        Ok(value) => format!("Ok {}", to_string(&value)),
        Err(err) => format!("Err {:?}", err.code),
    }
}

fn check(input: String, expected: String, seed: u64) -> TestResult {
    let actual = outcome(&input);
    let mut errors = Vec::new();

    if actual != expected {
        errors.push(format!("expected '{}', got '{}'", expected, actual));
    }

    // Serialized output must parse back to the same text
    if let Some(output) = actual.strip_prefix("Ok ") {
        let again = outcome(output);
        if again != actual {
            errors.push(format!("not idempotent: '{}' reparsed as '{}'", output, again));
        }
    }

    TestResult {
        passed: errors.is_empty(),
        input,
        expected,
        actual,
        seed,
        errors,
    }
}

/// Run a single test case (canonical, no variations)
pub fn run_test(case: &TestCase) -> TestResult {
    check(case.json.clone(), case.expected(), 0)
}

/// Run test with stochastic variations
///
/// Applies independent variations that never change the parsed tree:
/// - 40% chance of comments and blank lines above
/// - Whitespace or a line comment after structural characters
/// - 40% chance of trailing whitespace and comments below
///
/// Error cases only get the leading variation, since anything appended
/// could complete or extend the broken input.
pub fn run_with_variations(case: &TestCase, gen: &mut Gen) -> TestResult {
    let mut input = String::new();

    if gen.chance(0.4) {
        input.push_str(&gen.comment_lines());
        input.push_str(&gen.blank_lines());
    }

    if case.error.is_some() {
        input.push_str(&case.json);
    } else {
        input.push_str(&pad_structure(&case.json, gen));
        if gen.chance(0.4) {
            input.push_str(&gen.whitespace());
            input.push('\n');
            input.push_str(&gen.comment_lines());
        }
    }

    check(input, case.expected(), gen.seed)
}

/// Copy `json`, inserting insignificant text after `,` `:` `[` `{` that
/// sit outside strings and comments.
fn pad_structure(json: &str, gen: &mut Gen) -> String {
    let mut out = String::with_capacity(json.len() * 2);
    let mut in_string = false;
    let mut in_comment = false;
    let mut backslashes = 0;
    let mut prev = '\0';

    for c in json.chars() {
        out.push(c);

        if in_comment {
            in_comment = c != '\n';
        } else if in_string {
            if c == '"' && backslashes % 2 == 0 {
                in_string = false;
            }
            backslashes = if c == '\\' { backslashes + 1 } else { 0 };
        } else {
            match c {
                '"' => {
                    in_string = true;
                    backslashes = 0;
                }
                '/' if prev == '/' => in_comment = true,
                ',' | ':' | '[' | '{' => {
                    if gen.chance(0.3) {
                        out.push_str(&gen.whitespace());
                    }
                    if gen.chance(0.1) {
                        out.push_str(&gen.comment());
                    }
                }
                _ => {}
            }
        }
        prev = c;
    }
    out
}

impl TestResult {
    /// Print detailed failure info
    pub fn print_failure(&self, case_id: &str) {
        eprintln!("\n=== FAILED: {} ===", case_id);
        eprintln!("Seed: {} (set JTREE_TEST_SEED={} to reproduce)", self.seed, self.seed);
        eprintln!("\nInput:");
        eprintln!("{}", self.input);
        eprintln!("\nExpected: {}", self.expected);
        eprintln!("Actual:   {}", self.actual);
        eprintln!("\nErrors:");
        for e in &self.errors {
            eprintln!("  - {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_skips_strings_and_comments() {
        let mut gen = Gen::new(7);
        for _ in 0..50 {
            let padded = pad_structure("{\"a,b\\\":[\": [1, // x,y\n 2]}", &mut gen);
            assert!(padded.contains("\"a,b\\\":[\""));
            assert!(padded.contains("// x,y\n"));
            assert_eq!(outcome(&padded), "Ok {\"a,b\\\":[\":[1,2]}");
        }
    }
}
