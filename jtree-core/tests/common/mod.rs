//! Test infrastructure for the jtree parser
//!
//! Provides fixture loading, stochastic test generation, and assertion helpers.

#![allow(dead_code)]

mod loader;
mod harness;
mod generators;

pub use loader::{TestCase, load_fixtures_by_name};
pub use harness::{run_test, run_with_variations, TestResult};
pub use generators::Gen;
