//! Integration test utilities for the lowering pipeline
//!
//! Fixtures are JSON syntax trees under `fixtures/`. A [`LoweringCase`]
//! lowers one of them through the driver and checks the outcome against an
//! [`ExpectedResult`].

use anyhow::Result;
use sl_driver::LoweredFile;
use sl_lower::{DiagnosticKind, LowerError};
use sl_syntax::SourceFile;
use std::path::PathBuf;

/// Directory holding the JSON fixtures
#[must_use]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Path of one fixture
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Load a fixture tree
///
/// # Errors
///
/// Returns an error if the fixture cannot be read or parsed
pub fn load_fixture(name: &str) -> Result<SourceFile> {
    sl_driver::load_source_file(fixture_path(name))
}

/// Result of running a lowering case
#[derive(Debug)]
pub enum TestResult {
    /// Test passed successfully
    Pass,
    /// Test failed with a reason
    Fail {
        /// Why the case failed
        reason: String,
    },
}

/// Expected outcome of lowering a fixture
#[derive(Debug, Clone)]
pub enum ExpectedResult {
    /// Lowering succeeds without diagnostics
    Clean,
    /// Lowering succeeds with exactly these diagnostic kinds, in report order
    Diagnostics { kinds: Vec<DiagnosticKind> },
    /// Lowering stops with an error whose message contains `pattern`
    Fatal { pattern: String },
}

/// One fixture and its expected outcome
#[derive(Debug, Clone)]
pub struct LoweringCase {
    /// Fixture file name
    pub fixture: String,
    /// Expected outcome
    pub expected: ExpectedResult,
}

impl LoweringCase {
    /// Expect `fixture` to lower cleanly
    #[must_use]
    pub fn new(fixture: impl Into<String>) -> Self {
        Self {
            fixture: fixture.into(),
            expected: ExpectedResult::Clean,
        }
    }

    /// Expect these diagnostic kinds instead
    #[must_use]
    pub fn expect_diagnostics(mut self, kinds: Vec<DiagnosticKind>) -> Self {
        self.expected = ExpectedResult::Diagnostics { kinds };
        self
    }

    /// Expect a fatal error mentioning `pattern` instead
    #[must_use]
    pub fn expect_fatal(mut self, pattern: impl Into<String>) -> Self {
        self.expected = ExpectedResult::Fatal {
            pattern: pattern.into(),
        };
        self
    }

    /// Lower the fixture, returning the raw outcome
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture cannot be loaded
    pub fn lower(&self) -> Result<Result<LoweredFile, LowerError>> {
        let file = load_fixture(&self.fixture)?;
        Ok(sl_driver::lower_file(&file))
    }

    /// Lower the fixture and compare with the expectation
    #[must_use]
    pub fn run(&self) -> TestResult {
        let outcome = match self.lower() {
            Ok(outcome) => outcome,
            Err(error) => {
                return TestResult::Fail {
                    reason: format!("Failed to load fixture {}: {error:#}", self.fixture),
                };
            }
        };

        match (&self.expected, outcome) {
            (ExpectedResult::Clean, Ok(lowered)) if !lowered.has_diagnostics() => TestResult::Pass,
            (ExpectedResult::Diagnostics { kinds }, Ok(lowered)) => {
                let actual: Vec<DiagnosticKind> = lowered.diagnostics.iter().map(|diagnostic| diagnostic.kind).collect();
                if &actual == kinds {
                    TestResult::Pass
                } else {
                    TestResult::Fail {
                        reason: format!("Expected diagnostics {kinds:?}, got {actual:?}"),
                    }
                }
            }
            (ExpectedResult::Fatal { pattern }, Err(error)) => {
                let message = error.to_string();
                if message.contains(pattern.as_str()) {
                    TestResult::Pass
                } else {
                    TestResult::Fail {
                        reason: format!("Error `{message}` does not mention `{pattern}`"),
                    }
                }
            }
            (expected, Ok(lowered)) => TestResult::Fail {
                reason: format!(
                    "Expected {expected:?}, but lowering succeeded with diagnostics {:?}",
                    lowered.diagnostics
                ),
            },
            (expected, Err(error)) => TestResult::Fail {
                reason: format!("Expected {expected:?}, but lowering failed: {error}"),
            },
        }
    }
}
