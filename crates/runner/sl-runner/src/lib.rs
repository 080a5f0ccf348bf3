//! Client for the loopback test-execution service
//!
//! The service compiles a generated class together with a standard library,
//! invokes one static method and returns what it printed. It listens on
//! loopback only and checks that the `Host` header names `127.0.0.1`.

mod client;
mod error;

pub use client::{DEFAULT_BASE_URL, RunnerClient};
pub use error::{Result, RunnerError};

use serde::{Deserialize, Serialize};

/// Method invoked when none is named
pub const DEFAULT_METHOD: &str = "main";

/// Source to compile and the entry point to run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    /// Source of the class under test
    pub code: String,
    /// Standard library source: shared imports, then one class per
    /// `\nclass ` section
    pub stdlib_code: String,
    /// Class to load after compilation
    pub class_name: String,
    /// Static method taking a string array
    pub method_name: String,
}

impl RunRequest {
    /// Request running [`DEFAULT_METHOD`] of `class_name`
    #[must_use]
    pub fn new(code: impl Into<String>, stdlib_code: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            stdlib_code: stdlib_code.into(),
            class_name: class_name.into(),
            method_name: DEFAULT_METHOD.to_string(),
        }
    }

    /// Run `method_name` instead
    #[must_use]
    pub fn with_method(mut self, method_name: impl Into<String>) -> Self {
        self.method_name = method_name.into();
        self
    }
}

/// Raw service response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResponse {
    /// Milliseconds spent compiling and running; zero on failure
    #[serde(default)]
    pub elapsed_ms: u64,
    /// Compiler output or stack trace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception_text: Option<String>,
    /// Captured standard output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

/// Interpreted [`RunResponse`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The method ran to completion
    Passed {
        /// Captured standard output
        output: String,
        /// Milliseconds spent compiling and running
        elapsed_ms: u64,
    },
    /// Compilation failed or the method threw
    Failed {
        /// Compiler output or stack trace
        exception: String,
    },
}

impl RunResponse {
    /// Interpret the response
    ///
    /// Exception text wins over a result; a response with neither counts as
    /// a run that printed nothing.
    #[must_use]
    pub fn outcome(&self) -> RunOutcome {
        match &self.exception_text {
            Some(exception) => RunOutcome::Failed {
                exception: exception.clone(),
            },
            None => RunOutcome::Passed {
                output: self.result.clone().unwrap_or_default(),
                elapsed_ms: self.elapsed_ms,
            },
        }
    }
}
