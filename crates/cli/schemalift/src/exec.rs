//! Exec command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use sl_runner::{RunOutcome, RunRequest, RunnerClient};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What to send to the test-execution service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOptions {
    /// Source of the class under test
    pub code: PathBuf,
    /// Standard library source
    pub stdlib: Option<PathBuf>,
    /// Class to load
    pub class_name: String,
    /// Method to invoke
    pub method_name: Option<String>,
    /// Service base URL
    pub url: String,
    /// Request timeout
    pub timeout: Duration,
}

/// Build the request from files on disk
pub fn build_request(options: &ExecOptions) -> Result<RunRequest> {
    let code = read_source(&options.code)?;
    let stdlib_code = match &options.stdlib {
        Some(path) => read_source(path)?,
        None => String::new(),
    };

    let request = RunRequest::new(code, stdlib_code, options.class_name.as_str());
    Ok(match &options.method_name {
        Some(method) => request.with_method(method.as_str()),
        None => request,
    })
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Compile and run the class, printing its output
///
/// Returns whether the method ran to completion.
pub fn run_exec(options: &ExecOptions) -> Result<bool> {
    let request = build_request(options)?;
    let client = RunnerClient::new(&options.url, options.timeout)?;

    eprintln!(
        "{} {}.{} via {}",
        "Running".green().bold(),
        request.class_name,
        request.method_name,
        client.endpoint()
    );
    let response = client.run(&request)?;

    match response.outcome() {
        RunOutcome::Passed { output, elapsed_ms } => {
            print!("{output}");
            eprintln!("{} in {elapsed_ms} ms", "Passed".green().bold());
            Ok(true)
        }
        RunOutcome::Failed { exception } => {
            eprintln!("{}\n{exception}", "Failed:".red().bold());
            Ok(false)
        }
    }
}
