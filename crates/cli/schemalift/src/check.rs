//! Check command implementation

use crate::report::{print_diagnostics, print_file_error, print_summary};
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use sl_driver::FileOutcome;
use sl_lower::Diagnostic;
use std::path::PathBuf;

/// Per-file result in JSON output
#[derive(Debug, Serialize)]
struct FileReport<'a> {
    path: String,
    diagnostics: &'a [Diagnostic],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a FileOutcome> for FileReport<'a> {
    fn from(outcome: &'a FileOutcome) -> Self {
        let (diagnostics, error) = match &outcome.result {
            Ok(file) => (file.diagnostics.as_slice(), None),
            Err(error) => (&[][..], Some(format!("{error:#}"))),
        };
        Self {
            path: outcome.path.display().to_string(),
            diagnostics,
            error,
        }
    }
}

/// Lower `paths` without writing schemas, reporting diagnostics only
///
/// Returns whether every file lowered without a fatal error.
pub fn run_check(paths: &[PathBuf], format: &str, parallel: bool) -> Result<bool> {
    if !matches!(format, "text" | "json") {
        anyhow::bail!("Unknown report format `{format}` (expected `text` or `json`)");
    }
    if format == "text" {
        eprintln!("{} {} file(s)", "Checking".green().bold(), paths.len());
    }

    let outcomes = sl_driver::lower_paths(paths, parallel);
    let failed = outcomes.iter().filter(|outcome| outcome.result.is_err()).count();

    if format == "json" {
        let reports: Vec<FileReport<'_>> = outcomes.iter().map(FileReport::from).collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(failed == 0);
    }

    let mut diagnostics = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(file) if file.has_diagnostics() => {
                print_diagnostics(&outcome.path, &file.diagnostics);
                diagnostics += file.diagnostics.len();
            }
            Ok(_) => eprintln!("  {} {}", "ok".green(), outcome.path.display()),
            Err(error) => print_file_error(&outcome.path, error),
        }
    }
    print_summary(outcomes.len(), failed, diagnostics);

    Ok(failed == 0)
}
