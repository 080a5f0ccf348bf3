//! Lower command implementation

use crate::report::{print_diagnostics, print_file_error, print_summary};
use anyhow::{Context, Result};
use colored::Colorize;
use sl_driver::OutputFormat;
use sl_schema::SchemaFile;
use std::path::{Path, PathBuf};

/// Effective options after merging flags over configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowerOptions {
    /// Output serialization
    pub format: OutputFormat,
    /// Destination file; stdout when absent
    pub output: Option<PathBuf>,
    /// Fail when any diagnostic is reported
    pub deny_warnings: bool,
    /// Lower files in parallel
    pub parallel: bool,
}

/// Lower `paths` and write the schema(s)
///
/// Returns whether every file lowered cleanly enough to write output. With a
/// single input the schema itself is written, with several a JSON object
/// keyed by input path.
pub fn run_lower(paths: &[PathBuf], options: &LowerOptions) -> Result<bool> {
    let outcomes = sl_driver::lower_paths(paths, options.parallel);

    let mut failed = 0;
    let mut diagnostics = 0;
    let mut lowered: Vec<(&Path, &SchemaFile)> = Vec::with_capacity(outcomes.len());

    for outcome in &outcomes {
        match &outcome.result {
            Ok(file) => {
                print_diagnostics(&outcome.path, &file.diagnostics);
                diagnostics += file.diagnostics.len();
                lowered.push((outcome.path.as_path(), &file.schema));
            }
            Err(error) => {
                print_file_error(&outcome.path, error);
                failed += 1;
            }
        }
    }
    print_summary(outcomes.len(), failed, diagnostics);

    if failed > 0 {
        return Ok(false);
    }
    if options.deny_warnings && diagnostics > 0 {
        eprintln!(
            "{} {diagnostics} diagnostic(s) with warnings denied; no output written",
            "error:".red().bold()
        );
        return Ok(false);
    }

    let rendered = match lowered.as_slice() {
        [(_, schema)] => sl_driver::render_schema(schema, options.format)?,
        _ => sl_driver::render_schemas(lowered, options.format)?,
    };
    write_output(options.output.as_deref(), &rendered)?;
    Ok(true)
}

fn write_output(output: Option<&Path>, rendered: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} {}", "Wrote".green().bold(), path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
