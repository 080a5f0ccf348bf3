//! Terminal output for diagnostics and failures

use colored::Colorize;
use sl_driver::FileError;
use sl_lower::Diagnostic;
use std::path::Path;

/// Print non-fatal diagnostics of one file to stderr
pub fn print_diagnostics(path: &Path, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!(
            "{}[{}]: {}",
            "warning".yellow().bold(),
            diagnostic.kind.code(),
            diagnostic.message
        );
        match diagnostic.source {
            Some(source) => eprintln!("  {} {}@{}", "-->".blue().bold(), path.display(), source.span),
            None => eprintln!("  {} {}", "-->".blue().bold(), path.display()),
        }
    }
}

/// Print why a file produced no schema
///
/// Lowering errors go through miette so their code and help text show.
pub fn print_file_error(path: &Path, error: &FileError) {
    match error {
        FileError::Load(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
        }
        FileError::Lower(error) => {
            let report = miette::Report::new(error.clone()).wrap_err(format!("Failed to lower {}", path.display()));
            eprintln!("{report:?}");
        }
    }
}

/// One-line summary after a command
pub fn print_summary(files: usize, failed: usize, diagnostics: usize) {
    let status = if failed > 0 {
        "Failed:".red().bold()
    } else if diagnostics > 0 {
        "Finished:".yellow().bold()
    } else {
        "Finished:".green().bold()
    };
    eprintln!("{status} {files} file(s), {failed} failed, {diagnostics} diagnostic(s)");
}
