//! SchemaLift CLI
//!
//! Lowers resolved syntax trees of class-based source files into
//! language-neutral schemas and talks to the test-execution service.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crate::config::Config;
use sl_driver::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Once;
use std::time::Duration;

mod check;
mod config;
mod exec;
mod lower;
mod report;

#[derive(Parser)]
#[command(name = "schemalift")]
#[command(about = "Lower resolved syntax trees to language-neutral schemas", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./schemalift.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lower syntax trees and write their schemas
    Lower {
        /// JSON syntax tree files
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output format (json or pretty)
        #[arg(long)]
        format: Option<String>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail when any diagnostic is reported
        #[arg(long)]
        deny_warnings: bool,
    },

    /// Report diagnostics without writing schemas
    Check {
        /// JSON syntax tree files
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Report format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Compile and run a class on the test-execution service
    Exec {
        /// Source of the class under test
        #[arg(long)]
        code: PathBuf,

        /// Standard library source
        #[arg(long)]
        stdlib: Option<PathBuf>,

        /// Class to load
        #[arg(long = "class")]
        class_name: String,

        /// Static method to invoke (defaults to main)
        #[arg(long = "method")]
        method_name: Option<String>,

        /// Service base URL
        #[arg(long)]
        url: Option<String>,
    },
}

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber when logging was asked for
///
/// `RUST_LOG` wins; `--verbose` alone selects `debug`.
fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        let filter = match std::env::var("RUST_LOG") {
            Ok(_) => EnvFilter::from_default_env(),
            Err(_) if verbose => EnvFilter::new("debug"),
            Err(_) => return,
        };
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true).with_level(true))
            .with(filter)
            .init();
    });
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let config = Config::load(cli.config.as_deref(), &cwd)?;

    let succeeded = match cli.command {
        Commands::Lower {
            paths,
            format,
            output,
            deny_warnings,
        } => {
            let format = match format {
                Some(format) => format.parse::<OutputFormat>()?,
                None => config.output.format,
            };
            let options = lower::LowerOptions {
                format,
                output,
                deny_warnings: deny_warnings || config.lower.deny_warnings,
                parallel: config.lower.parallel,
            };
            lower::run_lower(&paths, &options)?
        }
        Commands::Check { paths, format } => check::run_check(&paths, &format, config.lower.parallel)?,
        Commands::Exec {
            code,
            stdlib,
            class_name,
            method_name,
            url,
        } => {
            let options = exec::ExecOptions {
                code,
                stdlib,
                class_name,
                method_name,
                url: url.unwrap_or(config.runner.url),
                timeout: Duration::from_millis(config.runner.timeout_ms),
            };
            exec::run_exec(&options)?
        }
    };

    Ok(if succeeded { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
