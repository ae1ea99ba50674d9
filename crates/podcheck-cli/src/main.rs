//! # podcheck CLI entry point
//!
//! Parses command-line arguments, sets up logging, and runs the validate
//! command. Usage errors exit with 1 like every other failure.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use podcheck_cli::validate::{run_validate, ValidateArgs};

/// podcheck — Pod manifest validator
///
/// Checks a Pod manifest against the supported schema and lists every
/// violation with its file and line.
#[derive(Parser, Debug)]
#[command(name = "podcheck", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    validate: ValidateArgs,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(path = %cli.validate.path.display(), "podcheck starting");

    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    match run_validate(&cli.validate, &mut out) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
