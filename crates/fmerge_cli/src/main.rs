//! fmerge CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Input format error (transformer config or resource stream)
//! - 4: Merge failure (target without extension, empty content)

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use fmerge_core::CoreError;
use fmerge_resource::ResourceError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::Cli;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const INPUT_FORMAT: u8 = 3;
    pub const MERGE_FAILURE: u8 = 4;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // stdout carries the resource stream, so logs go to stderr
    let default_filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "warn,fmerge=debug"
    } else {
        "warn,fmerge=info"
    };
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let descriptors = cli.merge.descriptors();
    if descriptors.is_empty() {
        Cli::command()
            .error(ErrorKind::MissingRequiredArgument, "at least one merge target is required")
            .exit();
    }

    match commands::merge::execute(cli.merge, &descriptors) {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if let Some(err) = cause.downcast_ref::<ResourceError>() {
            if err.is_contract_violation() {
                return ExitCodes::MERGE_FAILURE;
            }
            if err.is_input_format() {
                return ExitCodes::INPUT_FORMAT;
            }
        }
        if cause.downcast_ref::<CoreError>().is_some() {
            return ExitCodes::MERGE_FAILURE;
        }
    }
    ExitCodes::GENERAL_ERROR
}
