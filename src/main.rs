//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `netstat_redlist` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output and exit codes
//!
//! All core functionality is implemented in the library crate.

use std::process;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use netstat_redlist::initialization::init_logger_with;
use netstat_redlist::{run_triage, Config, ConsoleProgress, Opt, TriageError};

/// Exit status for usage problems, matching what clap uses for bad arguments.
const EXIT_USAGE: i32 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config (clap exits 2 on bad usage)
    let config: Config = Opt::parse().into();

    // Initialize logger based on config
    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    if !config.input.exists() {
        exit_input_not_found(TriageError::InputNotFound(config.input));
    }

    let start_time = Instant::now();
    let home_country = config.home_country.clone();
    println!("Processing....please wait.");

    match run_triage(config, Arc::new(ConsoleProgress)).await {
        Ok(report) => {
            report.redlist.print_report(&home_country);
            println!();
            println!(
                "Total query execution time: {:.2}s",
                start_time.elapsed().as_secs_f64()
            );
            println!("Complete.");
            Ok(())
        }
        Err(e @ TriageError::InputNotFound(_)) => exit_input_not_found(e),
        Err(e) => {
            eprintln!("netstat_redlist error: {:#}", anyhow::Error::new(e));
            process::exit(1);
        }
    }
}

/// Reports a missing connection listing with a usage hint and exits 2.
fn exit_input_not_found(e: TriageError) -> ! {
    eprintln!("{e}");
    eprintln!("Usage: netstat_redlist -i <INPUT> -o <OUTPUT> (see --help)");
    process::exit(EXIT_USAGE);
}
