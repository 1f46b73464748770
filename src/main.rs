//! Throughput Log
//!
//! Appends one benchmark result row to `mps_throughput_cuda.csv` or
//! `mps_throughput_cpu.csv`, selected by the sixth positional argument.

use anyhow::Context;
use std::path::PathBuf;
use std::process::ExitCode;
use throughput_log::cli::{self, Invocation};
use throughput_log::{Config, Error};
use tracing::{debug, info};

fn main() -> ExitCode {
    // Parse command line arguments
    let matches = cli::command().get_matches();

    match run(&matches) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {:#}", throughput_log::NAME, err);
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Exit code for a failed run; untyped failures count as runtime errors
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<Error>().map(Error::exit_code).unwrap_or(1)
}

/// Load configuration and append the requested row, returning the path written
fn run(matches: &clap::ArgMatches) -> anyhow::Result<PathBuf> {
    // Load configuration
    let config_path = matches.get_one::<PathBuf>("config");
    let mut config = Config::load(config_path.map(PathBuf::as_path))?;

    // Apply CLI overrides
    cli::apply_cli_overrides(&mut config, matches)?;

    // Initialize logging
    throughput_log::init_logging(&config.logging.level);
    if let Some(source) = &config.source {
        debug!(path = %source.display(), "Loaded configuration file");
    }

    let invocation = Invocation::from_matches(matches)?;
    let target = config.log_path(invocation.destination);

    let path = cli::execute(&config, &invocation)
        .with_context(|| format!("failed to append row to {}", target.display()))?;

    info!("Recorded {} row in {}", invocation.destination, path.display());
    Ok(path)
}
