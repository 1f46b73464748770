//! Command-line surface
//!
//! Five positional values form the row; the sixth selects the destination
//! log. Anything after the sixth is ignored.
//!
//! Options must come before the values. Once the first value is seen every
//! remaining token is taken verbatim, so row values such as `-h` or `-inf`
//! are never read as flags. Help and version are long-only (`--help`,
//! `--version`); a leading `--` forces even the first value to be literal.

use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::core::types::{Destination, Row, ROW_FIELDS};
use crate::storage::RowLog;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Positional values required on the command line
pub const REQUIRED_ARGS: usize = ROW_FIELDS + 1;

/// Build the command-line parser
pub fn command() -> Command {
    Command::new("throughput-log")
        .version(crate::VERSION)
        .about("Append one benchmark result row to the cuda or cpu throughput log.")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .action(ArgAction::Help)
                .help("Print help")
        )
        .arg(
            Arg::new("version")
                .long("version")
                .action(ArgAction::Version)
                .help("Print version")
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Configuration file path")
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding the throughput logs")
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (trace, debug, info, warn, error)")
        )
        .arg(
            Arg::new("values")
                .value_name("VALUE")
                .num_args(1..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .value_parser(value_parser!(OsString))
                .help("Five row values followed by the destination (cuda or cpu)")
        )
}

/// A parsed request: which row goes to which log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Values to append
    pub row: Row,
    /// Log receiving the row
    pub destination: Destination,
}

impl Invocation {
    /// Build an invocation from raw positional values
    pub fn from_args<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let values: Vec<S> = values.into_iter().collect();
        if values.len() < REQUIRED_ARGS {
            return Err(Error::Arity {
                expected: REQUIRED_ARGS,
                actual: values.len(),
            });
        }
        if values.len() > REQUIRED_ARGS {
            warn!(ignored = values.len() - REQUIRED_ARGS, "Ignoring extra arguments after the destination");
        }

        let destination = text_at(&values, REQUIRED_ARGS)?.parse::<Destination>()?;
        let fields = (1..=ROW_FIELDS)
            .map(|position| text_at(&values, position).map(str::to_owned))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            row: Row::from(fields),
            destination,
        })
    }

    /// Build an invocation from parsed command-line matches
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let values: Vec<&OsString> = matches
            .get_many::<OsString>("values")
            .map(|values| values.collect())
            .unwrap_or_default();

        Self::from_args(values)
    }
}

/// UTF-8 text of the 1-indexed positional value
fn text_at<S: AsRef<OsStr>>(values: &[S], position: usize) -> Result<&str> {
    values[position - 1]
        .as_ref()
        .to_str()
        .ok_or(Error::Encoding { position })
}

/// Apply command line argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, matches: &ArgMatches) -> Result<()> {
    if let Some(dir) = matches.get_one::<PathBuf>("output-dir") {
        config.output.dir = dir.clone();
    }

    if let Some(level) = matches.get_one::<String>("log-level") {
        config.logging.level = level.clone();
    }

    config.validate()
}

/// Append the invocation's row to its destination log, returning the path written
pub fn execute(config: &Config, invocation: &Invocation) -> Result<PathBuf> {
    let path = config.log_path(invocation.destination);
    debug!(destination = %invocation.destination, path = %path.display(), "Resolved destination");

    RowLog::new(&path)
        .with_fsync(config.output.fsync)
        .append(&invocation.row)?;

    Ok(path)
}
