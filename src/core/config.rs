//! Configuration management for the throughput log
//!
//! Defaults reproduce the plain behaviour: both logs live in the working
//! directory under their fixed names. A TOML file, `TPL_*` environment
//! variables and CLI flags can override them, in that order.

use crate::core::error::{Error, Result};
use crate::core::types::Destination;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "throughput-log.toml";

/// Default log file for CUDA runs
pub const DEFAULT_CUDA_FILE: &str = "mps_throughput_cuda.csv";

/// Default log file for CPU runs
pub const DEFAULT_CPU_FILE: &str = "mps_throughput_cpu.csv";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output files
    pub output: OutputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// File this configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Where rows are written
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory holding both log files
    pub dir: PathBuf,

    /// File name for `cuda` rows
    pub cuda_file: String,

    /// File name for `cpu` rows
    pub cpu_file: String,

    /// Sync file contents to disk after each append
    pub fsync: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            cuda_file: DEFAULT_CUDA_FILE.to_string(),
            cpu_file: DEFAULT_CPU_FILE.to_string(),
            fsync: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from an optional file plus environment variables.
    ///
    /// An explicit `path` must exist; otherwise [`DEFAULT_CONFIG_FILE`] is
    /// read only if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                debug!(path = DEFAULT_CONFIG_FILE, "Using configuration file from working directory");
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Config::default(),
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config file {}: {}", path.display(), e)))?;

        let mut config = Self::from_toml(&contents)
            .map_err(|e| Error::config(format!("Failed to parse config file {}: {}", path.display(), e)))?;
        config.source = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Apply `TPL_*` environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        // Output overrides
        if let Some(dir) = var("TPL_OUTPUT_DIR") {
            self.output.dir = PathBuf::from(dir);
        }

        if let Some(name) = var("TPL_CUDA_FILE") {
            self.output.cuda_file = name;
        }

        if let Some(name) = var("TPL_CPU_FILE") {
            self.output.cpu_file = name;
        }

        if let Some(fsync) = var("TPL_FSYNC") {
            self.output.fsync = fsync.parse()
                .map_err(|e| Error::config(format!("Invalid TPL_FSYNC value '{}': {}", fsync, e)))?;
        }

        // Logging overrides
        if let Some(level) = var("TPL_LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        for (dest, name) in [
            (Destination::Cuda, &self.output.cuda_file),
            (Destination::Cpu, &self.output.cpu_file),
        ] {
            let bare = Path::new(name).file_name().map(|f| f == name.as_str()).unwrap_or(false);
            if !bare {
                return Err(Error::config(format!(
                    "Log file name for '{}' must be a plain file name, got '{}'",
                    dest, name
                )));
            }
        }

        if self.output.cuda_file == self.output.cpu_file {
            return Err(Error::config("cuda and cpu rows must go to different files"));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {},
            other => return Err(Error::config(format!("Invalid log level '{}'", other))),
        }

        Ok(())
    }

    /// File name configured for a destination
    pub fn file_name(&self, destination: Destination) -> &str {
        match destination {
            Destination::Cuda => &self.output.cuda_file,
            Destination::Cpu => &self.output.cpu_file,
        }
    }

    /// Full path of the log file for a destination
    pub fn log_path(&self, destination: Destination) -> PathBuf {
        self.output.dir.join(self.file_name(destination))
    }
}
