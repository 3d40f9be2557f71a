//! Logging System
//!
//! Structured logging using the `tracing` crate. Level, format, and destination
//! come from the configuration file and command-line flags; the `SNAPDIFF_LOG`
//! environment variable, when set, replaces the level filter.
//!
//! Logs go to stderr by default so stdout carries only the run summary.

use crate::error::SnapdiffError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV_VAR: &str = "SNAPDIFF_LOG";

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Disable to install no subscriber at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (when output is "file")
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Colored output (text format, terminal destinations only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("snapdiff.log")
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
        }
    }
}

/// Where log lines are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Destination {
    Stdout,
    Stderr,
    File,
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), SnapdiffError> {
        if !LEVELS.contains(&self.level.as_str()) {
            return Err(SnapdiffError::ConfigError(format!(
                "Invalid log level: {} (must be one of {})",
                self.level,
                LEVELS.join(", ")
            )));
        }
        parse_format(&self.format)?;
        parse_destination(&self.output)?;
        Ok(())
    }
}

/// Initialize the global subscriber
///
/// Does nothing when logging is disabled. Fails if a subscriber is already
/// installed or the settings are invalid.
pub fn init_logging(config: &LoggingConfig) -> Result<(), SnapdiffError> {
    if !config.enabled {
        return Ok(());
    }
    config.validate()?;

    let filter = build_env_filter(config)?;
    let json = parse_format(&config.format)?;
    let destination = parse_destination(&config.output)?;

    let writer = match destination {
        Destination::Stdout => BoxMakeWriter::new(std::io::stdout),
        Destination::Stderr => BoxMakeWriter::new(std::io::stderr),
        Destination::File => {
            let log_file = config.file.clone().unwrap_or_else(default_log_file);
            if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SnapdiffError::ConfigError(format!("Failed to create log directory: {}", e))
                })?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_file)
                .map_err(|e| {
                    SnapdiffError::ConfigError(format!(
                        "Failed to open log file {:?}: {}",
                        log_file, e
                    ))
                })?;
            BoxMakeWriter::new(Mutex::new(file))
        }
    };

    let base_subscriber = Registry::default().with(filter);
    let result = if json {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init()
    } else {
        let use_color = config.color && destination != Destination::File;
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_color)
                    .with_writer(writer),
            )
            .try_init()
    };

    result.map_err(|e| SnapdiffError::ConfigError(format!("Failed to install logger: {}", e)))
}

/// Build the level filter: `SNAPDIFF_LOG` wins over the configured level
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, SnapdiffError> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV_VAR) {
        return Ok(filter);
    }

    EnvFilter::try_new(&config.level)
        .map_err(|e| SnapdiffError::ConfigError(format!("Invalid log directive: {}", e)))
}

/// Returns true for json, false for text
fn parse_format(format: &str) -> Result<bool, SnapdiffError> {
    match format {
        "json" => Ok(true),
        "text" => Ok(false),
        _ => Err(SnapdiffError::ConfigError(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        ))),
    }
}

fn parse_destination(output: &str) -> Result<Destination, SnapdiffError> {
    match output {
        "stdout" => Ok(Destination::Stdout),
        "stderr" => Ok(Destination::Stderr),
        "file" => Ok(Destination::File),
        _ => Err(SnapdiffError::ConfigError(format!(
            "Invalid log output: {} (must be 'stdout', 'stderr', or 'file')",
            output
        ))),
    }
}
