//! CLI parse: clap types for snapdiff. No behavior beyond flag resolution.

use crate::config::DiffSettings;
use clap::Parser;
use std::path::PathBuf;

/// Compare two directory trees and report (and optionally export) what changed
///
/// Removed, added, and modified paths are written to `__result.txt` in the
/// output directory. The output directory is emptied before every run.
#[derive(Parser, Debug)]
#[command(name = "snapdiff", version)]
#[command(about = "Content-addressed snapshot diff of two directory trees")]
#[command(override_usage = "snapdiff [OPTIONS] <SOURCE> <TARGET> <OUTPUT>")]
pub struct Cli {
    /// Source (reference) tree
    #[arg(value_name = "SOURCE")]
    pub source: Option<PathBuf>,

    /// Target tree compared against the source
    #[arg(value_name = "TARGET")]
    pub target: Option<PathBuf>,

    /// Output directory (deleted and recreated)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Exclude every path containing this substring, in both trees
    #[arg(short = 'X', long, value_name = "SUBSTRING")]
    pub exclude: Option<String>,

    /// Copy added and modified entries into the output directory
    #[arg(short = 'o', long, overrides_with = "no_export")]
    pub export: bool,

    /// Write only the report (default)
    #[arg(short = 'n', long, overrides_with = "export")]
    pub no_export: bool,

    /// Follow symbolic links instead of skipping them
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Configuration file (TOML) with [diff] and [logging] tables
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Explicit export choice on the command line, if any
    pub fn export_flag(&self) -> Option<bool> {
        if self.export {
            Some(true)
        } else if self.no_export {
            Some(false)
        } else {
            None
        }
    }

    /// Apply command-line diff flags over settings from the config file
    pub fn apply_diff_overrides(&self, mut settings: DiffSettings) -> DiffSettings {
        if let Some(ref exclude) = self.exclude {
            settings.exclude = Some(exclude.clone());
        }
        if let Some(export) = self.export_flag() {
            settings.export = export;
        }
        if self.follow_symlinks {
            settings.follow_symlinks = true;
        }
        settings
    }
}
