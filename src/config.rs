//! Configuration System
//!
//! An optional TOML file supplies defaults for the diff options and logging.
//! Command-line flags are applied on top by the binary. Nothing is read from a
//! default location: a file is only loaded when one is passed explicitly.

use crate::error::SnapdiffError;
use crate::logging::LoggingConfig;
use crate::tree::{ExclusionRule, SymlinkPolicy, WalkerConfig};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapdiffConfig {
    /// Diff and export options
    #[serde(default)]
    pub diff: DiffSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Diff and export options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSettings {
    /// Substring excluding matching absolute paths in both trees
    #[serde(default)]
    pub exclude: Option<String>,

    /// Copy added and modified entries into the output root
    #[serde(default)]
    pub export: bool,

    /// Follow symbolic links instead of skipping them
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl DiffSettings {
    pub fn symlink_policy(&self) -> SymlinkPolicy {
        if self.follow_symlinks {
            SymlinkPolicy::Follow
        } else {
            SymlinkPolicy::Skip
        }
    }
}

impl SnapdiffConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), SnapdiffError> {
        self.logging.validate()
    }
}

/// Loads [`SnapdiffConfig`] from an explicit file
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a TOML configuration file
    pub fn load_from_file(path: &Path) -> Result<SnapdiffConfig, SnapdiffError> {
        if !path.is_file() {
            return Err(SnapdiffError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let config: SnapdiffConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).format(FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }
}

/// Everything one run needs, passed explicitly to the indexer and exporter
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: PathBuf,
    pub target: PathBuf,
    pub output: PathBuf,
    pub exclusion: ExclusionRule,
    pub export: bool,
    pub symlinks: SymlinkPolicy,
}

impl RunConfig {
    /// A run with no exclusion, no export, and symlinks skipped
    pub fn new(source: PathBuf, target: PathBuf, output: PathBuf) -> Self {
        Self {
            source,
            target,
            output,
            exclusion: ExclusionRule::none(),
            export: false,
            symlinks: SymlinkPolicy::Skip,
        }
    }

    pub fn from_settings(
        source: PathBuf,
        target: PathBuf,
        output: PathBuf,
        settings: &DiffSettings,
    ) -> Self {
        Self {
            source,
            target,
            output,
            exclusion: ExclusionRule::new(settings.exclude.clone()),
            export: settings.export,
            symlinks: settings.symlink_policy(),
        }
    }

    pub fn with_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclusion = ExclusionRule::new(Some(pattern.into()));
        self
    }

    pub fn with_export(mut self, export: bool) -> Self {
        self.export = export;
        self
    }

    /// Walker configuration shared by both trees and the exporter
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            exclusion: self.exclusion.clone(),
            symlinks: self.symlinks,
        }
    }
}
