//! Error types for the snapshot diff engine.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while indexing a tree
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk {path:?}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Duplicate path in index: {path}")]
    DuplicatePath { path: String },

    #[error("Tree root is not a directory: {0:?}")]
    NotADirectory(PathBuf),

    #[error("Path is not valid UTF-8: {0:?}")]
    NonUtf8Path(PathBuf),

    #[error("Path {path:?} is not under tree root {root:?}")]
    OutsideRoot { path: PathBuf, root: PathBuf },
}

/// Errors raised while copying changed content into the output root
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Export destination already exists: {path:?}")]
    DestinationExists { path: PathBuf },

    #[error("Target entry {key} would overwrite the report at {path:?}")]
    ReservedName { key: String, path: PathBuf },

    #[error("Export source vanished: {path:?}")]
    SourceMissing { path: PathBuf },

    #[error("Failed to walk export source {path:?}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Errors raised while clearing and recreating the output root
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to remove existing output {path:?}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create output directory {path:?}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while writing the report file
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level error for a snapshot diff run
#[derive(Debug, Error)]
pub enum SnapdiffError {
    #[error("Indexing error: {0}")]
    Index(#[from] IndexError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Output preparation error: {0}")]
    Output(#[from] OutputError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for SnapdiffError {
    fn from(err: config::ConfigError) -> Self {
        SnapdiffError::ConfigError(err.to_string())
    }
}
