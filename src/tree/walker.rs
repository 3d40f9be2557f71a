//! Filesystem walker for traversing directory structures

use crate::error::IndexError;
use crate::tree::exclusion::ExclusionRule;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Filesystem entry types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A regular file
    File { path: PathBuf },
    /// A directory
    Directory { path: PathBuf },
}

impl Entry {
    pub fn path(&self) -> &Path {
        match self {
            Entry::File { path } | Entry::Directory { path } => path,
        }
    }
}

/// How symbolic links met during a walk are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymlinkPolicy {
    /// Symlinks are neither indexed nor exported
    #[default]
    Skip,
    /// Symlinks are resolved; a link cycle aborts the walk
    Follow,
}

/// Filesystem walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Entries whose absolute path matches are dropped
    pub exclusion: ExclusionRule,
    /// Symlink handling (default: skip)
    pub symlinks: SymlinkPolicy,
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the filesystem below the root and collect all entries
    ///
    /// The root itself is never yielded. Returns entries sorted by path.
    /// Any traversal error aborts the walk: an incomplete listing would
    /// show up later as files that falsely appear removed.
    pub fn walk(&self) -> Result<Vec<Entry>, IndexError> {
        let mut entries = Vec::new();
        let exclusion = &self.config.exclusion;

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(self.config.symlinks == SymlinkPolicy::Follow)
            .into_iter()
            .filter_entry(|entry| {
                let excluded = exclusion.matches(entry.path());
                if excluded {
                    debug!(path = %entry.path().display(), "Excluded by rule");
                }
                !excluded
            });

        for entry in walker {
            let entry = entry.map_err(|e| IndexError::Walk {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone()),
                source: e,
            })?;

            let file_type = entry.file_type();
            let path = entry.into_path();

            if file_type.is_dir() {
                entries.push(Entry::Directory { path });
            } else if file_type.is_file() {
                entries.push(Entry::File { path });
            } else if file_type.is_symlink() {
                debug!(path = %path.display(), "Skipping symlink");
            } else {
                warn!(path = %path.display(), "Skipping special file");
            }
        }

        // Sort entries by path for determinism
        entries.sort_by(|a, b| a.path().cmp(b.path()));

        Ok(entries)
    }
}
