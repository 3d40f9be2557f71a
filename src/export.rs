//! Exporter: copies added and modified target content into the output root
//!
//! Files are copied one at a time with their timestamps restored. Directories
//! are copied as explicit subtrees: the destination directory is created
//! (failing if it already exists) and the source subtree is walked and copied
//! entry by entry with the same exclusion rule and symlink policy the indexer
//! used.
//!
//! A top-level target entry named like the report is refused before anything
//! is copied.

use crate::diff::DiffResult;
use crate::error::{ExportError, IndexError};
use crate::report::REPORT_FILE_NAME;
use crate::tree::path;
use crate::tree::walker::{Entry, SymlinkPolicy, Walker, WalkerConfig};
use filetime::FileTime;
use std::collections::BTreeSet;
use std::fs::{self, Metadata};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, instrument, trace, warn};

/// Counters for one export pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    pub files_copied: usize,
    pub directories_created: usize,
    pub bytes_copied: u64,
    /// Paths skipped because an exported ancestor directory already carried them
    pub covered_skipped: usize,
}

/// Copies target-tree paths into an output root
pub struct Exporter {
    target_root: PathBuf,
    output_root: PathBuf,
    walker_config: WalkerConfig,
}

impl Exporter {
    /// `target_root` should be the absolute root the target index was built from
    pub fn new(target_root: PathBuf, output_root: PathBuf) -> Self {
        Self {
            target_root,
            output_root,
            walker_config: WalkerConfig::default(),
        }
    }

    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Export the added paths, then the modified paths, each in sorted order
    pub fn export(&self, diff: &DiffResult) -> Result<ExportStats, ExportError> {
        self.export_paths(diff.exported_paths())
    }

    /// Export the given relative keys in the order supplied
    #[instrument(skip_all, fields(target = %self.target_root.display(), output = %self.output_root.display()))]
    pub fn export_paths<'a, I>(&self, keys: I) -> Result<ExportStats, ExportError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let start = Instant::now();
        let keys: Vec<&str> = keys.into_iter().collect();
        info!(path_count = keys.len(), "Starting export");

        let mut stats = ExportStats::default();

        // Kinds are resolved up front so coverage does not depend on order:
        // a directory exported later still covers its children listed earlier.
        let mut planned = Vec::with_capacity(keys.len());
        let mut directories = BTreeSet::new();
        for key in keys {
            if key == REPORT_FILE_NAME {
                return Err(ExportError::ReservedName {
                    key: key.to_string(),
                    path: self.output_root.join(REPORT_FILE_NAME),
                });
            }
            let source = path::resolve_key(&self.target_root, key);
            let meta = self.source_metadata(&source)?;
            if meta.is_dir() {
                directories.insert(key);
            }
            planned.push((key, source, meta));
        }

        for (key, source, meta) in planned {
            if let Some(ancestor) = covering_directory(key, &directories) {
                debug!(key, ancestor, "Already exported with ancestor directory");
                stats.covered_skipped += 1;
                continue;
            }

            let dest = path::resolve_key(&self.output_root, key);
            if meta.is_dir() {
                trace!(key, "Exporting directory subtree");
                self.copy_tree(&source, &dest, &mut stats)
                    .inspect_err(|e| error!("Directory export failed: {}", e))?;
            } else if meta.is_file() {
                trace!(key, "Exporting file");
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent).map_err(|source| ExportError::Io {
                        path: parent.to_path_buf(),
                        source,
                    })?;
                }
                stats.bytes_copied += copy_file(&source, &dest, &meta)
                    .inspect_err(|e| error!("File export failed: {}", e))?;
                stats.files_copied += 1;
            } else {
                warn!(key, "Skipping export of special file");
            }
        }

        info!(
            files = stats.files_copied,
            directories = stats.directories_created,
            bytes = stats.bytes_copied,
            duration_ms = start.elapsed().as_millis(),
            "Export completed"
        );
        Ok(stats)
    }

    fn source_metadata(&self, source: &Path) -> Result<Metadata, ExportError> {
        let meta = match self.walker_config.symlinks {
            SymlinkPolicy::Follow => fs::metadata(source),
            SymlinkPolicy::Skip => fs::symlink_metadata(source),
        };
        meta.map_err(|e| match e.kind() {
            ErrorKind::NotFound => ExportError::SourceMissing {
                path: source.to_path_buf(),
            },
            _ => ExportError::Io {
                path: source.to_path_buf(),
                source: e,
            },
        })
    }

    /// Copy a directory subtree into a destination that must not exist yet
    fn copy_tree(
        &self,
        source: &Path,
        dest: &Path,
        stats: &mut ExportStats,
    ) -> Result<(), ExportError> {
        if fs::symlink_metadata(dest).is_ok() {
            return Err(ExportError::DestinationExists {
                path: dest.to_path_buf(),
            });
        }
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| ExportError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut created = vec![(source.to_path_buf(), dest.to_path_buf())];
        create_dir(dest)?;
        stats.directories_created += 1;

        let walker = Walker::with_config(source.to_path_buf(), self.walker_config.clone());
        let entries = walker.walk().map_err(|e| walk_error(source, e))?;

        // Sorted by path, so every directory precedes its contents
        for entry in entries {
            let relative = entry
                .path()
                .strip_prefix(source)
                .map_err(|_| ExportError::SourceMissing {
                    path: entry.path().to_path_buf(),
                })?;
            let target = dest.join(relative);

            match entry {
                Entry::Directory { path } => {
                    create_dir(&target)?;
                    stats.directories_created += 1;
                    created.push((path, target));
                }
                Entry::File { path } => {
                    let meta = fs::metadata(&path).map_err(|e| ExportError::Io {
                        path: path.clone(),
                        source: e,
                    })?;
                    stats.bytes_copied += copy_file(&path, &target, &meta)?;
                    stats.files_copied += 1;
                }
            }
        }

        // Deepest first: filling a directory bumps its mtime, and a read-only
        // parent must stay writable until its children are done
        for (source_dir, dest_dir) in created.iter().rev() {
            copy_dir_attributes(source_dir, dest_dir)?;
        }

        Ok(())
    }
}

/// Closest directory in `directories` that strictly contains `key`
fn covering_directory<'a>(key: &str, directories: &BTreeSet<&'a str>) -> Option<&'a str> {
    let mut candidate = key;
    while let Some(idx) = candidate.rfind(path::KEY_SEPARATOR) {
        candidate = &candidate[..idx];
        if let Some(found) = directories.get(candidate) {
            return Some(*found);
        }
    }
    None
}

fn create_dir(dest: &Path) -> Result<(), ExportError> {
    fs::create_dir(dest).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => ExportError::DestinationExists {
            path: dest.to_path_buf(),
        },
        _ => ExportError::Io {
            path: dest.to_path_buf(),
            source: e,
        },
    })
}

/// Copy one file and restore its access and modification times
fn copy_file(source: &Path, dest: &Path, meta: &Metadata) -> Result<u64, ExportError> {
    let bytes = fs::copy(source, dest).map_err(|e| match e.kind() {
        ErrorKind::NotFound if fs::symlink_metadata(source).is_err() => {
            ExportError::SourceMissing {
                path: source.to_path_buf(),
            }
        }
        _ => ExportError::Io {
            path: dest.to_path_buf(),
            source: e,
        },
    })?;

    let atime = FileTime::from_last_access_time(meta);
    let mtime = FileTime::from_last_modification_time(meta);
    filetime::set_file_times(dest, atime, mtime).map_err(|e| ExportError::Io {
        path: dest.to_path_buf(),
        source: e,
    })?;

    Ok(bytes)
}

fn copy_dir_attributes(source: &Path, dest: &Path) -> Result<(), ExportError> {
    let io_err = |e| ExportError::Io {
        path: dest.to_path_buf(),
        source: e,
    };
    let meta = fs::metadata(source).map_err(io_err)?;
    filetime::set_file_times(
        dest,
        FileTime::from_last_access_time(&meta),
        FileTime::from_last_modification_time(&meta),
    )
    .map_err(io_err)?;
    fs::set_permissions(dest, meta.permissions()).map_err(io_err)
}

fn walk_error(root: &Path, err: IndexError) -> ExportError {
    match err {
        IndexError::Walk { path, source } => ExportError::Walk { path, source },
        other => ExportError::Io {
            path: root.to_path_buf(),
            source: std::io::Error::other(other.to_string()),
        },
    }
}
