//! Tree builder for constructing path indexes from the filesystem

use crate::error::IndexError;
use crate::tree::hasher;
use crate::tree::index::{IndexBuilder, TreeIndex};
use crate::tree::node::PathEntry;
use crate::tree::path;
use crate::tree::walker::{Entry, Walker, WalkerConfig};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, instrument, trace};

/// Builds a [`TreeIndex`] for one root directory
pub struct TreeBuilder {
    root: PathBuf,
    walker_config: WalkerConfig,
}

impl TreeBuilder {
    /// Create a new tree builder for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            walker_config: WalkerConfig::default(),
        }
    }

    /// Set walker config (exclusion rule, symlink policy)
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Walk the root, fingerprint every file, and collect the index
    ///
    /// The root is canonicalized first, so every key is relative to the
    /// absolute root regardless of how the caller spelled it.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn build(&self) -> Result<TreeIndex, IndexError> {
        let start = Instant::now();
        info!("Starting index build");

        let root = path::canonicalize_root(&self.root)?;

        let walker = Walker::with_config(root.clone(), self.walker_config.clone());
        let entries = match walker.walk() {
            Ok(e) => {
                debug!(entry_count = e.len(), "Walked filesystem");
                e
            }
            Err(e) => {
                error!("Filesystem walk failed: {}", e);
                return Err(e);
            }
        };

        let mut builder = IndexBuilder::new(root.clone());
        for entry in entries {
            let key = path::relative_key(&root, entry.path())?;
            let value = match &entry {
                Entry::Directory { .. } => PathEntry::Directory,
                Entry::File { path } => self.hash_file(path)?,
            };
            trace!(key = %key, entry = %value, "Indexed");
            builder.insert(key, value).inspect_err(|e| {
                error!("Index invariant violated: {}", e);
            })?;
        }

        let index = builder.finish();
        info!(
            files = index.file_count(),
            directories = index.directory_count(),
            duration_ms = start.elapsed().as_millis(),
            "Index build completed"
        );

        Ok(index)
    }

    fn hash_file(&self, file_path: &Path) -> Result<PathEntry, IndexError> {
        let fp = hasher::fingerprint(file_path).inspect_err(|e| {
            error!("Failed to fingerprint file: {}", e);
        })?;
        Ok(PathEntry::File(fp))
    }
}

/// Build the index of `root` with the given walker configuration
pub fn build_index(root: &Path, config: &WalkerConfig) -> Result<TreeIndex, IndexError> {
    TreeBuilder::new(root.to_path_buf())
        .with_walker_config(config.clone())
        .build()
}
