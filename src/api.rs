//! Run orchestration
//!
//! One run clears the output root, indexes the source and target trees, diffs
//! them, writes the report, and exports the changed content when asked to.
//! Every step either succeeds or aborts the run.
//!
//! The report is written before export starts. If export fails partway the
//! report stays on disk and may list paths that were never copied.

use crate::config::RunConfig;
use crate::diff::{self, DiffResult};
use crate::error::{OutputError, SnapdiffError};
use crate::export::{ExportStats, Exporter};
use crate::report;
use crate::tree::{TreeBuilder, TreeIndex};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info};

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub diff: DiffResult,
    pub report_path: PathBuf,
    /// Present only when export was enabled
    pub export: Option<ExportStats>,
}

/// A single snapshot comparison between two trees
pub struct SnapshotDiff {
    config: RunConfig,
}

impl SnapshotDiff {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Execute the full pipeline
    pub fn run(&self) -> Result<RunSummary, SnapdiffError> {
        let start = Instant::now();
        let config = &self.config;
        info!(
            source = %config.source.display(),
            target = %config.target.display(),
            output = %config.output.display(),
            exclude = config.exclusion.pattern().unwrap_or(""),
            export = config.export,
            "Starting snapshot diff"
        );

        prepare_output(&config.output)?;

        let source_index = self.index(&config.source)?;
        let target_index = self.index(&config.target)?;

        let diff = diff::diff(&source_index, &target_index);
        let summary = diff.summary();
        info!(
            removed = summary.removed,
            added = summary.added,
            modified = summary.modified,
            "Diff computed"
        );

        let report_path = report::write_report(&config.output, &diff)?;

        let export = if config.export {
            let exporter = Exporter::new(target_index.root().to_path_buf(), config.output.clone())
                .with_walker_config(config.walker_config());
            Some(exporter.export(&diff).inspect_err(|e| {
                error!("Export aborted: {}", e);
            })?)
        } else {
            debug!("Export disabled");
            None
        };

        info!(duration_ms = start.elapsed().as_millis(), "Snapshot diff completed");
        Ok(RunSummary {
            diff,
            report_path,
            export,
        })
    }

    fn index(&self, root: &Path) -> Result<TreeIndex, SnapdiffError> {
        let index = TreeBuilder::new(root.to_path_buf())
            .with_walker_config(self.config.walker_config())
            .build()?;
        Ok(index)
    }
}

/// Run a snapshot diff with the given configuration
pub fn run(config: RunConfig) -> Result<RunSummary, SnapdiffError> {
    SnapshotDiff::new(config).run()
}

/// Destroy any previous output and create an empty output directory
///
/// A stray file at the output path is removed like a directory would be.
pub fn prepare_output(output: &Path) -> Result<(), OutputError> {
    match fs::symlink_metadata(output) {
        Ok(meta) => {
            let removed = if meta.is_dir() {
                fs::remove_dir_all(output)
            } else {
                fs::remove_file(output)
            };
            removed.map_err(|source| OutputError::Remove {
                path: output.to_path_buf(),
                source,
            })?;
            debug!(path = %output.display(), "Removed previous output");
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(source) => {
            return Err(OutputError::Remove {
                path: output.to_path_buf(),
                source,
            })
        }
    }

    fs::create_dir_all(output).map_err(|source| OutputError::Create {
        path: output.to_path_buf(),
        source,
    })
}
