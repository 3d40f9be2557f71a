//! CLI output: run summary and error mapping.

use crate::api::RunSummary;
use crate::error::SnapdiffError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &SnapdiffError) -> String {
    e.to_string()
}

/// One-line summary printed on success
pub fn format_summary(summary: &RunSummary) -> String {
    let counts = summary.diff.summary();
    let mut line = format!(
        "removed: {}, added: {}, modified: {} -> {}",
        counts.removed,
        counts.added,
        counts.modified,
        summary.report_path.display()
    );
    if let Some(export) = summary.export {
        line.push_str(&format!(
            " (exported {} files, {} directories)",
            export.files_copied, export.directories_created
        ));
    }
    line
}
