//! Report writer
//!
//! The report lists removed, added, and modified paths, each block preceded
//! by a header line. Empty blocks are left out entirely. Lines end in `\n` and
//! the file is UTF-8, so keys round-trip byte for byte.

use crate::diff::DiffResult;
use crate::error::ReportError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Reserved file name of the report at the output root
pub const REPORT_FILE_NAME: &str = "__result.txt";

pub const REMOVED_HEADER: &str = "#removed";
pub const ADDED_HEADER: &str = "#added";
pub const MODIFIED_HEADER: &str = "#modified";

/// Non-empty sections in report order
fn sections(diff: &DiffResult) -> impl Iterator<Item = (&'static str, &[String])> {
    [
        (REMOVED_HEADER, diff.removed.as_slice()),
        (ADDED_HEADER, diff.added.as_slice()),
        (MODIFIED_HEADER, diff.modified.as_slice()),
    ]
    .into_iter()
    .filter(|(_, paths)| !paths.is_empty())
}

/// Write the report sections to any writer
pub fn write_sections<W: Write>(out: &mut W, diff: &DiffResult) -> std::io::Result<()> {
    for (header, paths) in sections(diff) {
        writeln!(out, "{}", header)?;
        for path in paths {
            writeln!(out, "{}", path)?;
        }
    }
    Ok(())
}

/// Render the report to a string without touching the filesystem
pub fn render_report(diff: &DiffResult) -> String {
    let mut report = String::new();
    for (header, paths) in sections(diff) {
        report.push_str(header);
        report.push('\n');
        for path in paths {
            report.push_str(path);
            report.push('\n');
        }
    }
    report
}

/// Create or truncate the report file inside `output_root` and write it
pub fn write_report(output_root: &Path, diff: &DiffResult) -> Result<PathBuf, ReportError> {
    let report_path = output_root.join(REPORT_FILE_NAME);
    let io_err = |source| ReportError::Io {
        path: report_path.clone(),
        source,
    };

    let file = File::create(&report_path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    write_sections(&mut writer, diff).map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    info!(path = %report_path.display(), "Report written");
    Ok(report_path)
}
