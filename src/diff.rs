//! Diff engine: compares two tree indexes by canonical key

use crate::tree::TreeIndex;

/// Removed / added / modified paths between a source and a target tree
///
/// Each list is strictly ascending and the three lists never share a path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// In source, absent from target
    pub removed: Vec<String>,
    /// In target, absent from source
    pub added: Vec<String>,
    /// In both, with differing entries (content change or file/directory swap)
    pub modified: Vec<String>,
}

/// Per-section counts of a diff
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub removed: usize,
    pub added: usize,
    pub modified: usize,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty() && self.modified.is_empty()
    }

    pub fn summary(&self) -> DiffSummary {
        DiffSummary {
            removed: self.removed.len(),
            added: self.added.len(),
            modified: self.modified.len(),
        }
    }

    /// Paths to export, in report order: added, then modified
    pub fn exported_paths(&self) -> impl Iterator<Item = &str> {
        self.added
            .iter()
            .chain(self.modified.iter())
            .map(String::as_str)
    }
}

/// Compare two indexes
///
/// Both indexes iterate in key order, so the lists come out sorted without
/// a separate sort pass.
pub fn diff(source: &TreeIndex, target: &TreeIndex) -> DiffResult {
    let mut result = DiffResult::default();

    for (key, source_entry) in source {
        match target.get(key) {
            None => result.removed.push(key.clone()),
            Some(target_entry) if target_entry != source_entry => {
                result.modified.push(key.clone())
            }
            Some(_) => {}
        }
    }

    result.added = target
        .keys()
        .filter(|key| !source.contains(key))
        .map(str::to_string)
        .collect();

    result
}
