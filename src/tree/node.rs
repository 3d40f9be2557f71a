//! Index entry kinds

use crate::types::Fingerprint;
use std::fmt;

/// What a relative path refers to in one tree
///
/// Directories carry no content fingerprint. A path that is a file in one tree
/// and a directory in the other compares unequal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathEntry {
    Directory,
    File(Fingerprint),
}

impl PathEntry {
    pub fn is_dir(&self) -> bool {
        matches!(self, PathEntry::Directory)
    }

    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        match self {
            PathEntry::File(fp) => Some(fp),
            PathEntry::Directory => None,
        }
    }
}

impl fmt::Display for PathEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathEntry::Directory => f.write_str("dir"),
            PathEntry::File(fp) => write!(f, "{}", fp),
        }
    }
}
