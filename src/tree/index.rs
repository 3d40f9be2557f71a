//! Immutable path index for one tree

use crate::error::IndexError;
use crate::tree::node::PathEntry;
use std::collections::btree_map::{self, BTreeMap};
use std::path::{Path, PathBuf};

/// Complete relative-path → entry snapshot of one tree
///
/// Built once through [`IndexBuilder`]; there are no mutators. Keys iterate in
/// ascending lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeIndex {
    root: PathBuf,
    entries: BTreeMap<String, PathEntry>,
}

impl TreeIndex {
    /// Absolute root the index was built from
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get(&self, key: &str) -> Option<&PathEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in ascending key order
    pub fn iter(&self) -> btree_map::Iter<'_, String, PathEntry> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn file_count(&self) -> usize {
        self.entries.values().filter(|e| !e.is_dir()).count()
    }

    pub fn directory_count(&self) -> usize {
        self.entries.values().filter(|e| e.is_dir()).count()
    }

    /// Index equality ignoring the roots
    pub fn same_content(&self, other: &TreeIndex) -> bool {
        self.entries == other.entries
    }
}

impl<'a> IntoIterator for &'a TreeIndex {
    type Item = (&'a String, &'a PathEntry);
    type IntoIter = btree_map::Iter<'a, String, PathEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Single-writer builder for [`TreeIndex`]
///
/// Insertion fails on a key that is already present instead of overwriting it.
#[derive(Debug)]
pub struct IndexBuilder {
    root: PathBuf,
    entries: BTreeMap<String, PathEntry>,
}

impl IndexBuilder {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            entries: BTreeMap::new(),
        }
    }

    /// Insert an entry, failing on a duplicate key
    pub fn insert(&mut self, key: String, entry: PathEntry) -> Result<(), IndexError> {
        match self.entries.entry(key) {
            btree_map::Entry::Occupied(occupied) => Err(IndexError::DuplicatePath {
                path: occupied.key().clone(),
            }),
            btree_map::Entry::Vacant(vacant) => {
                vacant.insert(entry);
                Ok(())
            }
        }
    }

    pub fn finish(self) -> TreeIndex {
        TreeIndex {
            root: self.root,
            entries: self.entries,
        }
    }
}
