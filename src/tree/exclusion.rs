//! Substring exclusion rule applied while walking a tree
//!
//! The rule is checked against the absolute path of every entry before it is
//! relativized. A matching entry is dropped as if it never existed; since every
//! descendant of a matching directory also contains the substring, whole
//! subtrees fall out with it.

use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionRule {
    pattern: Option<String>,
}

impl ExclusionRule {
    /// Build a rule from an optional substring. An empty substring excludes nothing.
    pub fn new(pattern: Option<String>) -> Self {
        Self {
            pattern: pattern.filter(|p| !p.is_empty()),
        }
    }

    /// A rule that never matches
    pub fn none() -> Self {
        Self::default()
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Whether the given absolute path is excluded
    pub fn matches(&self, path: &Path) -> bool {
        match &self.pattern {
            Some(pattern) => path.to_string_lossy().contains(pattern.as_str()),
            None => false,
        }
    }
}
