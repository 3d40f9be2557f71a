//! Shared fixtures for integration tests
//!
//! Trees are described as `(relative path, content)` pairs, where `None`
//! content means an (possibly empty) directory.

use snapdiff::config::RunConfig;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Source, target, and output roots under one temporary directory
pub struct Fixture {
    _temp: TempDir,
    pub source: PathBuf,
    pub target: PathBuf,
    pub output: PathBuf,
}

impl Fixture {
    pub fn new(source: &[(&str, Option<&str>)], target: &[(&str, Option<&str>)]) -> Self {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        let fixture = Self {
            source: root.join("source"),
            target: root.join("target"),
            output: root.join("output"),
            _temp: temp,
        };
        write_tree(&fixture.source, source);
        write_tree(&fixture.target, target);
        fixture
    }

    pub fn run_config(&self) -> RunConfig {
        RunConfig::new(
            self.source.clone(),
            self.target.clone(),
            self.output.clone(),
        )
    }

    pub fn report(&self) -> String {
        fs::read_to_string(self.output.join(snapdiff::report::REPORT_FILE_NAME)).unwrap()
    }
}

/// Materialize a tree description under `root`
pub fn write_tree(root: &Path, entries: &[(&str, Option<&str>)]) {
    fs::create_dir_all(root).unwrap();
    for (rel, content) in entries {
        let path = root.join(rel);
        match content {
            Some(content) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).unwrap();
                }
                fs::write(&path, content).unwrap();
            }
            None => fs::create_dir_all(&path).unwrap(),
        }
    }
}

/// Read a tree back as relative path → content (`None` for directories)
pub fn read_tree(root: &Path) -> BTreeMap<String, Option<Vec<u8>>> {
    let mut out = BTreeMap::new();
    for entry in walkdir::WalkDir::new(root).min_depth(1) {
        let entry = entry.unwrap();
        let rel = entry
            .path()
            .strip_prefix(root)
            .unwrap()
            .to_string_lossy()
            .replace('\\', "/");
        let content = if entry.file_type().is_dir() {
            None
        } else {
            Some(fs::read(entry.path()).unwrap())
        };
        out.insert(rel, content);
    }
    out
}
