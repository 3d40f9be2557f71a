//! Path canonicalization and relative-key utilities

use crate::error::IndexError;
use std::path::{Component, Path, PathBuf};

/// Separator used inside canonical relative keys, on every platform
pub const KEY_SEPARATOR: char = '/';

/// Resolve a tree root to an absolute, canonical directory path
///
/// Uses dunce so Windows roots don't come back as `\\?\` verbatim paths.
pub fn canonicalize_root(root: &Path) -> Result<PathBuf, IndexError> {
    let canonical = dunce::canonicalize(root).map_err(|source| IndexError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    if !canonical.is_dir() {
        return Err(IndexError::NotADirectory(canonical));
    }

    Ok(canonical)
}

/// Compute the canonical relative key of `path` under `root`
///
/// Strips the root prefix and joins the remaining components with `/`.
/// Components that are not valid UTF-8 are rejected rather than lossily
/// converted, so the key can be written to the report and mapped back to
/// the filesystem unchanged.
pub fn relative_key(root: &Path, path: &Path) -> Result<String, IndexError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| IndexError::OutsideRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })?;

    let mut key = String::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => {
                let name = name
                    .to_str()
                    .ok_or_else(|| IndexError::NonUtf8Path(path.to_path_buf()))?;
                if !key.is_empty() {
                    key.push(KEY_SEPARATOR);
                }
                key.push_str(name);
            }
            Component::CurDir => {}
            _ => {
                return Err(IndexError::OutsideRoot {
                    path: path.to_path_buf(),
                    root: root.to_path_buf(),
                })
            }
        }
    }

    Ok(key)
}

/// Map a canonical relative key back onto a filesystem root
pub fn resolve_key(root: &Path, key: &str) -> PathBuf {
    let mut resolved = root.to_path_buf();
    for segment in key.split(KEY_SEPARATOR).filter(|s| !s.is_empty()) {
        resolved.push(segment);
    }
    resolved
}
