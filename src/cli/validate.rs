//! Argument validation performed before any core work runs

use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Why the positional arguments were rejected
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing required argument <{0}>")]
    Missing(&'static str),

    #[error("argument <{0}> must not be empty")]
    Empty(&'static str),

    #[error("<{name}> does not exist: {path:?}")]
    NotFound { name: &'static str, path: PathBuf },

    #[error("<{name}> is not a directory: {path:?}")]
    NotADirectory { name: &'static str, path: PathBuf },

    #[error("cannot resolve <{name}> {path:?}: {source}")]
    Unresolvable {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("output {output:?} overlaps input tree {input:?}")]
    OutputOverlapsInput { output: PathBuf, input: PathBuf },
}

/// Positional arguments after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedArgs {
    pub source: PathBuf,
    pub target: PathBuf,
    pub output: PathBuf,
}

/// Check the three positional arguments
///
/// Source and target must be existing directories. The output may be absent.
/// Since the output is deleted at the start of a run, it must neither be nor
/// contain an input tree, and it must not sit inside one either (it would be
/// indexed and, on export, copied into itself).
pub fn validate_args(
    source: Option<&Path>,
    target: Option<&Path>,
    output: Option<&Path>,
) -> Result<ValidatedArgs, ValidationError> {
    let source = require_dir("SOURCE", source)?;
    let target = require_dir("TARGET", target)?;
    let output = require("OUTPUT", output)?;

    let resolved_output = resolve_output(output)?;
    for input in [&source, &target] {
        let resolved_input =
            dunce::canonicalize(input).map_err(|e| ValidationError::Unresolvable {
                name: "SOURCE/TARGET",
                path: input.clone(),
                source: e,
            })?;
        if resolved_input.starts_with(&resolved_output)
            || resolved_output.starts_with(&resolved_input)
        {
            return Err(ValidationError::OutputOverlapsInput {
                output: output.to_path_buf(),
                input: input.clone(),
            });
        }
    }

    Ok(ValidatedArgs {
        source,
        target,
        output: output.to_path_buf(),
    })
}

fn require<'a>(name: &'static str, arg: Option<&'a Path>) -> Result<&'a Path, ValidationError> {
    let path = arg.ok_or(ValidationError::Missing(name))?;
    if path.as_os_str().is_empty() {
        return Err(ValidationError::Empty(name));
    }
    Ok(path)
}

fn require_dir(name: &'static str, arg: Option<&Path>) -> Result<PathBuf, ValidationError> {
    let path = require(name, arg)?;
    if !path.exists() {
        return Err(ValidationError::NotFound {
            name,
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(ValidationError::NotADirectory {
            name,
            path: path.to_path_buf(),
        });
    }
    Ok(path.to_path_buf())
}

/// Absolute form of a path that may not exist yet
///
/// Canonicalizes the deepest existing ancestor and applies the remaining
/// components lexically, `..` included.
fn resolve_output(output: &Path) -> Result<PathBuf, ValidationError> {
    let unresolvable = |e| ValidationError::Unresolvable {
        name: "OUTPUT",
        path: output.to_path_buf(),
        source: e,
    };

    let absolute = if output.is_absolute() {
        output.to_path_buf()
    } else {
        std::env::current_dir().map_err(unresolvable)?.join(output)
    };

    // Trailing components that do not exist yet, innermost first
    let mut existing = absolute.clone();
    let mut rest = Vec::new();
    while !existing.exists() {
        match existing.components().next_back() {
            Some(Component::Normal(name)) => rest.push(Some(name.to_os_string())),
            Some(Component::ParentDir) => rest.push(None),
            _ => break,
        }
        existing.pop();
    }

    let mut resolved = dunce::canonicalize(&existing).map_err(unresolvable)?;
    for name in rest.iter().rev() {
        match name {
            Some(name) => resolved.push(name),
            None => {
                resolved.pop();
            }
        }
    }
    Ok(resolved)
}
