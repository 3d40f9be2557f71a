//! CLI domain: parse, validation, and output only.
//! Orchestration lives in `api`; the binary wires the two together.

mod output;
mod parse;
mod validate;

pub use output::{format_summary, map_error};
pub use parse::Cli;
pub use validate::{validate_args, ValidatedArgs, ValidationError};
