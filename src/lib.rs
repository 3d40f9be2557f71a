//! Snapdiff: content-addressed snapshot diff of two directory trees
//!
//! Indexes a source and a target tree into canonical path → fingerprint maps,
//! reports removed, added, and modified paths, and optionally exports the
//! changed content of the target into an output directory.

pub mod api;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod export;
pub mod logging;
pub mod report;
pub mod tree;
pub mod types;
