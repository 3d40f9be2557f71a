//! Tree indexing
//!
//! Walks a directory tree and captures it as an immutable map from canonical
//! relative path to either a directory marker or a content fingerprint.

pub mod builder;
pub mod exclusion;
pub mod hasher;
pub mod index;
pub mod node;
pub mod path;
pub mod walker;

pub use builder::{build_index, TreeBuilder};
pub use exclusion::ExclusionRule;
pub use index::{IndexBuilder, TreeIndex};
pub use node::PathEntry;
pub use walker::{SymlinkPolicy, WalkerConfig};
