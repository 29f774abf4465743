//! Manifest emission.
//!
//! After a clean compile the manifest's `game` field is regenerated from the
//! ordering utility's output, with declaration files dropped and source paths
//! mapped to compiled output paths.

mod document;
mod emit;
mod reorder;
mod rewrite;
mod types;

pub use document::{Document, read_manifest, replace_entries, write_manifest};
pub use emit::ManifestEmitter;
pub use reorder::{CommandReorder, REORDER_SCRIPT, Reorder, parse_file_list};
pub use types::*;
