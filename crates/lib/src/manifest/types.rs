//! Manifest emission types.
//!
//! The manifest is a JSON document consumed by the game runtime. Its `game`
//! field lists compiled scripts in the order they must be loaded:
//!
//! ```json
//! {
//!   "initial": ["libs/modules/egret/egret.js"],
//!   "game": ["bin-debug/Base.js", "bin-debug/Main.js"]
//! }
//! ```
//!
//! Only `game` is ever touched; every other field is written back unchanged.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while emitting the manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("compiler configuration not found: {}", path.display())]
  ConfigNotFound { path: PathBuf },

  #[error("failed to run ordering utility {program}: {source}")]
  ReorderSpawn { program: String, source: std::io::Error },

  #[error("ordering utility {program} failed with exit code {code:?}: {stderr}")]
  ReorderFailed {
    program: String,
    code: Option<i32>,
    stderr: String,
  },

  #[error("ordering utility produced unreadable output: {0}")]
  ReorderOutput(#[source] serde_json::Error),

  #[error("manifest not found: {}", path.display())]
  ManifestNotFound { path: PathBuf },

  #[error("failed to read {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse {}: {source}", path.display())]
  Parse { path: PathBuf, source: serde_json::Error },

  #[error("manifest is not a JSON object: {}", path.display())]
  NotAnObject { path: PathBuf },

  #[error("failed to serialize manifest: {0}")]
  Serialize(#[source] serde_json::Error),

  #[error("failed to write {}: {source}", path.display())]
  Write { path: PathBuf, source: std::io::Error },
}

/// Outcome of a successful emission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmitReport {
  /// The manifest that was rewritten.
  pub manifest_path: PathBuf,
  /// The new contents of the `game` field.
  pub entries: Vec<String>,
}

/// How source file names become output file names.
///
/// The defaults match an Egret project: sources under `Client/src`, compiled
/// scripts under `bin-debug`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRewrite {
  /// Directory prefix removed from every source file.
  pub source_root: String,
  /// Directory prefix added to every output file.
  pub output_root: String,
  /// Extension replaced on every source file.
  pub source_ext: String,
  /// Extension of compiled files.
  pub output_ext: String,
  /// Files ending in this suffix carry types only and are dropped.
  pub declaration_suffix: String,
}

impl Default for PathRewrite {
  fn default() -> Self {
    Self {
      source_root: "Client/src".to_string(),
      output_root: "bin-debug".to_string(),
      source_ext: ".ts".to_string(),
      output_ext: ".js".to_string(),
      declaration_suffix: ".d.ts".to_string(),
    }
  }
}
