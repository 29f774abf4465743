//! Implementation of the `tscwatch emit` command.
//!
//! Runs the ordering utility once and rewrites the manifest, without starting
//! the compiler.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use tscwatch_lib::manifest::{ManifestEmitter, PathRewrite};
use tscwatch_lib::platform::paths;

use crate::output::{OutputFormat, print_entry, print_json, print_success};

pub fn cmd_emit(project: &Path, rewrite: PathRewrite, output: OutputFormat) -> Result<()> {
  let project_dir =
    paths::project_dir(project).with_context(|| format!("Project directory not found: {}", project.display()))?;

  let emitter = ManifestEmitter::from_env(rewrite);
  debug!(project = %project_dir.display(), "emitting manifest once");

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let report = rt
    .block_on(emitter.emit(&project_dir))
    .context("Manifest emission failed")?;

  if output.is_json() {
    return print_json(&report);
  }

  print_success(&format!(
    "Manifest updated: {} ({} file(s))",
    report.manifest_path.display(),
    report.entries.len()
  ));
  for (index, entry) in report.entries.iter().enumerate() {
    print_entry(&format!("{:>3}", index + 1), entry);
  }

  Ok(())
}
