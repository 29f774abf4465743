use std::path::Path;

use tracing::info;

use crate::consts::{MANIFEST_FILENAME, TSCONFIG_FILENAME};
use crate::watch::Emit;

use super::document::{read_manifest, replace_entries, write_manifest};
use super::reorder::{CommandReorder, Reorder};
use super::types::{EmitReport, ManifestError, PathRewrite};

/// Rewrites `manifest.json` from the ordering utility's file list.
#[derive(Debug, Clone)]
pub struct ManifestEmitter<R = CommandReorder> {
  reorder: R,
  rewrite: PathRewrite,
}

impl ManifestEmitter<CommandReorder> {
  /// Emitter using the ordering utility configured in the environment.
  pub fn from_env(rewrite: PathRewrite) -> Self {
    Self::new(CommandReorder::from_env(), rewrite)
  }
}

impl<R: Reorder> ManifestEmitter<R> {
  pub fn new(reorder: R, rewrite: PathRewrite) -> Self {
    Self { reorder, rewrite }
  }

  pub fn rewrite(&self) -> &PathRewrite {
    &self.rewrite
  }

  /// Regenerate the `game` list of `<project_dir>/manifest.json`.
  ///
  /// # Errors
  ///
  /// Fails when `tsconfig.json` is missing, the ordering utility fails or
  /// prints something other than a list of names, or the manifest cannot be
  /// read, parsed, or written. Nothing is written unless every earlier step
  /// succeeded.
  pub async fn emit(&self, project_dir: &Path) -> Result<EmitReport, ManifestError> {
    info!("emitting manifest");

    let tsconfig = project_dir.join(TSCONFIG_FILENAME);
    if !tsconfig.is_file() {
      return Err(ManifestError::ConfigNotFound { path: tsconfig });
    }

    let ordered = self.reorder.ordered_files(project_dir, &tsconfig).await?;
    let entries = self.rewrite.apply(project_dir, &ordered);

    let manifest_path = project_dir.join(MANIFEST_FILENAME);
    let mut document = read_manifest(&manifest_path)?;
    replace_entries(&mut document, &entries);
    write_manifest(&manifest_path, &document)?;

    info!(entries = entries.len(), "manifest emitted");
    Ok(EmitReport {
      manifest_path,
      entries,
    })
  }
}

impl<R: Reorder + Sync> Emit for ManifestEmitter<R> {
  async fn emit(&self, project_dir: &Path) -> Result<EmitReport, ManifestError> {
    ManifestEmitter::emit(self, project_dir).await
  }
}
