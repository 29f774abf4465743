//! Implementation of the `tscwatch resolve` command.

use std::path::Path;

use anyhow::{Context, Result};

use tscwatch_lib::platform::paths;
use tscwatch_lib::watch::resolve_compiler;

pub fn cmd_resolve(project: &Path, compiler: &str) -> Result<()> {
  let project_dir =
    paths::project_dir(project).with_context(|| format!("Project directory not found: {}", project.display()))?;

  let entry = resolve_compiler(&project_dir, compiler)?;
  println!("{}", entry.display());

  Ok(())
}
