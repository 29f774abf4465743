use std::io;
use std::path::{Path, PathBuf};

use crate::consts::{DEFAULT_LAUNCHER, LAUNCHER_ENV};

/// Directory that holds installed packages, searched from the project upwards.
const NODE_MODULES: &str = "node_modules";

/// Entry point of a compiler package, relative to the package root.
const COMPILER_BIN: &str = "bin/tsc";

/// Returns the program used to launch JavaScript entry points.
///
/// `TSCWATCH_NODE` wins over the default `node`.
pub fn launcher() -> String {
  match std::env::var(LAUNCHER_ENV) {
    Ok(value) if !value.trim().is_empty() => value,
    _ => DEFAULT_LAUNCHER.to_string(),
  }
}

/// Canonicalize a project directory without the `\\?\` prefix on Windows.
pub fn project_dir(path: &Path) -> io::Result<PathBuf> {
  dunce::canonicalize(path)
}

/// Locate `<compiler>/bin/tsc` the way a package manager would.
///
/// A compiler given as a path (absolute, or starting with `.`) is taken as the
/// package root relative to `start`. Otherwise every `node_modules` directory
/// from `start` up to the filesystem root is searched.
pub fn compiler_entry(start: &Path, compiler: &str) -> Option<PathBuf> {
  let as_path = Path::new(compiler);
  if as_path.is_absolute() || compiler.starts_with('.') {
    let entry = start.join(as_path).join(COMPILER_BIN);
    return entry.is_file().then_some(entry);
  }

  start
    .ancestors()
    .map(|dir| dir.join(NODE_MODULES).join(compiler).join(COMPILER_BIN))
    .find(|entry| entry.is_file())
}
