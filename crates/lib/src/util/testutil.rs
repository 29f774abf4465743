//! Test utilities for tscwatch-lib.
//!
//! Fake compilers and fake ordering utilities are plain shell scripts, so the
//! tests that spawn them only run on unix.

use std::path::{Path, PathBuf};

/// Launcher that runs a fake compiler entry point.
#[cfg(unix)]
pub fn sh_launcher() -> &'static str {
  "/bin/sh"
}

/// Install a fake compiler package whose `bin/tsc` runs `script`.
///
/// The script receives `--watch` as `$1` when launched by the watcher.
pub fn fake_compiler(root: &Path, name: &str, script: &str) -> PathBuf {
  let bin = root.join("node_modules").join(name).join("bin");
  std::fs::create_dir_all(&bin).unwrap();
  let entry = bin.join("tsc");
  std::fs::write(&entry, script).unwrap();
  entry
}

/// Write `content` to `relative` inside `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).unwrap();
  }
  std::fs::write(&path, content).unwrap();
  path
}
