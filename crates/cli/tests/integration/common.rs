//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Isolated project directory.
///
/// Starts with `tsconfig.json`, `manifest.json` and a fake ordering utility
/// (`order.sh`) copied from the fixtures.
pub struct TestProject {
  pub temp: TempDir,
}

impl TestProject {
  pub fn new() -> Self {
    let project = Self::empty();
    project.write_file("tsconfig.json", &fixture_content("tsconfig.json"));
    project.write_file("manifest.json", &fixture_content("manifest.json"));
    project.write_file("order.sh", &fixture_content("order.sh"));
    project
  }

  /// A project with no files at all.
  pub fn empty() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  pub fn path(&self) -> &Path {
    self.temp.path()
  }

  /// Write a file relative to the project directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Install a fake compiler package whose entry point is a shell script.
  pub fn install_compiler(&self, name: &str, fixture: &str) {
    self.write_file(&format!("node_modules/{}/bin/tsc", name), &fixture_content(fixture));
  }

  pub fn manifest_text(&self) -> String {
    std::fs::read_to_string(self.path().join("manifest.json")).unwrap()
  }

  pub fn manifest(&self) -> Value {
    serde_json::from_str(&self.manifest_text()).unwrap()
  }

  /// Get a pre-configured Command for the tscwatch binary.
  ///
  /// Sets environment variables for isolated testing:
  /// - `TSCWATCH_NODE`: `/bin/sh`, so fake compilers are shell scripts
  /// - `TSCWATCH_REORDER`: the project's `order.sh`
  pub fn tscwatch_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("tscwatch");
    cmd.env("TSCWATCH_NODE", "/bin/sh");
    cmd.env("TSCWATCH_REORDER", "/bin/sh order.sh");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
