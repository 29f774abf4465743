//! Tests for `tscwatch watch` and `tscwatch resolve`.
//!
//! The fake compilers print a fixed transcript and exit, which ends the
//! session.

use predicates::prelude::*;
use serde_json::json;

use super::common::TestProject;

#[test]
fn clean_compile_updates_manifest() {
  let project = TestProject::new();
  project.install_compiler("typescript", "compile_clean.sh");

  project
    .tscwatch_cmd()
    .arg("watch")
    .arg(project.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Using compiler typescript"))
    .stdout(predicate::str::contains("Compilation complete. Watching for file changes."))
    .stdout(predicate::str::contains("First compile took"))
    .stdout(predicate::str::contains("Manifest updated (3 file(s))"));

  assert_eq!(
    project.manifest()["game"],
    json!(["bin-debug/Base.js", "bin-debug/ui/Panel.js", "bin-debug/Main.js"])
  );
}

#[test]
fn compile_errors_skip_manifest() {
  let project = TestProject::new();
  project.install_compiler("typescript", "compile_errors.sh");
  let before = project.manifest_text();

  project
    .tscwatch_cmd()
    .arg("watch")
    .arg(project.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("error TS2304"))
    .stderr(predicate::str::contains("Compilation had errors, manifest not updated"));

  assert_eq!(project.manifest_text(), before);
}

#[test]
fn named_compiler_is_used() {
  let project = TestProject::new();
  project.install_compiler("typescript-plus", "compile_clean.sh");

  project
    .tscwatch_cmd()
    .arg("watch")
    .arg(project.path())
    .args(["--compiler", "typescript-plus"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Using compiler typescript-plus"));
}

#[test]
fn success_hook_runs_after_emission() {
  let project = TestProject::new();
  project.install_compiler("typescript", "compile_clean.sh");

  project
    .tscwatch_cmd()
    .arg("watch")
    .arg(project.path())
    .args(["--on-success", "cp manifest.json hook-saw.json"])
    .assert()
    .success();

  let seen: serde_json::Value =
    serde_json::from_str(&std::fs::read_to_string(project.path().join("hook-saw.json")).unwrap()).unwrap();
  assert_eq!(seen, project.manifest());
}

#[test]
fn failing_hook_is_reported() {
  let project = TestProject::new();
  project.install_compiler("typescript", "compile_clean.sh");

  project
    .tscwatch_cmd()
    .arg("watch")
    .arg(project.path())
    .args(["--on-success", "exit 4"])
    .assert()
    .success()
    .stderr(predicate::str::contains("Success hook failed"));
}

#[test]
fn emission_failure_does_not_stop_watch() {
  let project = TestProject::new();
  project.install_compiler("typescript", "compile_clean.sh");
  std::fs::remove_file(project.path().join("manifest.json")).unwrap();

  project
    .tscwatch_cmd()
    .arg("watch")
    .arg(project.path())
    .assert()
    .success()
    .stderr(predicate::str::contains("Manifest emission failed"))
    .stderr(predicate::str::contains("manifest not found"));
}

#[test]
fn first_compile_time_shown_when_emission_fails() {
  let project = TestProject::new();
  project.install_compiler("typescript", "compile_clean.sh");
  std::fs::remove_file(project.path().join("manifest.json")).unwrap();

  project
    .tscwatch_cmd()
    .arg("watch")
    .arg(project.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("First compile took"))
    .stderr(predicate::str::contains("Manifest emission failed"));
}

#[test]
fn status_notices_need_no_log_filter() {
  let project = TestProject::new();
  project.install_compiler("typescript", "compile_errors.sh");

  let assert = project
    .tscwatch_cmd()
    .arg("watch")
    .arg(project.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Using compiler typescript"))
    .stderr(predicate::str::contains("Compilation had errors, manifest not updated"));

  // Library diagnostics stay behind RUST_LOG; the notices above come from the CLI.
  assert.stderr(predicate::str::contains("WARN").not());
}

#[test]
fn compiler_failure_is_reported() {
  let project = TestProject::new();
  project.write_file("node_modules/typescript/bin/tsc", "echo 'tsc: bad option' >&2\nexit 2\n");

  project
    .tscwatch_cmd()
    .arg("watch")
    .arg(project.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("compiler exited"));
}

#[test]
fn resolve_prints_entry_point() {
  let project = TestProject::new();
  project.install_compiler("typescript", "compile_clean.sh");

  project
    .tscwatch_cmd()
    .arg("resolve")
    .arg(project.path())
    .assert()
    .success()
    .stdout(predicate::str::ends_with("node_modules/typescript/bin/tsc\n"));
}
