//! Tests for `tscwatch emit`.

use predicates::prelude::*;
use serde_json::{Value, json};

use super::common::TestProject;

#[test]
fn emit_rewrites_game_list() {
  let project = TestProject::new();

  project
    .tscwatch_cmd()
    .arg("emit")
    .arg(project.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Manifest updated"))
    .stdout(predicate::str::contains("bin-debug/ui/Panel.js"));

  assert_eq!(
    project.manifest(),
    json!({
      "initial": ["libs/modules/egret/egret.js", "libs/modules/egret/egret.web.js"],
      "game": ["bin-debug/Base.js", "bin-debug/ui/Panel.js", "bin-debug/Main.js"]
    })
  );
}

#[test]
fn emit_keeps_field_order() {
  let project = TestProject::new();

  project.tscwatch_cmd().arg("emit").arg(project.path()).assert().success();

  let text = project.manifest_text();
  assert!(text.find("\"initial\"").unwrap() < text.find("\"game\"").unwrap());
}

#[test]
fn emit_json_output() {
  let project = TestProject::new();

  let output = project
    .tscwatch_cmd()
    .args(["emit", "--output", "json"])
    .arg(project.path())
    .output()
    .unwrap();

  assert!(output.status.success());
  let report: Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(
    report["entries"],
    json!(["bin-debug/Base.js", "bin-debug/ui/Panel.js", "bin-debug/Main.js"])
  );
  assert!(report["manifest_path"].as_str().unwrap().ends_with("manifest.json"));
}

#[test]
fn emit_with_custom_layout() {
  let project = TestProject::new();
  project.write_file(
    "order.sh",
    r#"printf '["src/a.ts", "src/types.d.ts", "src/b.ts"]'"#,
  );

  project
    .tscwatch_cmd()
    .arg("emit")
    .arg(project.path())
    .args(["--source-root", "src", "--out-dir", "dist", "--out-ext", ".mjs"])
    .assert()
    .success();

  assert_eq!(project.manifest()["game"], json!(["dist/a.mjs", "dist/b.mjs"]));
}

#[test]
fn emit_without_manifest_fails() {
  let project = TestProject::new();
  std::fs::remove_file(project.path().join("manifest.json")).unwrap();

  project
    .tscwatch_cmd()
    .arg("emit")
    .arg(project.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("manifest not found"));

  assert!(!project.path().join("manifest.json").exists());
}

#[test]
fn emit_without_tsconfig_fails() {
  let project = TestProject::empty();
  project.write_file("manifest.json", "{}");

  project
    .tscwatch_cmd()
    .arg("emit")
    .arg(project.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("compiler configuration not found"));
}

#[test]
fn emit_with_broken_manifest_fails() {
  let project = TestProject::new();
  project.write_file("manifest.json", "{ \"game\": [");

  project
    .tscwatch_cmd()
    .arg("emit")
    .arg(project.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to parse"));
}

#[test]
fn ordering_failure_leaves_manifest_alone() {
  let project = TestProject::new();
  project.write_file("order.sh", "echo 'tsconfig.json(3,1): error TS1005' >&2\nexit 1\n");
  let before = project.manifest_text();

  project
    .tscwatch_cmd()
    .arg("emit")
    .arg(project.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("ordering utility"))
    .stderr(predicate::str::contains("error TS1005"));

  assert_eq!(project.manifest_text(), before);
}
