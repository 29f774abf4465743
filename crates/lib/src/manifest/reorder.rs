//! The external ordering utility.
//!
//! Dependency-aware ordering of source files is delegated to a separate
//! program. It is run in the project directory with the compiler
//! configuration path as its last argument and must print a JSON array of
//! file names, in load order, on stdout.

use std::future::Future;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::consts::REORDER_ENV;
use crate::platform::paths::launcher;

use super::types::ManifestError;

/// Orders a project's source files so dependencies come first.
pub trait Reorder {
  fn ordered_files(
    &self,
    project_dir: &Path,
    tsconfig: &Path,
  ) -> impl Future<Output = Result<Vec<String>, ManifestError>> + Send;
}

/// Resolves the compiler configuration and sorts its files with
/// `typescript-plus`, which must be installed in the project.
pub const REORDER_SCRIPT: &str = r#"
const path = require("path");
const ts = require("typescript-plus");
const configFile = path.resolve(process.argv[1]);
const text = ts.sys.readFile(configFile);
if (text === undefined) {
  console.error("cannot read " + configFile);
  process.exit(1);
}
const parsed = ts.parseConfigFileTextToJson(configFile, text);
if (parsed.error) {
  console.error(ts.flattenDiagnosticMessageText(parsed.error.messageText, "\n"));
  process.exit(1);
}
const resolved = ts.parseJsonConfigFileContent(parsed.config, ts.sys, path.dirname(configFile));
const program = ts.createProgram(resolved.fileNames, resolved.options);
process.stdout.write(JSON.stringify(ts.reorderSourceFiles(program).sortedFileNames));
"#;

/// Runs the ordering utility as a child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReorder {
  program: String,
  args: Vec<String>,
}

impl CommandReorder {
  pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
    Self {
      program: program.into(),
      args,
    }
  }

  /// The bundled `typescript-plus` script, run through `launcher`.
  pub fn bundled(launcher: impl Into<String>) -> Self {
    Self::new(launcher, vec!["-e".to_string(), REORDER_SCRIPT.to_string()])
  }

  /// Parse a whitespace-separated command line.
  pub fn parse(command: &str) -> Option<Self> {
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some(Self::new(program, parts.collect()))
  }

  /// `TSCWATCH_REORDER` when set, otherwise the bundled script.
  pub fn from_env() -> Self {
    std::env::var(REORDER_ENV)
      .ok()
      .and_then(|command| Self::parse(&command))
      .unwrap_or_else(|| Self::bundled(launcher()))
  }

  pub fn program(&self) -> &str {
    &self.program
  }
}

impl Reorder for CommandReorder {
  async fn ordered_files(&self, project_dir: &Path, tsconfig: &Path) -> Result<Vec<String>, ManifestError> {
    debug!(program = %self.program, tsconfig = %tsconfig.display(), "running ordering utility");

    let output = Command::new(&self.program)
      .args(&self.args)
      .arg(tsconfig)
      .current_dir(project_dir)
      .stdin(Stdio::null())
      .output()
      .await
      .map_err(|source| ManifestError::ReorderSpawn {
        program: self.program.clone(),
        source,
      })?;

    if !output.status.success() {
      return Err(ManifestError::ReorderFailed {
        program: self.program.clone(),
        code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
      });
    }

    parse_file_list(&String::from_utf8_lossy(&output.stdout))
  }
}

/// Parse the utility's stdout: a JSON array of strings.
pub fn parse_file_list(stdout: &str) -> Result<Vec<String>, ManifestError> {
  serde_json::from_str(stdout.trim()).map_err(ManifestError::ReorderOutput)
}
