//! Spawning the compiler and feeding its output to a session.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use crate::consts::{DEFAULT_COMPILER, WATCH_FLAG};
use crate::platform::paths::{compiler_entry, launcher};

use super::session::{Emit, WatchEvent, WatchSession};
use super::sink::OutputSink;

/// Size of a single stdout read.
const READ_BUFFER: usize = 8 * 1024;

/// Errors that stop a watch session from running.
#[derive(Debug, Error)]
pub enum WatchError {
  #[error("cannot find compiler '{compiler}' from {}", searched_from.display())]
  CompilerNotFound { compiler: String, searched_from: PathBuf },

  #[error("failed to spawn {program}: {source}")]
  Spawn { program: String, source: std::io::Error },

  #[error("compiler stdout was not captured")]
  MissingStdout,

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// What to watch and how to launch the compiler.
#[derive(Debug, Clone)]
pub struct WatchOptions {
  /// Working directory of the compiler; also where the manifest lives.
  pub project_dir: PathBuf,
  /// Compiler package name, or a path to the package root.
  pub compiler: String,
  /// Program that runs the compiler entry point.
  pub launcher: String,
  /// Shell command run after every successful emission.
  pub on_success: Option<String>,
}

impl WatchOptions {
  /// Options with the launcher taken from the environment.
  pub fn new(project_dir: impl Into<PathBuf>, compiler: impl Into<String>) -> Self {
    Self {
      project_dir: project_dir.into(),
      compiler: compiler.into(),
      launcher: launcher(),
      on_success: None,
    }
  }

  pub fn with_launcher(mut self, launcher: impl Into<String>) -> Self {
    self.launcher = launcher.into();
    self
  }

  pub fn with_on_success(mut self, cmd: Option<String>) -> Self {
    self.on_success = cmd;
    self
  }
}

impl Default for WatchOptions {
  fn default() -> Self {
    Self::new(".", DEFAULT_COMPILER)
  }
}

/// Resolve the entry point of `compiler`, searching from `project_dir`.
pub fn resolve_compiler(project_dir: &Path, compiler: &str) -> Result<PathBuf, WatchError> {
  compiler_entry(project_dir, compiler).ok_or_else(|| WatchError::CompilerNotFound {
    compiler: compiler.to_string(),
    searched_from: project_dir.to_path_buf(),
  })
}

/// Run the compiler in watch mode until it closes its stdout.
///
/// Each read from the compiler is handed to a [`WatchSession`]; emission for
/// a chunk finishes before the next read. Returns the compiler's exit status.
pub async fn start<E, S>(
  options: &WatchOptions,
  emitter: E,
  sink: S,
  events: Option<UnboundedSender<WatchEvent>>,
) -> Result<ExitStatus, WatchError>
where
  E: Emit,
  S: OutputSink,
{
  info!(compiler = %options.compiler, "using compiler {}, starting watch", options.compiler);

  let entry = resolve_compiler(&options.project_dir, &options.compiler)?;
  debug!(launcher = %options.launcher, entry = %entry.display(), "spawning compiler");

  let mut child = Command::new(&options.launcher)
    .arg(&entry)
    .arg(WATCH_FLAG)
    .current_dir(&options.project_dir)
    .stdin(Stdio::null())
    .stdout(Stdio::piped())
    .stderr(Stdio::inherit())
    .kill_on_drop(true)
    .spawn()
    .map_err(|source| WatchError::Spawn {
      program: options.launcher.clone(),
      source,
    })?;

  let mut stdout = child.stdout.take().ok_or(WatchError::MissingStdout)?;

  let mut session = WatchSession::new(&options.project_dir, emitter, sink);
  if let Some(events) = events {
    session = session.with_events(events);
  }
  if let Some(cmd) = &options.on_success {
    session = session.with_hook(cmd.clone());
  }

  let mut decoder = ChunkDecoder::default();
  let mut buffer = vec![0u8; READ_BUFFER];
  loop {
    let read = stdout.read(&mut buffer).await?;
    if read == 0 {
      break;
    }
    if let Some(chunk) = decoder.push(&buffer[..read]) {
      session.process_chunk(&chunk).await;
    }
  }
  if let Some(rest) = decoder.finish() {
    session.process_chunk(&rest).await;
  }

  let status = child.wait().await?;
  info!(status = %status, "compiler exited");
  Ok(status)
}

/// Turns raw reads into text made of whole lines.
///
/// Bytes after the last newline are held back until the next read so that a
/// line split across reads is classified once, and so that a multi-byte
/// character is never cut in half.
#[derive(Debug, Default)]
pub struct ChunkDecoder {
  pending: Vec<u8>,
}

impl ChunkDecoder {
  /// Add a read; returns the complete lines it finished, if any.
  pub fn push(&mut self, bytes: &[u8]) -> Option<String> {
    self.pending.extend_from_slice(bytes);
    let end = self.pending.iter().rposition(|b| *b == b'\n')? + 1;
    let complete: Vec<u8> = self.pending.drain(..end).collect();
    Some(String::from_utf8_lossy(&complete).into_owned())
  }

  /// Flush whatever is left once the stream has ended.
  pub fn finish(&mut self) -> Option<String> {
    if self.pending.is_empty() {
      return None;
    }
    let rest = std::mem::take(&mut self.pending);
    Some(String::from_utf8_lossy(&rest).into_owned())
  }
}
