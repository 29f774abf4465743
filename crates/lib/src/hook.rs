//! Success hooks.
//!
//! A hook is a shell command run in the project directory after every
//! successful manifest emission.

use std::path::Path;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

/// Errors from running a hook.
#[derive(Debug, Error)]
pub enum HookError {
  #[error("hook failed with exit code {code:?}: {cmd}")]
  Failed { cmd: String, code: Option<i32> },

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// Run `cmd` through the platform shell with `cwd` as working directory.
///
/// The hook inherits the watcher's environment and output streams.
pub async fn run_hook(cmd: &str, cwd: &Path) -> Result<(), HookError> {
  info!(cmd = %cmd, "running success hook");

  let (shell, args) = get_shell();
  debug!(shell = %shell, cwd = ?cwd, "spawning hook");

  let status = Command::new(shell).args(args).arg(cmd).current_dir(cwd).status().await?;

  if !status.success() {
    return Err(HookError::Failed {
      cmd: cmd.to_string(),
      code: status.code(),
    });
  }

  Ok(())
}

/// Shell and the flag that makes it run a command string.
fn get_shell() -> (&'static str, &'static [&'static str]) {
  #[cfg(unix)]
  {
    ("/bin/sh", &["-c"])
  }

  #[cfg(windows)]
  {
    ("cmd.exe", &["/C"])
  }
}
