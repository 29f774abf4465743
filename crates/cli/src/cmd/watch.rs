//! Implementation of the `tscwatch watch` command.
//!
//! Runs the compiler in watch mode, echoing its output, and rewrites the
//! manifest after every compile that finished without errors. Runs until the
//! compiler exits.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

use tscwatch_lib::manifest::{ManifestEmitter, PathRewrite};
use tscwatch_lib::platform::paths;
use tscwatch_lib::watch::{self, WatchEvent, WatchOptions};

use crate::output::{TerminalSink, format_duration, print_error, print_info, print_success, print_warning};

pub fn cmd_watch(project: &Path, compiler: &str, rewrite: PathRewrite, on_success: Option<String>) -> Result<()> {
  let project_dir =
    paths::project_dir(project).with_context(|| format!("Project directory not found: {}", project.display()))?;

  // The session runs the hook itself, so it finishes before the next chunk is read.
  let options = WatchOptions::new(&project_dir, compiler).with_on_success(on_success);
  let emitter = ManifestEmitter::from_env(rewrite);

  print_info(&format!("Using compiler {}, starting watch in {}", compiler, project_dir.display()));

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let status = rt.block_on(async {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let reporter = tokio::spawn(report_events(rx));

    let status = watch::start(&options, emitter, TerminalSink, Some(tx)).await;

    // The sender is gone once `start` returns, so the reporter drains and stops.
    if let Err(e) = reporter.await {
      print_error(&format!("Event reporter stopped: {}", e));
    }
    status
  })?;

  debug!(%status, "compiler exited");
  if !status.success() {
    bail!("compiler exited with {}", status);
  }

  print_info("Compiler exited");
  Ok(())
}

/// Print session notifications.
async fn report_events(mut events: UnboundedReceiver<WatchEvent>) {
  while let Some(event) = events.recv().await {
    match event {
      WatchEvent::CycleStarted => {}
      WatchEvent::Skipped => print_warning("Compilation had errors, manifest not updated"),
      WatchEvent::Emitting { first_compile } => {
        if let Some(elapsed) = first_compile {
          print_info(&format!("First compile took {}", format_duration(elapsed)));
        }
        print_info("Emitting manifest");
      }
      WatchEvent::ManifestEmitted { report } => {
        print_success(&format!("Manifest updated ({} file(s))", report.entries.len()));
        info!(path = %report.manifest_path.display(), entries = report.entries.len(), "manifest updated");
      }
      WatchEvent::EmitFailed { message } => print_error(&format!("Manifest emission failed: {}", message)),
      WatchEvent::HookFailed { message } => print_error(&format!("Success hook failed: {}", message)),
    }
  }
}
