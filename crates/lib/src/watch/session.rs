//! Compile cycle tracking for one watch session.
//!
//! A session owns its state: nothing here is global, so several projects can
//! be watched from one process.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::hook::run_hook;
use crate::manifest::{EmitReport, ManifestError};

use super::classify::{ChunkSummary, classify_line, split_lines};
use super::sink::OutputSink;

/// Regenerates the manifest after a clean compile.
pub trait Emit {
  fn emit(&self, project_dir: &Path) -> impl Future<Output = Result<EmitReport, ManifestError>> + Send;
}

/// Notifications published while a session runs.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
  /// The compiler started a new build pass.
  CycleStarted,
  /// A build pass completed with errors; the manifest was left alone.
  Skipped,
  /// A build pass completed cleanly; the manifest is being rewritten.
  Emitting {
    /// Set only for the first clean compile of the session.
    first_compile: Option<Duration>,
  },
  /// The manifest was rewritten.
  ManifestEmitted { report: EmitReport },
  /// A build pass completed cleanly but the manifest could not be written.
  EmitFailed { message: String },
  /// The success hook exited non-zero or could not be started.
  HookFailed { message: String },
}

/// What a chunk of output asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDecision {
  /// No cycle ended in this chunk.
  Pending,
  /// A cycle ended but had errors.
  Skip,
  /// A cycle ended cleanly.
  Emit { first_compile: Option<Duration> },
}

/// Mutable state of a session.
#[derive(Debug)]
pub struct SessionState {
  had_errors: bool,
  first_compile_done: bool,
  timer_start: Instant,
}

impl Default for SessionState {
  fn default() -> Self {
    Self::new()
  }
}

impl SessionState {
  pub fn new() -> Self {
    Self {
      had_errors: false,
      first_compile_done: false,
      timer_start: Instant::now(),
    }
  }

  /// Whether the current cycle has reported an error diagnostic.
  pub fn had_errors(&self) -> bool {
    self.had_errors
  }

  /// Whether a clean compile has been seen since the session started.
  pub fn first_compile_done(&self) -> bool {
    self.first_compile_done
  }

  /// Fold one chunk's markers into the state.
  ///
  /// Markers are applied in a fixed order: start clears errors, errors set
  /// the flag, completion is judged last.
  pub fn observe(&mut self, summary: &ChunkSummary) -> CycleDecision {
    if summary.cycle_started {
      self.had_errors = false;
    }
    if summary.has_errors {
      self.had_errors = true;
    }
    if !summary.cycle_completed {
      return CycleDecision::Pending;
    }
    if self.had_errors {
      return CycleDecision::Skip;
    }

    let first_compile = if self.first_compile_done {
      None
    } else {
      self.first_compile_done = true;
      let elapsed = self.timer_start.elapsed();
      self.timer_start = Instant::now();
      Some(elapsed)
    };

    CycleDecision::Emit { first_compile }
  }
}

/// Drives the state machine from raw compiler output.
pub struct WatchSession<E, S> {
  project_dir: PathBuf,
  state: SessionState,
  emitter: E,
  sink: S,
  events: Option<UnboundedSender<WatchEvent>>,
  hook: Option<String>,
}

impl<E: Emit, S: OutputSink> WatchSession<E, S> {
  pub fn new(project_dir: impl Into<PathBuf>, emitter: E, sink: S) -> Self {
    Self {
      project_dir: project_dir.into(),
      state: SessionState::new(),
      emitter,
      sink,
      events: None,
      hook: None,
    }
  }

  /// Publish [`WatchEvent`]s to `events`.
  pub fn with_events(mut self, events: UnboundedSender<WatchEvent>) -> Self {
    self.events = Some(events);
    self
  }

  /// Run `cmd` in the project directory after every successful emission.
  pub fn with_hook(mut self, cmd: impl Into<String>) -> Self {
    self.hook = Some(cmd.into());
    self
  }

  pub fn state(&self) -> &SessionState {
    &self.state
  }

  pub fn sink(&self) -> &S {
    &self.sink
  }

  /// Handle one chunk of compiler stdout.
  ///
  /// Lines are echoed to the sink first. When the chunk completes a clean
  /// cycle the manifest is emitted, and the hook run, before this returns.
  pub async fn process_chunk(&mut self, chunk: &str) -> CycleDecision {
    let lines = split_lines(chunk);
    for line in &lines {
      self.sink.line(line, classify_line(line));
    }

    let summary = ChunkSummary::from_lines(&lines);
    if summary.cycle_started {
      debug!("compilation cycle started");
      self.publish(WatchEvent::CycleStarted);
    }

    let decision = self.state.observe(&summary);
    match decision {
      CycleDecision::Pending => {}
      CycleDecision::Skip => {
        warn!("compilation had errors, skipping manifest");
        self.publish(WatchEvent::Skipped);
      }
      CycleDecision::Emit { first_compile } => {
        if let Some(elapsed) = first_compile {
          info!(elapsed_ms = elapsed.as_millis() as u64, "first compile took {}ms", elapsed.as_millis());
        }
        self.publish(WatchEvent::Emitting { first_compile });
        match self.emitter.emit(&self.project_dir).await {
          Ok(report) => {
            self.publish(WatchEvent::ManifestEmitted { report });
            self.run_hook().await;
          }
          Err(e) => {
            warn!(error = %e, "manifest emission failed");
            self.publish(WatchEvent::EmitFailed { message: e.to_string() });
          }
        }
      }
    }

    decision
  }

  async fn run_hook(&self) {
    let Some(cmd) = &self.hook else {
      return;
    };
    if let Err(e) = run_hook(cmd, &self.project_dir).await {
      warn!(error = %e, "success hook failed");
      self.publish(WatchEvent::HookFailed { message: e.to_string() });
    }
  }

  fn publish(&self, event: WatchEvent) {
    if let Some(events) = &self.events {
      // A closed receiver only means nobody is listening any more.
      let _ = events.send(event);
    }
  }
}
