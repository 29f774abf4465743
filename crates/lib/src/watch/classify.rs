//! Compiler output classification.
//!
//! Every pattern the watcher knows about lives here. The compiler's wording is
//! the only contract we have with it, so a change in its diagnostics should
//! only ever need an edit to this file.

use std::sync::LazyLock;

use regex::Regex;

/// A new incremental build pass has begun.
static CYCLE_START: LazyLock<Regex> = LazyLock::new(|| compile(r"Starting incremental compilation"));

/// The build pass finished and the compiler went back to watching.
static CYCLE_COMPLETE: LazyLock<Regex> =
  LazyLock::new(|| compile(r" Compilation complete\. Watching for file changes\."));

/// Generic success wording, used only for coloring.
static SUCCESS: LazyLock<Regex> = LazyLock::new(|| compile(r"Compilation complete"));

/// A diagnostic of the form `file.ts(12,5): error TS2304: ...`.
static ERROR: LazyLock<Regex> = LazyLock::new(|| compile(r"\(\d+,\d+\): error TS\d+:"));

fn compile(pattern: &str) -> Regex {
  Regex::new(pattern).expect("built-in pattern is valid")
}

/// How a single line should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
  /// Compiler diagnostic reporting an error.
  Error,
  /// Compiler reporting a finished build.
  Success,
  /// Anything else.
  Plain,
}

/// Pick the render style for a line. Errors win over success wording.
pub fn classify_line(line: &str) -> LineStyle {
  if ERROR.is_match(line) {
    LineStyle::Error
  } else if SUCCESS.is_match(line) {
    LineStyle::Success
  } else {
    LineStyle::Plain
  }
}

/// Split a chunk of compiler output into lines.
///
/// Empty lines and lines made of a lone carriage return are dropped; other
/// lines are kept verbatim.
pub fn split_lines(chunk: &str) -> Vec<&str> {
  chunk.split('\n').filter(|line| !line.is_empty() && *line != "\r").collect()
}

/// Which markers appear anywhere in a chunk.
///
/// Decisions are made per chunk, not per line: a chunk that contains a start
/// marker and an error line reports both, regardless of their order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkSummary {
  pub cycle_started: bool,
  pub has_errors: bool,
  pub cycle_completed: bool,
}

impl ChunkSummary {
  pub fn from_lines(lines: &[&str]) -> Self {
    Self {
      cycle_started: lines.iter().any(|line| CYCLE_START.is_match(line)),
      has_errors: lines.iter().any(|line| ERROR.is_match(line)),
      cycle_completed: lines.iter().any(|line| CYCLE_COMPLETE.is_match(line)),
    }
  }

  /// True when no marker matched.
  pub fn is_empty(&self) -> bool {
    *self == Self::default()
  }
}
