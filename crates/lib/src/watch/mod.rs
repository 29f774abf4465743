//! Compiler watch sessions.
//!
//! [`start`] spawns the compiler in watch mode and feeds its stdout to a
//! [`WatchSession`], which classifies each chunk and asks an [`Emit`]
//! implementation to regenerate the manifest after every clean compile.

pub mod classify;
pub mod process;
pub mod session;
pub mod sink;

pub use classify::{ChunkSummary, LineStyle, classify_line, split_lines};
pub use process::{ChunkDecoder, WatchError, WatchOptions, resolve_compiler, start};
pub use session::{CycleDecision, Emit, SessionState, WatchEvent, WatchSession};
pub use sink::{MemorySink, OutputSink};
