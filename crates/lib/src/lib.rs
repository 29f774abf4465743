//! tscwatch-lib: compiler watch sessions and manifest emission.
//!
//! - `watch`: spawns the compiler in watch mode, classifies its output and
//!   tracks compile cycles
//! - `manifest`: rewrites `manifest.json` with compiled files in load order
//! - `hook`: shell commands run after a successful emission

pub mod consts;
pub mod hook;
pub mod manifest;
pub mod platform;
pub mod util;
pub mod watch;
