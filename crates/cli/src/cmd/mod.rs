mod emit;
mod resolve;
mod watch;

pub use emit::cmd_emit;
pub use resolve::cmd_resolve;
pub use watch::cmd_watch;
