/// Manifest document rewritten after every clean compile.
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// Compiler configuration consumed by the ordering utility.
pub const TSCONFIG_FILENAME: &str = "tsconfig.json";

/// Manifest field holding the ordered list of output files.
pub const MANIFEST_FIELD: &str = "game";

/// Compiler package used when none is given.
pub const DEFAULT_COMPILER: &str = "typescript";

/// Program used to launch the compiler entry point and the reorder script.
pub const DEFAULT_LAUNCHER: &str = "node";

/// Overrides [`DEFAULT_LAUNCHER`].
pub const LAUNCHER_ENV: &str = "TSCWATCH_NODE";

/// Overrides the ordering utility command (program followed by arguments).
pub const REORDER_ENV: &str = "TSCWATCH_REORDER";

/// Flag that puts the compiler in watch mode.
pub const WATCH_FLAG: &str = "--watch";
