mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tscwatch_lib::consts::DEFAULT_COMPILER;
use tscwatch_lib::manifest::PathRewrite;

use crate::output::{OutputFormat, print_error};

/// tscwatch - run the TypeScript compiler in watch mode and keep manifest.json in load order
#[derive(Parser)]
#[command(name = "tscwatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Watch a project and rewrite its manifest after every clean compile
  Watch {
    /// Project directory containing tsconfig.json and manifest.json
    #[arg(default_value = ".")]
    project: PathBuf,

    /// Compiler package to run (resolved from node_modules)
    #[arg(short, long, default_value = DEFAULT_COMPILER)]
    compiler: String,

    /// Shell command to run after every successful manifest update
    #[arg(long, value_name = "CMD")]
    on_success: Option<String>,

    #[command(flatten)]
    rewrite: RewriteArgs,
  },

  /// Rewrite the manifest once, without compiling
  Emit {
    /// Project directory containing tsconfig.json and manifest.json
    #[arg(default_value = ".")]
    project: PathBuf,

    #[command(flatten)]
    rewrite: RewriteArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// Print the compiler entry point that `watch` would run
  Resolve {
    /// Project directory to search from
    #[arg(default_value = ".")]
    project: PathBuf,

    /// Compiler package to resolve
    #[arg(short, long, default_value = DEFAULT_COMPILER)]
    compiler: String,
  },
}

/// How source files map to manifest entries.
#[derive(Args, Debug, Clone)]
struct RewriteArgs {
  /// Source directory, relative to the project
  #[arg(long, default_value = "Client/src")]
  source_root: String,

  /// Compiled output directory, as written to the manifest
  #[arg(long, default_value = "bin-debug")]
  out_dir: String,

  /// Source file extension
  #[arg(long, default_value = ".ts")]
  source_ext: String,

  /// Compiled file extension
  #[arg(long, default_value = ".js")]
  out_ext: String,

  /// Suffix of type declaration files, which are left out of the manifest
  #[arg(long, default_value = ".d.ts")]
  declaration_suffix: String,
}

impl From<RewriteArgs> for PathRewrite {
  fn from(args: RewriteArgs) -> Self {
    Self {
      source_root: args.source_root,
      output_root: args.out_dir,
      source_ext: args.source_ext,
      output_ext: args.out_ext,
      declaration_suffix: args.declaration_suffix,
    }
  }
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  if let Err(e) = run(cli.command) {
    print_error(&format!("{:#}", e));
    std::process::exit(1);
  }
}

fn run(command: Commands) -> Result<()> {
  match command {
    Commands::Watch {
      project,
      compiler,
      on_success,
      rewrite,
    } => cmd::cmd_watch(&project, &compiler, rewrite.into(), on_success),
    Commands::Emit {
      project,
      rewrite,
      output,
    } => cmd::cmd_emit(&project, rewrite.into(), output),
    Commands::Resolve { project, compiler } => cmd::cmd_resolve(&project, &compiler),
  }
}

fn init_tracing(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::from_default_env()
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}
