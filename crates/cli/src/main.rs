mod cmd;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use splice_lib::BuildOptions;

use crate::cmd::{cmd_build, cmd_list, cmd_spec};
use crate::output::{OutputFormat, print_error};

/// splice - assemble single-file scripts from reusable fragments
#[derive(Parser)]
#[command(name = "splice")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Project directory holding the module library and splice.toml
  #[arg(short = 'C', long, global = true, default_value = ".")]
  project: PathBuf,

  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build a script for every root module
  Build {
    /// Remove indentation, blank lines and body comments
    #[arg(short, long)]
    strip: bool,

    /// Resolve and assemble without writing
    #[arg(long)]
    dry_run: bool,

    /// Only build these output targets
    #[arg(long = "only", value_name = "TARGET")]
    only: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// Build scripts from explicit spec files
  Spec {
    /// Spec files (TOML with a [script] table)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Remove indentation, blank lines and body comments
    #[arg(short, long)]
    strip: bool,
  },

  /// Show root modules and their resolved module order
  List {
    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Build {
      strip,
      dry_run,
      only,
      output,
    } => cmd_build(&cli.project, BuildOptions { strip, dry_run, only }, output),
    Commands::Spec { files, strip } => cmd_spec(&cli.project, &files, strip),
    Commands::List { output } => cmd_list(&cli.project, output),
  };

  if let Err(e) = result {
    print_error(&format!("{:#}", e));
    std::process::exit(1);
  }
}
