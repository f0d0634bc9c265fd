//! Augment command-line tool
//!
//! Expands marker decorators on TypeScript classes into generated members,
//! and runs expanded files with the reference evaluator.

mod commands;
mod diagnostics;
mod output;

use std::path::PathBuf;

use augment_engine::Augmenter;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::expand::{ExpandOptions, OutputFormat};
use output::{resolve_color_choice, StyledOutput};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "AUGMENT_LOG";

#[derive(Parser)]
#[command(name = "augment")]
#[command(about = "Compile-time class augmentation for TypeScript", long_about = None)]
#[command(version)]
struct Cli {
    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Color output: auto, always, never
    #[arg(long, global = true)]
    color: Option<String>,

    /// Configuration file (defaults to the nearest augment.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand marked classes
    Expand {
        /// Files or directories to expand
        #[arg(default_value = ".")]
        files: Vec<String>,
        /// Write expanded files here instead of stdout
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
        /// Exit with status 1 if any file would change
        #[arg(long)]
        check: bool,
        /// Output format
        #[arg(long, value_enum, default_value = "pretty")]
        format: OutputFormat,
    },

    /// Expand a file and run it
    Run {
        /// Input file
        file: PathBuf,
    },

    /// List recognized markers
    Markers,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut out = StyledOutput::new(resolve_color_choice(cli.color.as_deref()));
    let config = commands::config::load(cli.config.as_deref())?;
    let augmenter = Augmenter::with_config(config);

    let code = match cli.command {
        Commands::Expand {
            files,
            out_dir,
            check,
            format,
        } => {
            let options = ExpandOptions {
                files,
                out_dir,
                check,
                format,
            };
            commands::expand::execute(&augmenter, options, &mut out)?
        }

        Commands::Run { file } => commands::run::execute(&augmenter, &file, &mut out)?,

        Commands::Markers => {
            commands::markers::execute(&augmenter, &mut out)?;
            0
        }
    };

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
