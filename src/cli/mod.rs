//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod build;
mod check;
mod show;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, GeneratorConfig};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Monoglyph - Compile C bitmap icon exports into packed Rust icon sets
#[derive(Parser)]
#[command(name = "monoglyph")]
#[command(about = "Monoglyph - Compile C bitmap icon exports into packed Rust icon sets")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Options for the default `build` command
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Input selection shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Config file (default: monoglyph.toml found by walking up from the current directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// C source containing the icon export (default: icons-input.c)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory receiving icons<size>.rs (default: src/icons)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Literal of an opaque pixel (default: 0xff000000)
    #[arg(long)]
    pub opaque: Option<String>,

    /// Literal of a transparent pixel (default: 0x00000000)
    #[arg(long)]
    pub transparent: Option<String>,

    /// Log progress to stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            input: self.input.clone(),
            out_dir: self.out_dir.clone(),
            opaque: self.opaque.clone(),
            transparent: self.transparent.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate icons<size>.rs, archiving any previous file (default)
    Build {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Validate the input and report what would be generated, without writing
    Check {
        #[command(flatten)]
        common: CommonArgs,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the text-art preview of the glyphs
    Preview {
        #[command(flatten)]
        common: CommonArgs,

        /// Only show the glyph at this 0-based position
        #[arg(long)]
        index: Option<usize>,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        None => with_config(&cli.common, build::run_build),
        Some(Commands::Build { common }) => with_config(&common, build::run_build),
        Some(Commands::Check { common, json }) => {
            with_config(&common, |config| check::run_check(config, json))
        }
        Some(Commands::Preview { common, index }) => {
            with_config(&common, |config| show::run_preview(config, index))
        }
    }
}

fn with_config(
    common: &CommonArgs,
    command: impl FnOnce(&GeneratorConfig) -> ExitCode,
) -> ExitCode {
    init_logging(common.verbose);
    match resolve_config(common) {
        Ok(config) => command(&config),
        Err(code) => code,
    }
}

/// Install the stderr logger; `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env).format_timestamp(None).try_init();
}

/// Load the config file (explicit or discovered) and apply flag overrides.
pub(crate) fn resolve_config(common: &CommonArgs) -> Result<GeneratorConfig, ExitCode> {
    let config = load_config(common.config.as_deref())
        .and_then(|config| merge_cli_overrides(config, &common.overrides()));
    config.map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })
}
