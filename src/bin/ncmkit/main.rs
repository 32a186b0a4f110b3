//! `ncmkit` CLI.

mod commands;
mod error;
/// Console output gated by `--quiet`/`--verbose`.
mod output;
/// `config.toml` defaults for `dump`.
mod settings;
/// ID3 tag writing for recovered streams.
mod tagging;
mod util;

use clap::{Parser, Subcommand};
use error::{CliError, Result};
use output::{Output, Verbosity};
use settings::Settings;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        Output::error_user(err.user_message());
        std::process::exit(1);
    }
}

#[derive(Parser)]
#[command(name = "ncmkit")]
#[command(about = "NCM container decoder", version)]
#[command(arg_required_else_help = true)]
/// Top-level arguments.
struct Cli {
    /// Verbose output (stage-level diagnostics on stderr).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (only errors).
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Settings file (default: ~/.ncmkit/config.toml).
    #[arg(long, global = true, value_name = "PATH", env = "NCMKIT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode containers and write the recovered audio.
    Dump(commands::dump::CmdArgs),

    /// Show format and track metadata without writing anything.
    Info(commands::info::CmdArgs),
}

/// State shared by every subcommand.
struct Context {
    out: Output,
    /// Loaded once; flags on the subcommand take precedence.
    settings: Settings,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let verbosity = match (cli.quiet, cli.verbose) {
        (true, true) => {
            return Err(CliError::Message(
                "--quiet and --verbose cannot be used together".to_string(),
            ))
        }
        (true, false) => Verbosity::Quiet,
        (false, true) => Verbosity::Verbose,
        (false, false) => Verbosity::Normal,
    };
    if verbosity == Verbosity::Verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(false)
            .try_init()
            .map_err(|err| CliError::Message(err.to_string()))?;
    }

    let settings = Settings::load(cli.config.as_deref())?;
    let ctx = Context {
        out: Output::new(verbosity),
        settings,
    };
    ctx.out
        .info_diag(format!("settings: {:?}", ctx.settings));

    match cli.command {
        Commands::Dump(args) => commands::dump::run(&ctx, &args),
        Commands::Info(args) => commands::info::run(&ctx, &args),
    }
}
