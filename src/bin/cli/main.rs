mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use enex_omnivore::Config;

#[derive(Parser)]
#[command(
    name = "enex-omnivore",
    about = "Convert an Evernote .enex export into an Omnivore import CSV",
    version
)]
struct Cli {
    /// Evernote export file (.enex)
    input: PathBuf,

    /// Check that every source URL still responds instead of writing CSV
    #[arg(long, conflicts_with = "preview")]
    verify: bool,

    /// Print what would be exported without writing CSV
    #[arg(long)]
    preview: bool,

    /// Write CSV to this file instead of stdout
    #[arg(short, long, conflicts_with_all = ["verify", "preview"])]
    output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Per-URL timeout in seconds for --verify (default: 8)
    #[arg(long)]
    timeout: Option<u64>,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(timeout) = cli.timeout {
        config.verify.timeout_secs = timeout;
        config.validate().context("Invalid --timeout")?;
    }

    if cli.verify {
        commands::verify::run(&cli.input, &config)?;
    } else if cli.preview {
        commands::preview::run(&cli.input)?;
    } else {
        commands::export::run(&cli.input, cli.output.as_deref(), &config)?;
    }

    Ok(())
}
