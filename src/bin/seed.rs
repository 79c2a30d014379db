//! `linux_helper seed`
//!
//! Writes the built-in command catalog, with stable ids, to the configured
//! catalog path. Any existing snapshot is replaced.
//!
//! Usage:
//!   cargo run --bin seed
//!   cargo run --bin seed -- --output commands.json

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use linux_helper::config::Config;
use linux_helper::io_util::write_json;
use linux_helper::{logging, MemoryCatalog};

#[derive(Parser)]
#[command(name = "seed", about = "Write the built-in command catalog to disk", version)]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Destination; overrides the configured catalog path
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    logging::init(&config.logging.level);
    config.log_summary();

    let catalog = MemoryCatalog::builtin().context("building seed catalog")?;
    let path = cli.output.unwrap_or(config.catalog.path);

    info!(records = catalog.len(), path = %path.display(), "seeding catalog");
    write_json(&path, catalog.commands())
        .with_context(|| format!("writing catalog to {}", path.display()))?;

    println!("Seeded {} commands into '{}'.", catalog.len(), path.display());
    Ok(())
}
