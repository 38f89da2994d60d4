use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Parser;

use rdex::config::{ConfigFile, Settings};
use rdex::scan::CorpusScanner;
use rdex::{index, render, special};

#[derive(Parser)]
#[command(name = "rdex")]
#[command(about = "Builds a cross-reference index of elements and attributes across a resource descriptor corpus")]
struct Cli {
    /// Directory holding the descriptor corpus
    #[arg(short, long)]
    inputs_dir: Option<PathBuf>,

    /// Base URL for cross-reference link targets (no trailing slash)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Descriptor file extension
    #[arg(long)]
    extension: Option<String>,

    /// Read defaults from this config file instead of the user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Suppress the progress bar on stderr
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let file = match &cli.config {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    let settings = Settings::resolve(cli.inputs_dir, cli.base_url, cli.extension, file)?;

    let scanner = CorpusScanner::new(&settings.inputs_dir, &settings.extension);
    let rules = special::default_rules();
    let index = index::build_index_with_progress(&scanner, &rules, cli.quiet)?;

    let output = render::render_index(&index, &settings.base_url, &settings.extension, Local::now());
    io::stdout().write_all(output.as_bytes())?;

    Ok(())
}
