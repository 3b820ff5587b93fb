// Kirjuri CLI - extract person records from a scanned registry
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use kirjuri::config::ExtractorConfig;
use kirjuri::document;
use kirjuri::export::{self, Format};
use kirjuri::extraction::{Mode, Pipeline};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// PDF or plain-text document to read
    input: PathBuf,
    /// Where accepted records are written
    accepted: PathBuf,
    /// Where skipped candidates are written
    skipped: PathBuf,
    /// TOML file overriding the built-in reference data
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = Mode::Structural)]
    mode: Mode,
    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    format: Format,
    /// Birth-date search window in characters
    #[arg(short, long)]
    window: Option<usize>,
    /// Print a JSON summary to stdout
    #[arg(long)]
    summary: bool,
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => ExtractorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ExtractorConfig::default(),
    };
    if let Some(window) = args.window {
        config.date_window = window;
    }
    let pipeline = Pipeline::from_config(&config).context("Invalid extractor configuration")?;

    // Nothing is written unless the document opens.
    let text = document::load_text(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let extraction = pipeline.extract(&text, args.mode);

    export::write_file(&args.accepted, &extraction.accepted, args.format)
        .with_context(|| format!("Failed to write {}", args.accepted.display()))?;
    export::write_file(&args.skipped, &extraction.skipped, args.format)
        .with_context(|| format!("Failed to write {}", args.skipped.display()))?;

    let summary = extraction.summary();
    info!(
        "{}: {} candidates, {} accepted, {} skipped",
        args.input.display(),
        summary.candidates,
        summary.accepted,
        summary.skipped
    );
    if args.summary {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
