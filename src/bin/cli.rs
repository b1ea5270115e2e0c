//! Wine crawler CLI
//!
//! Pages through the catalog search API and appends new wines to a JSON file.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use wine_crawler::{
    error::Result,
    models::Config,
    pipeline,
    services::ExploreClient,
    storage::LocalStorage,
};

/// Wine catalog crawler
#[derive(Parser, Debug)]
#[command(
    name = "wine-crawler",
    version,
    about = "Scrape wine data from a catalog search API into a de-duplicated JSON file"
)]
struct Cli {
    /// Output .json file
    output_file: PathBuf,

    /// Starting page identifier
    #[arg(
        long = "start-page",
        alias = "start_page",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    start_page: u32,

    /// Path to a TOML config file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Accept the single-dash `-start_page` spelling alongside the clap forms.
fn normalize_legacy_flags(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-start_page") => OsString::from("--start-page"),
            Some(s) if s.starts_with("-start_page=") => {
                OsString::from(format!("--start-page={}", &s["-start_page=".len()..]))
            }
            _ => arg,
        })
        .collect()
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stdout)
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_legacy_flags(std::env::args_os()));
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)?;
            log::info!("Loaded configuration from {}", path.display());
            config
        }
        None => Config::default(),
    };
    config.validate()?;

    let source = ExploreClient::new(&config)?;
    let storage = LocalStorage::new(&cli.output_file);

    log::info!(
        "Searching {} (min_rating={}, price_range_max={}), saving to {}",
        source.endpoint(),
        config.filter.min_rating,
        config.filter.price_range_max,
        cli.output_file.display()
    );

    let summary = pipeline::run_scraper(&config, &source, &storage, cli.start_page)?;

    log::info!(
        "Done: {} matches, {} pages fetched, {} new wines saved",
        summary.records_matched,
        summary.pages_fetched,
        summary.wines_saved
    );

    Ok(())
}
