// src/main.rs
mod utils;
mod election;
mod extractors;
mod pipeline;
mod report;
mod storage;

use clap::Parser;
use election::config::{DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE};
use election::{ElectionConfig, PageSource};
use extractors::text_pattern::HIGHLIGHT_PATTERNS;
use extractors::TracingObserver;
use storage::StorageManager;
use utils::AppError;

/// Extracts candidate results from a saved TSE results page
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Saved HTML snapshot of the results page
    #[arg(short, long, env = "TSE_INPUT", default_value = DEFAULT_INPUT_FILE)]
    input: String,

    /// Output directory for the JSON report
    #[arg(short, long, default_value = ".")]
    output_dir: String,

    /// File name of the JSON report
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    output_file: String,

    /// JSON file with report metadata (municipio, estado, cargo, ano, ...)
    #[arg(short, long)]
    config: Option<String>,

    /// Number of leading text-pattern records flagged as elected
    #[arg(long, env = "TSE_ELECTED_SEATS")]
    elected_seats: Option<usize>,

    /// Debug mode - save an annotated copy of the page with pattern hits highlighted
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting extraction for args: {:?}", args);

    // 3. Resolve configuration
    let mut config = match &args.config {
        Some(path) => ElectionConfig::from_file(path)?,
        None => ElectionConfig::default(),
    };
    if let Some(seats) = args.elected_seats {
        tracing::debug!("Setting elected seats to {} from command-line argument", seats);
        config.elected_seats = seats;
    }
    tracing::info!("TSE HTML parser - {} candidates, {}/{} {}", config.cargo, config.municipio, config.estado, config.ano);

    // 4. Load the page; an unreadable page is treated as one with no candidates
    let page = PageSource::load_or_empty(&args.input);

    let storage = StorageManager::new(&args.output_dir)?;

    if args.debug && !page.html.is_empty() {
        let annotated = storage.debug_dir()?.join("page_annotated.html");
        match utils::html_debug::create_debug_html(&page.html, &annotated, &HIGHLIGHT_PATTERNS) {
            Ok(count) => tracing::info!("Created annotated debug HTML with {} highlights: {}", count, annotated.display()),
            Err(e) => tracing::warn!("Failed to create debug HTML: {}", e),
        }
    }

    // 5. Run the extraction cascade
    let mut observer = TracingObserver;
    let candidates = pipeline::extract_candidates(&page, &config, &mut observer);

    if candidates.is_empty() {
        tracing::warn!("No candidates were extracted from {}", args.input);
        return Ok(());
    }

    // 6. Sort, wrap and save
    let report = report::build_report(candidates, &config);
    let path = storage.save_report(&report, &args.output_file)?;
    tracing::info!("Data saved to: {} (output dir {})", path.display(), storage.base_dir().display());
    report::log_preview(&report);

    Ok(())
}
