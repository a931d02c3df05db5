//! # Wikinews Sources
//!
//! Collects Wikinews articles, follows each article's cited sources, and
//! extracts the referenced text so articles can be compared with the
//! material they were written from.
//!
//! ## Usage
//!
//! ```sh
//! wikinews_sources -o ./out
//! ```
//!
//! ## Architecture
//!
//! 1. **Harvesting**: fetch each Wikinews page, keep its story paragraphs and
//!    the links in its "Sources" section
//! 2. **Extraction**: pull title and text from every cited link through a
//!    fallback cascade (readability → raw fetch → headless browser)
//! 3. **Assembly**: normalize text, count words, bin article length
//! 4. **Output**: write the records as JSON and CSV

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod extractors;
mod fetch;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod seeds;
mod utils;

use cli::Cli;
use config::Config;
use extractors::SourceExtractor;
use fetch::{HttpFetcher, PageFetcher};
use outputs::{csv, json, output_path};
use pipeline::Pipeline;
use scrapers::wikinews::WikinewsHarvester;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("wikinews_sources starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = args.apply_overrides(Config::load(args.config.as_deref()).await?);
    info!(
        browser = config.browser.enabled,
        webdriver = %config.browser.webdriver_url,
        concurrency = config.pipeline.concurrency,
        "Configuration ready"
    );
    let config = Arc::new(config);

    // Fail before any network work if outputs can't be written
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let descriptors = match &args.seeds {
        Some(path) => seeds::load_seeds(path).await?,
        None => seeds::default_seeds(),
    };
    info!(count = descriptors.len(), "Seed descriptors ready");

    // ---- Wire the pipeline ----
    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new(&config.http)?);
    let harvester = WikinewsHarvester::new(Arc::clone(&fetcher), config.http.harvest_timeout());
    let extractor = SourceExtractor::from_config(Arc::clone(&config), fetcher);
    info!(stages = ?extractor.stage_names(), "Extraction cascade ready");
    let pipeline = Pipeline::new(harvester, extractor, &config.pipeline);

    let records = pipeline.process_all(&descriptors).await;

    // ---- Output ----
    let json_path = output_path(&args.output_dir, &args.json_name);
    if let Err(e) = json::write_records(&records, &json_path).await {
        error!(path = %json_path, error = %e, "Failed to write JSON");
    }
    let csv_path = output_path(&args.output_dir, &args.csv_name);
    if let Err(e) = csv::write_records(&records, &csv_path).await {
        error!(path = %csv_path, error = %e, "Failed to write CSV");
    }

    // ---- Preview ----
    for record in &records {
        info!(
            title = %record.title,
            article_wc = record.word_count,
            bin = %record.word_count_bin,
            sources = record.source_links.len(),
            source_wc = record.word_count_source_data,
            "Record"
        );
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        records = records.len(),
        "Execution complete"
    );

    Ok(())
}
