//! Command-line interface definitions.
//!
//! Flags override values from the optional YAML config file, which in turn
//! override built-in defaults.

use crate::config::Config;
use crate::outputs::{DEFAULT_CSV_NAME, DEFAULT_JSON_NAME};
use clap::Parser;

/// Collect Wikinews articles and the text of the sources they cite.
///
/// # Examples
///
/// ```sh
/// # Built-in seed list, outputs in the current directory
/// wikinews_sources
///
/// # Custom seeds and config, no browser fallback
/// wikinews_sources -s seeds.yaml -c config.yaml -o ./out --no-browser
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory for the JSON and CSV outputs
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Optional path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Seed file (JSON array or YAML list of {date, title, url, category})
    #[arg(short, long)]
    pub seeds: Option<String>,

    /// JSON output file name
    #[arg(long, default_value = DEFAULT_JSON_NAME)]
    pub json_name: String,

    /// CSV output file name
    #[arg(long, default_value = DEFAULT_CSV_NAME)]
    pub csv_name: String,

    /// WebDriver (chromedriver) endpoint for the browser fallback
    #[arg(long, env = "WEBDRIVER_URL")]
    pub webdriver_url: Option<String>,

    /// Skip the headless browser fallback stage
    #[arg(long)]
    pub no_browser: bool,

    /// Seconds to wait after navigation before capturing the rendered page
    #[arg(long)]
    pub settle_secs: Option<u64>,

    /// Number of articles processed at once
    #[arg(long)]
    pub concurrency: Option<usize>,
}

impl Cli {
    /// Apply flag overrides on top of a loaded configuration.
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(url) = &self.webdriver_url {
            config.browser.webdriver_url = url.clone();
        }
        if self.no_browser {
            config.browser.enabled = false;
        }
        if let Some(secs) = self.settle_secs {
            config.browser.settle_secs = secs;
        }
        if let Some(n) = self.concurrency {
            config.pipeline.concurrency = n;
        }
        config
    }
}
