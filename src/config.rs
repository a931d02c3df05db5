//! Runtime configuration for harvesting and extraction.
//!
//! Configuration is read once from an optional YAML file, then overridden by
//! CLI flags, then shared read-only with the fetcher, harvester and
//! extractors. Every field has a default, so an empty file is valid.
//!
//! ```yaml
//! http:
//!   harvest_timeout_secs: 20
//!   fetch_timeout_secs: 25
//! extraction:
//!   readability_min_chars: 100
//! browser:
//!   webdriver_url: http://localhost:9515
//!   settle_secs: 5
//! pipeline:
//!   concurrency: 1
//! ```

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::time::Duration;
use tracing::{info, instrument};

/// Browser-like User-Agent sent with every HTTP request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Outbound request headers and timeouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub accept_language: String,
    pub referer: String,
    /// Timeout for fetching a Wikinews article page.
    pub harvest_timeout_secs: u64,
    /// Timeout for fetching a cited source page.
    pub fetch_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            referer: "https://www.google.com/".to_string(),
            harvest_timeout_secs: 20,
            fetch_timeout_secs: 25,
        }
    }
}

impl HttpConfig {
    pub fn harvest_timeout(&self) -> Duration {
        Duration::from_secs(self.harvest_timeout_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Minimum text lengths (in characters) for the early cascade stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub readability_min_chars: usize,
    pub boilerplate_min_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            readability_min_chars: 100,
            boilerplate_min_chars: 50,
        }
    }
}

/// Headless browser stage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// When false the cascade ends after the raw-fetch stage.
    pub enabled: bool,
    /// WebDriver endpoint (chromedriver).
    pub webdriver_url: String,
    /// Fixed wait after navigation for client-side rendering.
    pub settle_secs: u64,
    pub window_width: u32,
    pub window_height: u32,
    /// Deadline for navigation, settling and DOM capture together.
    pub render_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            webdriver_url: "http://localhost:9515".to_string(),
            settle_secs: 5,
            window_width: 1920,
            window_height: 1080,
            render_timeout_secs: 60,
        }
    }
}

impl BrowserConfig {
    pub fn settle(&self) -> Duration {
        Duration::from_secs(self.settle_secs)
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }
}

/// Fan-out limits. `1` keeps the strictly sequential behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Articles processed at once.
    pub concurrency: usize,
    /// Source links of one article extracted at once.
    pub source_concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            source_concurrency: 1,
        }
    }
}

impl Config {
    /// Parse a configuration from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Load configuration from `path`, or defaults when no path is given.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&str>) -> Result<Self, Box<dyn Error>> {
        let Some(path) = path else {
            info!("No config file given; using defaults");
            return Ok(Self::default());
        };
        let text = tokio::fs::read_to_string(path).await?;
        let config = Self::from_yaml(&text)?;
        info!(path, "Loaded configuration");
        Ok(config)
    }
}
