//! Best-effort extraction of a cited source's title and text.
//!
//! Cited pages are third-party and unreliable: paywalls, consent redirects,
//! client-side rendering and plain broken markup are all common. Extraction
//! therefore runs an ordered cascade of [`Extractor`] stages, cheapest first:
//!
//! | Stage | Module | Cost | Gives up when |
//! |-------|--------|------|---------------|
//! | `readability` | [`readability`] | static parse | non-200, parse error, text < 100 chars |
//! | `boilerplate` | [`boilerplate`] | plain HTTP GET | non-200, text < 50 chars |
//! | `browser` | [`browser`] | headless Chrome | WebDriver/navigation error or deadline |
//!
//! Each stage reports failure as an [`ExtractionFailure`] value. The
//! [`SourceExtractor`] logs it and moves on to the next stage, stopping at the
//! first success. When every stage fails it returns a sentinel whose title is
//! the URL and whose text is `[Extraction failed: <last failure>]`, so callers
//! always get an [`ExtractedContent`].

pub mod boilerplate;
pub mod browser;
pub mod readability;

use crate::config::Config;
use crate::fetch::{FetchError, PageFetcher};
use crate::models::ExtractedContent;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Why a single extraction stage did not produce content.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionFailure {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("HTTP status {0}")]
    Status(u16),

    /// The page parsed but yielded too little text to be an article.
    #[error("{stage} text too short ({len} < {min} chars)")]
    TooShort {
        stage: &'static str,
        len: usize,
        min: usize,
    },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("browser error: {0}")]
    Browser(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("no extraction stages configured")]
    NoStages,
}

/// One strategy for turning a URL into content.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Short stage name used in logs.
    fn name(&self) -> &'static str;

    async fn attempt(&self, url: &str) -> Result<ExtractedContent, ExtractionFailure>;
}

/// Ordered cascade of extraction stages.
pub struct SourceExtractor {
    stages: Vec<Box<dyn Extractor>>,
}

impl SourceExtractor {
    pub fn new(stages: Vec<Box<dyn Extractor>>) -> Self {
        Self { stages }
    }

    /// The standard cascade: readability, then raw fetch + boilerplate
    /// removal, then (if enabled) headless browser rendering.
    pub fn from_config(config: Arc<Config>, fetcher: Arc<dyn PageFetcher>) -> Self {
        let mut stages: Vec<Box<dyn Extractor>> = vec![
            Box::new(readability::ReadabilityExtractor::new(
                Arc::clone(&fetcher),
                config.http.fetch_timeout(),
                config.extraction.readability_min_chars,
            )),
            Box::new(boilerplate::RawFetchExtractor::new(
                fetcher,
                config.http.fetch_timeout(),
                config.extraction.boilerplate_min_chars,
            )),
        ];
        if config.browser.enabled {
            let renderer = browser::WebDriverRenderer::new(config.browser.clone());
            stages.push(Box::new(browser::BrowserExtractor::new(Arc::new(renderer))));
        } else {
            info!("Browser stage disabled");
        }
        Self::new(stages)
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Extract `url`, walking the cascade until a stage succeeds.
    ///
    /// Never fails; see the module docs for the sentinel on exhaustion.
    #[instrument(level = "info", skip_all, fields(%url))]
    pub async fn extract(&self, url: &str) -> ExtractedContent {
        let mut last_failure = ExtractionFailure::NoStages;

        for stage in &self.stages {
            match stage.attempt(url).await {
                Ok(content) => {
                    info!(
                        stage = stage.name(),
                        chars = content.text.len(),
                        "Extracted source"
                    );
                    return content;
                }
                Err(failure) => {
                    warn!(stage = stage.name(), reason = %failure, "Stage failed; falling back");
                    last_failure = failure;
                }
            }
        }

        error!(reason = %last_failure, "All extraction stages failed");
        failure_content(url, &last_failure)
    }
}

/// Sentinel content for a URL no stage could extract.
pub fn failure_content(url: &str, failure: &ExtractionFailure) -> ExtractedContent {
    let text = format!("[Extraction failed: {failure}]");
    debug!(%url, %text, "Built failure sentinel");
    ExtractedContent {
        title: url.to_string(),
        text: text.trim().to_string(),
    }
}

/// Title fallback: trimmed candidate, or the URL when missing or blank.
pub(crate) fn title_or_url(candidate: Option<&str>, url: &str) -> String {
    match candidate.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => url.to_string(),
    }
}
