//! Stage 1: Readability article extraction via `dom_smoothie`.
//!
//! Cheapest stage. A page that does not look like an article (paywall stub,
//! consent wall, index page) tends to come back with only a sentence or two,
//! so anything under the configured minimum is treated as a miss.

use super::{ExtractionFailure, Extractor, title_or_url};
use crate::fetch::PageFetcher;
use crate::models::ExtractedContent;
use async_trait::async_trait;
use dom_smoothie::{Config, Readability};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

pub struct ReadabilityExtractor {
    fetcher: Arc<dyn PageFetcher>,
    timeout: Duration,
    min_chars: usize,
}

impl ReadabilityExtractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>, timeout: Duration, min_chars: usize) -> Self {
        Self {
            fetcher,
            timeout,
            min_chars,
        }
    }
}

/// Run Readability over `html`, returning `(title, text)`.
pub fn readability_parse(html: &str, url: &str) -> Result<(String, String), ExtractionFailure> {
    let cfg = Config {
        max_elements_to_parse: 9000,
        ..Default::default()
    };
    let mut readability = Readability::new(html, Some(url), Some(cfg))
        .map_err(|e| ExtractionFailure::Parse(e.to_string()))?;
    let article = readability
        .parse()
        .map_err(|e| ExtractionFailure::Parse(e.to_string()))?;
    Ok((article.title.to_string(), article.text_content.to_string()))
}

#[async_trait]
impl Extractor for ReadabilityExtractor {
    fn name(&self) -> &'static str {
        "readability"
    }

    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn attempt(&self, url: &str) -> Result<ExtractedContent, ExtractionFailure> {
        let page = self.fetcher.get(url, self.timeout).await?;
        if !page.is_ok() {
            return Err(ExtractionFailure::Status(page.status));
        }

        let (title, text) = readability_parse(&page.body, url)?;
        let text = text.trim();
        let len = text.chars().count();
        debug!(len, "Readability text length");
        if len < self.min_chars {
            return Err(ExtractionFailure::TooShort {
                stage: self.name(),
                len,
                min: self.min_chars,
            });
        }

        Ok(ExtractedContent {
            title: title_or_url(Some(&title), url),
            text: text.to_string(),
        })
    }
}
