//! Stage 2: raw HTTP fetch plus boilerplate stripping.
//!
//! [`main_text`] is also the extractor the browser stage runs over rendered
//! DOMs, so both stages agree on what "the text of a page" means.

use super::{ExtractionFailure, Extractor, title_or_url};
use crate::fetch::PageFetcher;
use crate::models::ExtractedContent;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use spider_transformations::transformation::content::{
    ReturnFormat, TransformConfig, TransformInput, transform_content_input,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("title selector"));
static TABLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("table selector"));

/// The document `<title>`, trimmed, if present and non-blank.
pub fn page_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Detach every `<table>` subtree from the parsed DOM and re-serialize it.
fn strip_tables(html: &str) -> String {
    let mut document = Html::parse_document(html);
    let tables: Vec<_> = document.select(&TABLE_SELECTOR).map(|t| t.id()).collect();
    for id in tables {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
    document.html()
}

/// Main-content text of a page with navigation, footers, comments and
/// tables stripped. Returns an empty string when nothing is left.
pub fn main_text(html: &str, url: Option<&str>) -> String {
    let cleaned = strip_tables(html);
    let parsed_url = url.and_then(|u| url::Url::parse(u).ok());
    let config = TransformConfig {
        readability: false,
        main_content: true,
        return_format: ReturnFormat::Text,
        filter_images: true,
        filter_svg: true,
        clean_html: true,
    };
    let input = TransformInput {
        url: parsed_url.as_ref(),
        content: cleaned.as_bytes(),
        screenshot_bytes: None,
        encoding: None,
        selector_config: None,
        ignore_tags: None,
    };

    transform_content_input(input, &config).trim().to_string()
}

/// Direct GET with browser-like headers, then boilerplate stripping.
pub struct RawFetchExtractor {
    fetcher: Arc<dyn PageFetcher>,
    timeout: Duration,
    min_chars: usize,
}

impl RawFetchExtractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>, timeout: Duration, min_chars: usize) -> Self {
        Self {
            fetcher,
            timeout,
            min_chars,
        }
    }
}

#[async_trait]
impl Extractor for RawFetchExtractor {
    fn name(&self) -> &'static str {
        "boilerplate"
    }

    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn attempt(&self, url: &str) -> Result<ExtractedContent, ExtractionFailure> {
        let page = self.fetcher.get(url, self.timeout).await?;
        if !page.is_ok() {
            return Err(ExtractionFailure::Status(page.status));
        }

        let text = main_text(&page.body, Some(url));
        let len = text.chars().count();
        debug!(len, "Boilerplate text length");
        if len < self.min_chars {
            return Err(ExtractionFailure::TooShort {
                stage: self.name(),
                len,
                min: self.min_chars,
            });
        }

        Ok(ExtractedContent {
            title: title_or_url(page_title(&page.body).as_deref(), url),
            text,
        })
    }
}
