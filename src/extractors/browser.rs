//! Stage 3: headless browser rendering over WebDriver.
//!
//! Last resort for pages that only render client-side or that block plain
//! HTTP clients. Each render opens its own chromedriver session, so renders
//! never share browser state and can run concurrently.
//!
//! After navigation the renderer waits a fixed settle delay before reading
//! the DOM. Session creation, navigation, settle and capture all share one
//! `render_timeout_secs` deadline.

use super::{ExtractionFailure, Extractor, title_or_url};
use crate::config::BrowserConfig;
use crate::extractors::boilerplate::{main_text, page_title};
use crate::models::ExtractedContent;
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tokio::time::{Instant, sleep, timeout_at};
use tracing::{debug, instrument, warn};

/// Something that can render a URL and return the resulting DOM as HTML.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, url: &str) -> Result<String, ExtractionFailure>;
}

/// Chrome arguments for a headless session.
pub fn chrome_args(config: &BrowserConfig) -> Vec<String> {
    vec![
        "--headless=new".to_string(),
        "--disable-gpu".to_string(),
        "--no-sandbox".to_string(),
        format!(
            "--window-size={},{}",
            config.window_width, config.window_height
        ),
        "--disable-dev-shm-usage".to_string(),
    ]
}

/// WebDriver capabilities requesting headless Chrome.
pub fn chrome_capabilities(config: &BrowserConfig) -> Map<String, Value> {
    let mut caps = Map::new();
    caps.insert(
        "goog:chromeOptions".to_string(),
        json!({ "args": chrome_args(config) }),
    );
    caps
}

/// Renders pages with a fresh chromedriver session per call.
#[derive(Debug, Clone)]
pub struct WebDriverRenderer {
    config: BrowserConfig,
}

impl WebDriverRenderer {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    async fn connect(&self) -> Result<Client, ExtractionFailure> {
        ClientBuilder::native()
            .capabilities(chrome_capabilities(&self.config))
            .connect(&self.config.webdriver_url)
            .await
            .map_err(|e| ExtractionFailure::Browser(e.to_string()))
    }

    async fn navigate_and_capture(&self, client: &Client, url: &str) -> Result<String, ExtractionFailure> {
        client
            .goto(url)
            .await
            .map_err(|e| ExtractionFailure::Browser(e.to_string()))?;
        sleep(self.config.settle()).await;
        client
            .source()
            .await
            .map_err(|e| ExtractionFailure::Browser(e.to_string()))
    }
}

#[async_trait]
impl PageRenderer for WebDriverRenderer {
    #[instrument(level = "info", skip_all, fields(%url, webdriver = %self.config.webdriver_url))]
    async fn render(&self, url: &str) -> Result<String, ExtractionFailure> {
        let deadline = self.config.render_timeout();
        let expires = Instant::now() + deadline;

        let client = match timeout_at(expires, self.connect()).await {
            Ok(result) => result?,
            Err(_) => return Err(ExtractionFailure::Timeout(deadline)),
        };

        let outcome = match timeout_at(expires, self.navigate_and_capture(&client, url)).await {
            Ok(result) => result,
            Err(_) => Err(ExtractionFailure::Timeout(deadline)),
        };

        // The session is closed whether or not navigation succeeded.
        if let Err(e) = client.close().await {
            warn!(error = %e, "Failed to close WebDriver session");
        }

        let html = outcome?;
        debug!(bytes = html.len(), "Captured rendered DOM");
        Ok(html)
    }
}

/// Renders the page, then runs the boilerplate extractor over the DOM.
///
/// Succeeds whenever rendering succeeds, even if the text comes out empty.
pub struct BrowserExtractor {
    renderer: Arc<dyn PageRenderer>,
}

impl BrowserExtractor {
    pub fn new(renderer: Arc<dyn PageRenderer>) -> Self {
        Self { renderer }
    }
}

#[async_trait]
impl Extractor for BrowserExtractor {
    fn name(&self) -> &'static str {
        "browser"
    }

    async fn attempt(&self, url: &str) -> Result<ExtractedContent, ExtractionFailure> {
        let html = self.renderer.render(url).await?;
        Ok(ExtractedContent {
            title: title_or_url(page_title(&html).as_deref(), url),
            text: main_text(&html, Some(url)),
        })
    }
}
