//! Wikinews article and citation harvester.
//!
//! A Wikinews article page renders its body inside `div.mw-parser-output`.
//! The story itself is the run of top-level `<p>` elements in that container,
//! and the cited sources are an unordered list placed after a heading whose
//! anchor id is `Sources`:
//!
//! ```html
//! <div class="mw-parser-output">
//!   <p>Story paragraph…</p>
//!   <h2><span class="mw-headline" id="Sources">Sources</span></h2>
//!   <ul>
//!     <li><a class="external text" href="https://…">Outlet headline</a></li>
//!   </ul>
//! </div>
//! ```
//!
//! Newer MediaWiki skins put the id on the heading itself and wrap it in
//! `div.mw-heading`; both layouts are handled.

use crate::fetch::PageFetcher;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

static CONTENT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.mw-parser-output").expect("content selector"));
static HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2, h3").expect("heading selector"));
static SOURCES_ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#Sources").expect("anchor selector"));
static EXTERNAL_LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.external.text[href]").expect("link selector"));

/// What a Wikinews page yields: outbound source links and the story text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Harvest {
    pub source_links: Vec<String>,
    pub article_text: String,
}

/// Fetches Wikinews article pages and pulls out body text and source links.
#[derive(Clone)]
pub struct WikinewsHarvester {
    fetcher: Arc<dyn PageFetcher>,
    timeout: Duration,
}

impl WikinewsHarvester {
    pub fn new(fetcher: Arc<dyn PageFetcher>, timeout: Duration) -> Self {
        Self { fetcher, timeout }
    }

    /// Harvest one article page.
    ///
    /// Network errors and non-200 responses produce an empty [`Harvest`].
    #[instrument(level = "info", skip_all, fields(%url))]
    pub async fn harvest(&self, url: &str) -> Harvest {
        let page = match self.fetcher.get(url, self.timeout).await {
            Ok(page) => page,
            Err(e) => {
                warn!(error = %e, "Article fetch failed; nothing harvested");
                return Harvest::default();
            }
        };
        if !page.is_ok() {
            warn!(status = page.status, "Article returned non-200; nothing harvested");
            return Harvest::default();
        }

        let harvest = parse_article_page(&page.body);
        info!(
            links = harvest.source_links.len(),
            chars = harvest.article_text.len(),
            "Harvested Wikinews article"
        );
        harvest
    }
}

/// Extract story text and source links from a Wikinews page body.
pub fn parse_article_page(html: &str) -> Harvest {
    let document = Html::parse_document(html);
    let Some(container) = document.select(&CONTENT_SELECTOR).next() else {
        info!("No mw-parser-output container on page");
        return Harvest::default();
    };

    Harvest {
        article_text: top_level_paragraphs(container),
        source_links: source_links(container),
    }
}

/// Text of the container's direct `<p>` children, one per line.
///
/// Inline markup is flattened as-is; whitespace is left for `clean_text`.
fn top_level_paragraphs(container: ElementRef<'_>) -> String {
    container
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "p")
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_sources_heading(heading: &ElementRef<'_>) -> bool {
    heading.value().id() == Some("Sources") || heading.select(&SOURCES_ANCHOR_SELECTOR).next().is_some()
}

fn is_list(el: &ElementRef<'_>) -> bool {
    matches!(el.value().name(), "ul" | "ol")
}

/// First `ul`/`ol` among the siblings following `el`.
fn next_list_sibling<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.next_siblings().filter_map(ElementRef::wrap).find(is_list)
}

/// Locate the list that follows the "Sources" heading.
fn sources_list<'a>(container: ElementRef<'a>) -> Option<ElementRef<'a>> {
    let heading = container.select(&HEADING_SELECTOR).find(is_sources_heading)?;
    if let Some(list) = next_list_sibling(heading) {
        return Some(list);
    }

    // `<div class="mw-heading"><h2 id="Sources">…</h2></div><ul>…</ul>`
    let wrapper = heading.parent().and_then(ElementRef::wrap)?;
    if wrapper.value().classes().any(|c| c.starts_with("mw-heading")) {
        next_list_sibling(wrapper)
    } else {
        None
    }
}

fn source_links(container: ElementRef<'_>) -> Vec<String> {
    let Some(list) = sources_list(container) else {
        debug!("No Sources list found");
        return Vec::new();
    };
    list.select(&EXTERNAL_LINK_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;
    use crate::fetch::HttpFetcher;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const WELL_FORMED: &str = r#"
        <html><body>
        <div id="content">
          <div class="mw-parser-output">
            <p>Scientists have <a href="/wiki/Seagrass">discovered</a> a giant plant.</p>
            <p>   </p>
            <div class="infobox"><p>Nested paragraph is ignored.</p></div>
            <p>It spans 180 kilometres.</p>
            <h2><span class="mw-headline" id="Sources">Sources</span></h2>
            <p>Retrieved from the following outlets:</p>
            <ul>
              <li><a class="external text" href="https://one.example/a">One</a></li>
              <li><a class="external text" href="https://two.example/b">Two</a></li>
              <li><a href="/wiki/Internal">Internal</a></li>
              <li><a class="external text" href="https://three.example/c">Three</a></li>
            </ul>
            <ul><li><a class="external text" href="https://later.example">Later</a></li></ul>
          </div>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_well_formed_page() {
        let harvest = parse_article_page(WELL_FORMED);
        assert_eq!(
            harvest.source_links,
            vec![
                "https://one.example/a",
                "https://two.example/b",
                "https://three.example/c"
            ]
        );
        assert_eq!(
            harvest.article_text,
            "Scientists have discovered a giant plant.\nIt spans 180 kilometres.\nRetrieved from the following outlets:"
        );
    }

    #[test]
    fn test_inline_markup_keeps_punctuation_attached() {
        let html = r#"<div class="mw-parser-output"><p>The figure was confirmed by <a href="/r">Reuters</a>, and by <a href="/n">NASA</a>'s team.</p>
            <p>An <b>e</b>xample of split markup.</p></div>"#;
        let harvest = parse_article_page(html);
        assert_eq!(
            harvest.article_text,
            "The figure was confirmed by Reuters, and by NASA's team.\nAn example of split markup."
        );
        assert_eq!(crate::utils::count_words(&harvest.article_text), 16);
    }

    #[test]
    fn test_missing_container_is_empty() {
        let harvest = parse_article_page("<html><body><p>No wiki body</p></body></html>");
        assert_eq!(harvest, Harvest::default());
    }

    #[test]
    fn test_no_sources_heading_keeps_text() {
        let html = r#"<div class="mw-parser-output"><p>Only text.</p>
            <ul><li><a class="external text" href="https://x.example">x</a></li></ul></div>"#;
        let harvest = parse_article_page(html);
        assert_eq!(harvest.article_text, "Only text.");
        assert!(harvest.source_links.is_empty());
    }

    #[test]
    fn test_sources_heading_without_list() {
        let html = r#"<div class="mw-parser-output"><p>Body.</p>
            <h3><span id="Sources">Sources</span></h3><p>None listed.</p></div>"#;
        let harvest = parse_article_page(html);
        assert!(harvest.source_links.is_empty());
    }

    #[test]
    fn test_ordered_list_and_wrapped_heading() {
        let html = r#"<div class="mw-parser-output"><p>Body.</p>
            <div class="mw-heading mw-heading2"><h2 id="Sources">Sources</h2></div>
            <ol>
              <li><a class="external text" href="https://a.example">A</a></li>
              <li><a class="external text" href="https://a.example">A again</a></li>
            </ol></div>"#;
        let harvest = parse_article_page(html);
        assert_eq!(
            harvest.source_links,
            vec!["https://a.example", "https://a.example"]
        );
    }

    fn harvester() -> WikinewsHarvester {
        let fetcher = HttpFetcher::new(&HttpConfig::default()).unwrap();
        WikinewsHarvester::new(Arc::new(fetcher), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_harvest_404_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wiki/Missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string(WELL_FORMED))
            .mount(&server)
            .await;

        let harvest = harvester()
            .harvest(&format!("{}/wiki/Missing", server.uri()))
            .await;
        assert!(harvest.source_links.is_empty());
        assert_eq!(harvest.article_text, "");
    }

    #[tokio::test]
    async fn test_harvest_well_formed_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wiki/Seagrass"))
            .respond_with(ResponseTemplate::new(200).set_body_string(WELL_FORMED))
            .mount(&server)
            .await;

        let harvest = harvester()
            .harvest(&format!("{}/wiki/Seagrass", server.uri()))
            .await;
        assert_eq!(harvest.source_links.len(), 3);
        assert_eq!(harvest.source_links[0], "https://one.example/a");
        assert!(harvest.article_text.starts_with("Scientists have discovered"));
    }

    #[tokio::test]
    async fn test_harvest_unreachable_is_empty() {
        let harvest = harvester().harvest("http://127.0.0.1:1/wiki/Down").await;
        assert_eq!(harvest, Harvest::default());
    }
}
