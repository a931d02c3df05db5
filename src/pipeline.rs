//! Batch orchestration: harvest each article, extract each cited source,
//! normalize and count, and assemble one [`ArticleRecord`] per descriptor.
//!
//! Every descriptor yields exactly one record; there is no abort path. With
//! the default concurrency of 1 articles and their links are processed
//! strictly in order. Higher limits use ordered buffered streams, so output
//! order always matches input order.

use crate::config::PipelineConfig;
use crate::extractors::SourceExtractor;
use crate::models::{ArticleDescriptor, ArticleRecord, ReferenceRecord};
use crate::scrapers::wikinews::WikinewsHarvester;
use crate::utils::{clean_text, truncate_for_log};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, instrument};

pub struct Pipeline {
    harvester: WikinewsHarvester,
    extractor: SourceExtractor,
    article_concurrency: usize,
    source_concurrency: usize,
}

impl Pipeline {
    pub fn new(
        harvester: WikinewsHarvester,
        extractor: SourceExtractor,
        limits: &PipelineConfig,
    ) -> Self {
        Self {
            harvester,
            extractor,
            article_concurrency: limits.concurrency.max(1),
            source_concurrency: limits.source_concurrency.max(1),
        }
    }

    /// Process every descriptor, returning records in input order.
    #[instrument(level = "info", skip_all, fields(count = descriptors.len()))]
    pub async fn process_all(&self, descriptors: &[ArticleDescriptor]) -> Vec<ArticleRecord> {
        info!(
            article_concurrency = self.article_concurrency,
            source_concurrency = self.source_concurrency,
            "Processing Wikinews articles"
        );
        stream::iter(descriptors)
            .map(|descriptor| self.process_article(descriptor))
            .buffered(self.article_concurrency)
            .collect()
            .await
    }

    /// Build the record for a single descriptor.
    #[instrument(level = "info", skip_all, fields(title = %descriptor.title))]
    pub async fn process_article(&self, descriptor: &ArticleDescriptor) -> ArticleRecord {
        info!(url = %descriptor.url, "Processing article");
        let harvest = self.harvester.harvest(&descriptor.url).await;
        let article_text = clean_text(&harvest.article_text);

        let reference_data: Vec<ReferenceRecord> = stream::iter(harvest.source_links.iter())
            .map(|link| self.reference(link))
            .buffered(self.source_concurrency)
            .collect()
            .await;

        let record = ArticleRecord::assemble(
            descriptor,
            article_text,
            harvest.source_links,
            reference_data,
        );
        info!(
            word_count = record.word_count,
            bin = %record.word_count_bin,
            sources = record.source_links.len(),
            source_words = record.word_count_source_data,
            "Assembled article record"
        );
        record
    }

    async fn reference(&self, link: &str) -> ReferenceRecord {
        let content = self.extractor.extract(link).await;
        let reference = ReferenceRecord {
            title: clean_text(&content.title),
            text: clean_text(&content.text),
            url: link.to_string(),
        };
        debug!(
            url = %link,
            preview = %truncate_for_log(&reference.text, 200),
            "Reference extracted"
        );
        reference
    }
}
