//! Data models for seeds, extracted content and output records.
//!
//! This module defines the core data structures used throughout the application:
//! - [`ArticleDescriptor`]: A curated Wikinews article to process
//! - [`ExtractedContent`]: Title and text pulled out of one URL
//! - [`ReferenceRecord`]: Cleaned content of one cited source
//! - [`ArticleRecord`]: The per-article output row
//! - [`LengthBin`]: Word-count tier of an article
//!
//! Field order of [`ArticleRecord`] is the column order of the CSV and JSON
//! outputs, which the downstream aggregation step relies on.

use crate::utils::{classify_length, count_words};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A Wikinews article to harvest, as listed in the seed set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleDescriptor {
    /// Publication date in `YYYY-MM-DD` format.
    pub date: String,
    /// Article headline.
    pub title: String,
    /// Wikinews page URL.
    pub url: String,
    /// Editorial category used for grouping (e.g. "Sports").
    pub category: String,
}

/// Title and body text extracted from a single page.
///
/// `text` is always present. It may be empty, or a failure marker when every
/// extraction stage gave up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExtractedContent {
    pub title: String,
    pub text: String,
}

/// Cleaned content of one cited source, with the link it came from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReferenceRecord {
    pub title: String,
    pub text: String,
    pub url: String,
}

/// Word-count tier of an article body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LengthBin {
    Short,
    Medium,
    Long,
}

impl LengthBin {
    pub fn as_str(&self) -> &'static str {
        match self {
            LengthBin::Short => "Short",
            LengthBin::Medium => "Medium",
            LengthBin::Long => "Long",
        }
    }
}

impl fmt::Display for LengthBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fully processed Wikinews article.
///
/// Built once by the pipeline and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRecord {
    pub date: String,
    pub title: String,
    pub url: String,
    pub category: String,
    /// Cleaned top-level paragraphs of the Wikinews article.
    pub article_text: String,
    /// Links found in the article's "Sources" list, in document order.
    pub source_links: Vec<String>,
    /// One entry per source link, same order as `source_links`.
    pub reference_data: Vec<ReferenceRecord>,
    /// Non-empty reference texts joined by single spaces.
    pub source_data: String,
    pub word_count: usize,
    /// Always `classify_length(word_count)`.
    pub word_count_bin: LengthBin,
    pub word_count_source_data: usize,
}

impl ArticleRecord {
    /// Assemble a record from already-cleaned article text and references.
    ///
    /// Computes `source_data`, both word counts and the length bin. The bin
    /// comes from the article's own word count, never the sources'.
    pub fn assemble(
        descriptor: &ArticleDescriptor,
        article_text: String,
        source_links: Vec<String>,
        reference_data: Vec<ReferenceRecord>,
    ) -> Self {
        let source_data = reference_data
            .iter()
            .map(|r| r.text.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let word_count = count_words(&article_text);
        let word_count_source_data = count_words(&source_data);

        Self {
            date: descriptor.date.clone(),
            title: descriptor.title.clone(),
            url: descriptor.url.clone(),
            category: descriptor.category.clone(),
            article_text,
            source_links,
            reference_data,
            source_data,
            word_count,
            word_count_bin: classify_length(word_count),
            word_count_source_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> ArticleDescriptor {
        ArticleDescriptor {
            date: "2025-04-23".to_string(),
            title: "Colossal squid filmed".to_string(),
            url: "https://en.wikinews.org/wiki/Squid".to_string(),
            category: "Science & Environment".to_string(),
        }
    }

    fn reference(text: &str, url: &str) -> ReferenceRecord {
        ReferenceRecord {
            title: "Ref".to_string(),
            text: text.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_assemble_joins_non_empty_reference_texts() {
        let refs = vec![
            reference("first source text", "https://a.example"),
            reference("", "https://b.example"),
            reference("second", "https://c.example"),
        ];
        let links = refs.iter().map(|r| r.url.clone()).collect();
        let record = ArticleRecord::assemble(&descriptor(), "body".to_string(), links, refs);

        assert_eq!(record.source_data, "first source text second");
        assert_eq!(record.word_count_source_data, 4);
        assert_eq!(record.word_count, 1);
        assert_eq!(record.word_count_bin, LengthBin::Short);
        assert_eq!(record.reference_data.len(), 3);
    }

    #[test]
    fn test_assemble_bin_uses_article_count_only() {
        let article = vec!["word"; 300].join(" ");
        let big_source = vec!["src"; 1000].join(" ");
        let refs = vec![reference(&big_source, "https://a.example")];
        let record = ArticleRecord::assemble(
            &descriptor(),
            article,
            vec!["https://a.example".to_string()],
            refs,
        );

        assert_eq!(record.word_count, 300);
        assert_eq!(record.word_count_bin, LengthBin::Medium);
        assert_eq!(record.word_count_source_data, 1000);
    }

    #[test]
    fn test_record_serializes_in_field_order() {
        let record = ArticleRecord::assemble(&descriptor(), String::new(), vec![], vec![]);
        let json = serde_json::to_string(&record).unwrap();

        let keys = [
            "\"date\"",
            "\"title\"",
            "\"url\"",
            "\"category\"",
            "\"article_text\"",
            "\"source_links\"",
            "\"reference_data\"",
            "\"source_data\"",
            "\"word_count\"",
            "\"word_count_bin\"",
            "\"word_count_source_data\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
        assert!(json.contains("\"word_count_bin\":\"Short\""));
    }

    #[test]
    fn test_descriptor_deserialization() {
        let json = r#"{
            "date": "2022-06-03",
            "title": "Seagrass",
            "url": "https://en.wikinews.org/wiki/Seagrass",
            "category": "Science & Environment"
        }"#;
        let d: ArticleDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(d.date, "2022-06-03");
        assert_eq!(d.category, "Science & Environment");
    }

    #[test]
    fn test_length_bin_display() {
        assert_eq!(LengthBin::Short.to_string(), "Short");
        assert_eq!(LengthBin::Medium.as_str(), "Medium");
        assert_eq!(LengthBin::Long.to_string(), "Long");
    }
}
