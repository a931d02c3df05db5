//! JSON output: an array of [`ArticleRecord`] objects.
//!
//! Written with three-space indentation; non-ASCII text (quotes, accents,
//! non-Latin titles) is written as-is rather than `\u` escaped.

use crate::models::ArticleRecord;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Serialize records to the on-disk JSON layout.
pub fn records_to_json(records: &[ArticleRecord]) -> Result<String, Box<dyn Error>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"   ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Write records to `path` as JSON.
#[instrument(level = "info", skip_all, fields(%path, count = records.len()))]
pub async fn write_records(records: &[ArticleRecord], path: &str) -> Result<(), Box<dyn Error>> {
    let json = records_to_json(records)?;
    info!(bytes = json.len(), "Writing JSON");
    fs::write(path, json).await?;
    info!("Wrote JSON records");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleDescriptor, ReferenceRecord};

    fn record() -> ArticleRecord {
        let descriptor = ArticleDescriptor {
            date: "2025-02-19".to_string(),
            title: "BAFTA – 78th awards".to_string(),
            url: "https://en.wikinews.org/wiki/BAFTA".to_string(),
            category: "Entertainment".to_string(),
        };
        let refs = vec![ReferenceRecord {
            title: "Café report".to_string(),
            text: "Winners announced".to_string(),
            url: "https://bbc.example/bafta".to_string(),
        }];
        ArticleRecord::assemble(
            &descriptor,
            "Ceremony held in London".to_string(),
            vec!["https://bbc.example/bafta".to_string()],
            refs,
        )
    }

    #[test]
    fn test_three_space_indent_and_raw_unicode() {
        let json = records_to_json(&[record()]).unwrap();
        assert!(json.starts_with("[\n   {\n      \"date\""));
        assert!(json.contains("BAFTA – 78th awards"));
        assert!(json.contains("Café report"));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn test_reference_data_nested_as_objects() {
        let json = records_to_json(&[record()]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let refs = parsed[0]["reference_data"].as_array().unwrap();
        assert_eq!(refs[0]["url"], "https://bbc.example/bafta");
        assert_eq!(parsed[0]["word_count_bin"], "Short");
    }

    #[test]
    fn test_empty_records() {
        assert_eq!(records_to_json(&[]).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_write_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.json");
        let path = path.to_str().unwrap();
        write_records(&[record()], path).await.unwrap();

        let back: Vec<ArticleRecord> =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(back, vec![record()]);
    }
}
