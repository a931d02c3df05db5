//! CSV output: one row per [`ArticleRecord`].
//!
//! Columns follow the record's field order. `source_links` and
//! `reference_data` do not fit in a flat cell, so they are written as their
//! JSON encodings.

use crate::models::ArticleRecord;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Header row, in record field order.
pub const COLUMNS: [&str; 11] = [
    "date",
    "title",
    "url",
    "category",
    "article_text",
    "source_links",
    "reference_data",
    "source_data",
    "word_count",
    "word_count_bin",
    "word_count_source_data",
];

fn row(record: &ArticleRecord) -> Result<[String; 11], serde_json::Error> {
    Ok([
        record.date.clone(),
        record.title.clone(),
        record.url.clone(),
        record.category.clone(),
        record.article_text.clone(),
        serde_json::to_string(&record.source_links)?,
        serde_json::to_string(&record.reference_data)?,
        record.source_data.clone(),
        record.word_count.to_string(),
        record.word_count_bin.to_string(),
        record.word_count_source_data.to_string(),
    ])
}

/// Render records as CSV bytes with a header row.
pub fn records_to_csv(records: &[ArticleRecord]) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for record in records {
        writer.write_record(row(record)?)?;
    }
    writer.flush()?;
    let bytes = writer.into_inner().map_err(|e| e.to_string())?;
    Ok(bytes)
}

/// Write records to `path` as CSV.
#[instrument(level = "info", skip_all, fields(%path, count = records.len()))]
pub async fn write_records(records: &[ArticleRecord], path: &str) -> Result<(), Box<dyn Error>> {
    let bytes = records_to_csv(records)?;
    info!(bytes = bytes.len(), "Writing CSV");
    fs::write(path, bytes).await?;
    info!("Wrote CSV records");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleDescriptor, ReferenceRecord};

    fn record(body: &str) -> ArticleRecord {
        let descriptor = ArticleDescriptor {
            date: "2018-06-30".to_string(),
            title: "France, Uruguay advance".to_string(),
            url: "https://en.wikinews.org/wiki/FIFA".to_string(),
            category: "Sports".to_string(),
        };
        let refs = vec![ReferenceRecord {
            title: "Match report".to_string(),
            text: "France won 4-3".to_string(),
            url: "https://sport.example/1".to_string(),
        }];
        ArticleRecord::assemble(
            &descriptor,
            body.to_string(),
            vec!["https://sport.example/1".to_string()],
            refs,
        )
    }

    #[test]
    fn test_header_and_rows() {
        let bytes = records_to_csv(&[record("One, two"), record("Three")]).unwrap();
        let mut reader = ::csv::Reader::from_reader(bytes.as_slice());

        let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
        assert_eq!(headers, COLUMNS.to_vec());

        let rows: Vec<::csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "France, Uruguay advance");
        assert_eq!(&rows[0][4], "One, two");
        assert_eq!(&rows[0][5], r#"["https://sport.example/1"]"#);
        assert_eq!(&rows[0][8], "2");
        assert_eq!(&rows[0][9], "Short");
    }

    #[test]
    fn test_reference_data_cell_is_json() {
        let bytes = records_to_csv(&[record("Body")]).unwrap();
        let mut reader = ::csv::Reader::from_reader(bytes.as_slice());
        let first = reader.records().next().unwrap().unwrap();
        let refs: Vec<ReferenceRecord> = serde_json::from_str(&first[6]).unwrap();
        assert_eq!(refs[0].title, "Match report");
    }

    #[tokio::test]
    async fn test_write_records_creates_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.csv");
        let path = path.to_str().unwrap();
        write_records(&[], path).await.unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text.trim_end(), COLUMNS.join(","));
    }
}
