//! Output writers for processed article records.
//!
//! # Submodules
//!
//! - [`json`]: Array of record objects, nested `reference_data` kept as objects
//! - [`csv`]: One row per record, nested fields encoded as JSON cells
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── wikinews_data.json
//! └── wikinews_data.csv
//! ```
//!
//! Both formats keep the [`crate::models::ArticleRecord`] field order, which
//! is what the downstream aggregation step reads.

pub mod csv;
pub mod json;

/// Default JSON file name.
pub const DEFAULT_JSON_NAME: &str = "wikinews_data.json";
/// Default CSV file name.
pub const DEFAULT_CSV_NAME: &str = "wikinews_data.csv";

/// Join an output directory and file name.
pub fn output_path(dir: &str, name: &str) -> String {
    format!("{}/{}", dir.trim_end_matches('/'), name)
}
