//! Text normalization and small helpers shared across the pipeline.
//!
//! This module provides:
//! - Word counting over cleaned article and source text
//! - Whitespace and quote normalization applied to every scraped field
//! - Length-bin classification of an article's word count
//! - Log truncation and output directory validation

use crate::models::LengthBin;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("word pattern"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Upper bound (exclusive) of the `Short` bin.
pub const SHORT_MAX_WORDS: usize = 250;
/// Upper bound (exclusive) of the `Medium` bin.
pub const MEDIUM_MAX_WORDS: usize = 500;

/// Count maximal runs of word characters (alphanumerics and underscore).
///
/// Punctuation-only input scores zero; a number is a single word.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(count_words("Hello, world! 123"), 3);
/// assert_eq!(count_words("?!..."), 0);
/// ```
pub fn count_words(text: &str) -> usize {
    WORD_RE.find_iter(text).count()
}

/// Normalize a scraped string for storage.
///
/// Newlines become spaces, backslashes are dropped, typographic quotes and
/// the straight double quote become a straight apostrophe, then whitespace
/// runs collapse to one space and the ends are trimmed.
///
/// Applying it twice gives the same result as applying it once.
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let replaced: String = text
        .chars()
        .filter(|c| *c != '\\')
        .map(|c| match c {
            '\n' => ' ',
            '\u{201C}' | '\u{201D}' | '\u{2018}' | '\u{2019}' | '"' => '\'',
            other => other,
        })
        .collect();
    WHITESPACE_RE.replace_all(&replaced, " ").trim().to_string()
}

/// Classify a word count into a [`LengthBin`].
///
/// The lower bound of each tier is inclusive: 250 is `Medium`, 500 is `Long`.
pub fn classify_length(word_count: usize) -> LengthBin {
    if word_count < SHORT_MAX_WORDS {
        LengthBin::Short
    } else if word_count < MEDIUM_MAX_WORDS {
        LengthBin::Medium
    } else {
        LengthBin::Long
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at the last character boundary at or before `max`
/// bytes and get an `"…(+N bytes)"` suffix.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then creates and removes a probe file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
