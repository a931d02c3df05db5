//! Site scrapers that discover what to extract.
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Wikinews | [`wikinews`] | HTML scraping | Top-level story paragraphs and the "Sources" citation list |
//!
//! A scraper fetches through a [`crate::fetch::PageFetcher`] and never fails
//! the batch: fetch errors, non-200 responses and unexpected markup all come
//! back as empty results.

pub mod wikinews;
