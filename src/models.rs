//! Data models for search requests and scraped article rows.
//!
//! This module defines the core data structures used throughout the application:
//! - [`SearchRequest`]: The validated user input driving one export run
//! - [`ArticleCandidate`]: A single entry scraped from a listing page
//! - [`ResolvedArticleRow`]: A date-filtered entry ready for the spreadsheet
//!
//! Candidates are ephemeral and produced per listing page; only rows that
//! pass the date filter are retained in the output document.

use chrono::NaiveDate;

/// Sentinel recorded when a listing entry carries no usable link.
pub const MISSING_LINK: &str = "링크 없음";

/// The inputs for one export run.
///
/// Constructed once at startup from the raw CLI arguments. The date range is
/// inclusive on both ends; `start_date <= end_date` is assumed but not
/// validated, matching the upstream form defaults.
#[derive(Debug)]
pub struct SearchRequest {
    /// Keywords to search, in user-supplied order.
    pub keywords: Vec<String>,
    /// Target number of rows to collect per keyword.
    pub per_keyword_limit: usize,
    /// First acceptable publish date.
    pub start_date: NaiveDate,
    /// Last acceptable publish date.
    pub end_date: NaiveDate,
    /// Upper bound on listing pages fetched per keyword.
    pub max_pages: usize,
}

impl SearchRequest {
    /// Build a request from the raw comma-separated keyword string.
    pub fn new(
        raw_keywords: &str,
        per_keyword_limit: usize,
        start_date: NaiveDate,
        end_date: NaiveDate,
        max_pages: usize,
    ) -> Self {
        Self {
            keywords: parse_keywords(raw_keywords),
            per_keyword_limit,
            start_date,
            end_date,
            max_pages,
        }
    }

    /// Whether a publish date falls inside the requested range, inclusive
    /// on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Split a raw keyword string on commas, trimming whitespace and dropping
/// empty entries.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .collect()
}

/// A single article entry scraped from a search listing page.
///
/// Produced in document order, prior to date resolution. The link falls back
/// to [`MISSING_LINK`] when the title element carries no `href`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleCandidate {
    /// The visible title text of the listing entry.
    pub title: String,
    /// The article URL, or [`MISSING_LINK`].
    pub link: String,
}

/// A date-filtered article entry, the unit persisted to the spreadsheet.
///
/// `sequence` is per-keyword and 1-based, computed from the entry's position
/// on its listing page plus the cumulative candidate count from prior pages,
/// so it stays continuous across pages.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArticleRow {
    pub keyword: String,
    pub sequence: usize,
    pub title: String,
    pub link: String,
    /// Publish date in `"<Y>년 <M>월 <D>일"` display form.
    pub published: String,
}
