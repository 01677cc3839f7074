//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Defaults mirror the values the search form historically offered: five
//! articles per keyword and the 2023-11-28 / 2023-11-29 date range.

use chrono::NaiveDate;
use clap::Parser;

/// Command-line arguments for the Naver news exporter.
///
/// # Examples
///
/// ```sh
/// # Search two keywords with the default limit and date range
/// naver_news_export -k "날씨, 증시"
///
/// # Ten articles per keyword over a custom range
/// naver_news_export -k 환율 -n 10 --start-date 2023-11-01 --end-date 2023-11-30
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Keywords to search, comma-separated
    #[arg(short, long)]
    pub keywords: String,

    /// Number of news entries to collect per keyword
    #[arg(short = 'n', long, default_value_t = 5)]
    pub limit: usize,

    /// First acceptable publish date (inclusive), YYYY-MM-DD
    #[arg(long, default_value = "2023-11-28")]
    pub start_date: NaiveDate,

    /// Last acceptable publish date (inclusive), YYYY-MM-DD
    #[arg(long, default_value = "2023-11-29")]
    pub end_date: NaiveDate,

    /// Directory the spreadsheet is written into
    #[arg(short, long, default_value = "results")]
    pub output_dir: String,

    /// Upper bound on listing pages fetched per keyword
    #[arg(long, default_value_t = 100)]
    pub max_pages: usize,
}
