//! # Naver News Export
//!
//! A keyword search exporter for Naver news. For each supplied keyword it
//! paginates the news search listing, resolves each candidate article's
//! publish date from its page metadata, keeps the articles inside the
//! requested date range, and writes every keyword's matches into a single
//! spreadsheet.
//!
//! ## Usage
//!
//! ```sh
//! naver_news_export -k "날씨, 증시" -n 5 --start-date 2023-11-28 --end-date 2023-11-29
//! ```
//!
//! ## Architecture
//!
//! The run is a single sequential pipeline:
//! 1. **Listing**: Fetch search result pages per keyword, ten entries at a time
//! 2. **Resolution**: Fetch each candidate article and extract its publish date
//! 3. **Filtering**: Keep candidates whose date falls inside the range
//! 4. **Output**: Write all rows to `모든키워드_뉴스.xlsx`, replacing any
//!    previous run's file
//!
//! Every network call blocks the pipeline; there is deliberately no
//! concurrency across keywords, pages, or article fetches.

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod exporter;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use exporter::export_search_results;
use models::SearchRequest;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("naver_news_export starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.keywords, args.limit, ?args.output_dir, "Parsed CLI arguments");

    let request = SearchRequest::new(
        &args.keywords,
        args.limit,
        args.start_date,
        args.end_date,
        args.max_pages,
    );
    if request.keywords.is_empty() {
        warn!("No usable keywords supplied; the spreadsheet will contain only the header row");
    }
    info!(
        keywords = ?request.keywords,
        limit = request.per_keyword_limit,
        start = %request.start_date,
        end = %request.end_date,
        "Search request ready"
    );

    let notice = export_search_results(&request, &args.output_dir).await?;

    info!(
        path = %notice.path.display(),
        rows = notice.rows,
        "데이터가 저장되었습니다"
    );
    warn!("키워드 검색시 파일은 초기화 됩니다");

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
