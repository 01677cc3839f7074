//! Keyword collection driver and spreadsheet export.
//!
//! For each keyword, independently and sequentially, the exporter paginates
//! the Naver news listing, resolves each candidate's publish date, and
//! appends in-range rows to the shared [`NewsWorkbook`]. After all keywords
//! are processed the workbook is finalized and written once.
//!
//! Pagination bookkeeping follows the collection counter, not the row count:
//! `collected` advances by the number of candidates *seen* on a page, so a
//! page full of out-of-range articles still moves the loop forward. The
//! per-page loop breaks as soon as an appended row's sequence number reaches
//! the per-keyword limit, but that break does not end pagination by itself;
//! the outer loop re-checks `collected` on the next iteration.

use crate::models::{ArticleCandidate, ResolvedArticleRow, SearchRequest};
use crate::outputs::excel::{NewsWorkbook, OUTPUT_FILE_NAME};
use crate::scrapers::naver;
use crate::utils::{ensure_writable_dir, format_korean_date, truncate_for_log};
use chrono::NaiveDate;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Outcome of a successful export, handed back to the caller for the
/// user-facing notification.
#[derive(Debug)]
pub struct ExportNotice {
    /// Where the spreadsheet was written.
    pub path: PathBuf,
    /// Number of data rows in the document, header excluded.
    pub rows: usize,
}

/// Run the full search-and-export pipeline for a request.
///
/// # Errors
///
/// Fails if the output directory is not writable, a listing page fetch
/// fails, or the spreadsheet cannot be written. Per-article date resolution
/// failures never surface here; those candidates are silently skipped.
#[instrument(level = "info", skip_all, fields(keywords = request.keywords.len()))]
pub async fn export_search_results(
    request: &SearchRequest,
    output_dir: &str,
) -> Result<ExportNotice, Box<dyn Error>> {
    ensure_writable_dir(output_dir).await?;

    let mut workbook = NewsWorkbook::new();
    for keyword in &request.keywords {
        collect_keyword(&mut workbook, keyword, request).await?;
    }

    let path = Path::new(output_dir).join(OUTPUT_FILE_NAME);
    workbook.save(&path)?;

    Ok(ExportNotice {
        path,
        rows: workbook.len(),
    })
}

/// Paginate one keyword's listing until the collection counter reaches the
/// per-keyword limit or the page bound is hit.
#[instrument(level = "info", skip_all, fields(%keyword))]
async fn collect_keyword(
    workbook: &mut NewsWorkbook,
    keyword: &str,
    request: &SearchRequest,
) -> Result<(), Box<dyn Error>> {
    let mut collected = 0usize;
    let mut page = 1usize;

    while collected < request.per_keyword_limit {
        if page > request.max_pages {
            warn!(
                page,
                collected,
                limit = request.per_keyword_limit,
                "Page bound reached before the limit; stopping this keyword early"
            );
            break;
        }

        let html = naver::fetch_listing(keyword, page).await?;
        let candidates = naver::extract_candidates(&html);
        info!(page, count = candidates.len(), "Extracted listing candidates");

        let mut resolved = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let published = naver::resolve_published_date(&candidate.link).await;
            debug!(
                title = %truncate_for_log(&candidate.title, 80),
                ?published,
                "Resolved candidate date"
            );
            resolved.push((candidate, published));
        }

        append_matching_rows(workbook, keyword, &resolved, collected, request);

        collected += resolved.len();
        page += 1;
    }

    Ok(())
}

/// Append the in-range candidates of one listing page to the workbook.
///
/// A candidate at 1-based page index `e` gets `sequence = e + collected`,
/// which keeps sequence numbers continuous across pages. Candidates without
/// a resolved date, and candidates outside the requested range, are skipped.
/// The loop breaks once an appended row's sequence equals the limit; a
/// skipped candidate never triggers the break, even at the same index.
fn append_matching_rows(
    workbook: &mut NewsWorkbook,
    keyword: &str,
    resolved: &[(ArticleCandidate, Option<NaiveDate>)],
    collected: usize,
    request: &SearchRequest,
) {
    for (index, (candidate, published)) in resolved.iter().enumerate() {
        let Some(published) = published else { continue };
        if request.contains(*published) {
            let sequence = index + 1 + collected;
            workbook.append_row(ResolvedArticleRow {
                keyword: keyword.to_string(),
                sequence,
                title: candidate.title.clone(),
                link: candidate.link.clone(),
                published: format_korean_date(*published),
            });
            if sequence == request.per_keyword_limit {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse_korean_date;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 11, d).unwrap()
    }

    fn request(limit: usize) -> SearchRequest {
        SearchRequest::new("뉴스", limit, date(28), date(29), 100)
    }

    fn candidate(n: usize) -> ArticleCandidate {
        ArticleCandidate {
            title: format!("기사 {n}"),
            link: format!("https://example.com/{n}"),
        }
    }

    fn in_range(n: usize) -> (ArticleCandidate, Option<NaiveDate>) {
        (candidate(n), Some(date(28)))
    }

    #[test]
    fn test_full_page_within_limit_appends_all_in_order() {
        let mut workbook = NewsWorkbook::new();
        let resolved: Vec<_> = (1..=5).map(in_range).collect();

        append_matching_rows(&mut workbook, "뉴스", &resolved, 0, &request(5));

        let sequences: Vec<_> = workbook.rows().iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_limit_stops_mid_page() {
        let mut workbook = NewsWorkbook::new();
        let resolved: Vec<_> = (1..=5).map(in_range).collect();

        append_matching_rows(&mut workbook, "뉴스", &resolved, 0, &request(3));

        let sequences: Vec<_> = workbook.rows().iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
    }

    #[test]
    fn test_unresolved_date_is_skipped_silently() {
        let mut workbook = NewsWorkbook::new();
        let resolved = vec![(candidate(1), None), in_range(2)];

        append_matching_rows(&mut workbook, "뉴스", &resolved, 0, &request(5));

        assert_eq!(workbook.len(), 1);
        // Sequence reflects the page position, not the number of rows kept
        assert_eq!(workbook.rows()[0].sequence, 2);
    }

    #[test]
    fn test_out_of_range_dates_are_filtered() {
        let mut workbook = NewsWorkbook::new();
        let resolved = vec![
            (candidate(1), Some(date(27))),
            in_range(2),
            (candidate(3), Some(date(30))),
        ];

        append_matching_rows(&mut workbook, "뉴스", &resolved, 0, &request(5));

        assert_eq!(workbook.len(), 1);
        assert_eq!(workbook.rows()[0].title, "기사 2");
    }

    #[test]
    fn test_range_boundaries_are_inclusive() {
        let mut workbook = NewsWorkbook::new();
        let resolved = vec![
            (candidate(1), Some(date(28))),
            (candidate(2), Some(date(29))),
        ];

        append_matching_rows(&mut workbook, "뉴스", &resolved, 0, &request(5));

        assert_eq!(workbook.len(), 2);
    }

    #[test]
    fn test_sequence_continues_across_pages() {
        let mut workbook = NewsWorkbook::new();
        let resolved: Vec<_> = (1..=3).map(in_range).collect();

        // 10 candidates were seen on earlier pages
        append_matching_rows(&mut workbook, "뉴스", &resolved, 10, &request(20));

        let sequences: Vec<_> = workbook.rows().iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![11, 12, 13]);
    }

    #[test]
    fn test_break_only_fires_on_appended_row() {
        let mut workbook = NewsWorkbook::new();
        // The candidate at the limit's index is out of range, so the break
        // is never reached and a later row lands with a higher sequence.
        let resolved = vec![
            in_range(1),
            (candidate(2), Some(date(27))),
            (candidate(3), Some(date(27))),
            in_range(4),
        ];

        append_matching_rows(&mut workbook, "뉴스", &resolved, 0, &request(3));

        let sequences: Vec<_> = workbook.rows().iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![1, 4]);
    }

    #[test]
    fn test_rows_carry_display_date_that_round_trips() {
        let mut workbook = NewsWorkbook::new();
        append_matching_rows(&mut workbook, "뉴스", &[in_range(1)], 0, &request(5));

        let row = &workbook.rows()[0];
        assert_eq!(row.published, "2023년 11월 28일");
        assert_eq!(parse_korean_date(&row.published), Some(date(28)));
    }

    #[test]
    fn test_keyword_recorded_on_each_row() {
        let mut workbook = NewsWorkbook::new();
        append_matching_rows(&mut workbook, "환율", &[in_range(1)], 0, &request(5));

        assert_eq!(workbook.rows()[0].keyword, "환율");
        assert_eq!(workbook.rows()[0].link, "https://example.com/1");
    }
}
