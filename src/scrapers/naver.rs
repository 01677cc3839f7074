//! Naver news search scraper.
//!
//! Listing pages are queried per keyword with a 1-based `start` offset that
//! advances by 10 per page. Candidate entries are the elements matching the
//! `.news_tit` selector, in document order.
//!
//! Article publish dates come from the `article:published_time` meta tag on
//! the individual article pages. Those pages are arbitrary third-party HTML,
//! so the tag may be absent or carry an unparseable value; both cases are
//! treated as "no date" rather than errors.

use crate::models::{ArticleCandidate, MISSING_LINK};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use std::error::Error;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const SEARCH_BASE_URL: &str =
    "https://search.naver.com/search.naver?where=news&sm=tab_jum&query=";

/// Timeout for individual article page fetches. Listing fetches carry none.
const ARTICLE_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

static CLIENT: Lazy<Client> =
    Lazy::new(|| Client::builder().build().expect("Failed to build HTTP client"));

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".news_tit").unwrap());

static PUBLISHED_TIME_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="article:published_time"]"#).unwrap());

/// Build the listing URL for a keyword and 1-based page number.
pub fn listing_url(keyword: &str, page: usize) -> String {
    let offset = (page - 1) * 10 + 1;
    format!(
        "{}{}&start={}",
        SEARCH_BASE_URL,
        urlencoding::encode(keyword),
        offset
    )
}

/// Fetch one search results listing page for a keyword.
///
/// # Errors
///
/// Network errors and body read failures propagate: an unreachable listing
/// endpoint is fatal to the run.
#[instrument(level = "info", skip_all, fields(%keyword, page))]
pub async fn fetch_listing(keyword: &str, page: usize) -> Result<String, Box<dyn Error>> {
    let url = listing_url(keyword, page);
    debug!(%url, "Fetching listing page");
    let html = CLIENT.get(url.as_str()).send().await?.text().await?;
    Ok(html)
}

/// Extract all candidate article entries from a listing page, preserving
/// document order.
pub fn extract_candidates(html: &str) -> Vec<ArticleCandidate> {
    let document = Html::parse_document(html);
    document
        .select(&TITLE_SELECTOR)
        .map(|element| {
            let title = element.text().collect::<String>();
            let link = element
                .value()
                .attr("href")
                .map(str::to_string)
                .unwrap_or_else(|| MISSING_LINK.to_string());
            ArticleCandidate { title, link }
        })
        .collect()
}

/// Resolve an article's publish date by fetching its page and reading the
/// `article:published_time` meta tag.
///
/// Every failure class yields `None`: an unparseable link (including
/// [`MISSING_LINK`]), network error, timeout, non-success status, missing
/// tag, or malformed timestamp. The caller never observes an error from
/// this operation.
#[instrument(level = "debug", skip_all, fields(%link))]
pub async fn resolve_published_date(link: &str) -> Option<NaiveDate> {
    let url = Url::parse(link).ok()?;
    let response = CLIENT
        .get(url)
        .timeout(ARTICLE_FETCH_TIMEOUT)
        .send()
        .await
        .ok()?;
    if !response.status().is_success() {
        debug!(status = %response.status(), "Article fetch returned non-success status");
        return None;
    }
    let body = response.text().await.ok()?;
    parse_published_time(&body)
}

/// Extract the publish date from an article page's metadata, if present.
pub fn parse_published_time(html: &str) -> Option<NaiveDate> {
    let document = Html::parse_document(html);
    let content = document
        .select(&PUBLISHED_TIME_SELECTOR)
        .next()?
        .value()
        .attr("content")?;
    parse_iso_date(content)
}

/// Parse an ISO-8601 timestamp down to its calendar date, accepting the
/// offset, naive, and date-only forms encountered in the wild.
fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(timestamp.date());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_url_offsets() {
        assert!(listing_url("news", 1).ends_with("&start=1"));
        assert!(listing_url("news", 2).ends_with("&start=11"));
        assert!(listing_url("news", 5).ends_with("&start=41"));
    }

    #[test]
    fn test_listing_url_encodes_keyword() {
        let url = listing_url("서울 날씨", 1);
        assert!(url.contains("query=%EC%84%9C%EC%9A%B8%20%EB%82%A0%EC%94%A8"));
        assert!(!url.contains("서울"));
    }

    #[test]
    fn test_extract_candidates_in_document_order() {
        let html = r#"
            <html><body>
                <a class="news_tit" href="https://example.com/a">첫 번째 기사</a>
                <div><a class="news_tit" href="https://example.com/b">두 번째 기사</a></div>
                <a class="other" href="https://example.com/c">관련 없음</a>
            </body></html>
        "#;

        let candidates = extract_candidates(html);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].title, "첫 번째 기사");
        assert_eq!(candidates[0].link, "https://example.com/a");
        assert_eq!(candidates[1].title, "두 번째 기사");
        assert_eq!(candidates[1].link, "https://example.com/b");
    }

    #[test]
    fn test_extract_candidates_missing_href_uses_sentinel() {
        let html = r#"<span class="news_tit">링크가 빠진 기사</span>"#;

        let candidates = extract_candidates(html);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].link, MISSING_LINK);
    }

    #[test]
    fn test_extract_candidates_empty_page() {
        assert!(extract_candidates("<html><body></body></html>").is_empty());
    }

    #[test]
    fn test_parse_published_time_present() {
        let html = r#"
            <html><head>
                <meta property="article:published_time" content="2023-11-28T10:30:00+09:00"/>
            </head><body></body></html>
        "#;

        assert_eq!(
            parse_published_time(html),
            NaiveDate::from_ymd_opt(2023, 11, 28)
        );
    }

    #[test]
    fn test_parse_published_time_absent() {
        let html = r#"<html><head><meta property="og:title" content="기사"/></head></html>"#;
        assert_eq!(parse_published_time(html), None);
    }

    #[test]
    fn test_parse_published_time_malformed() {
        let html = r#"<meta property="article:published_time" content="not a date"/>"#;
        assert_eq!(parse_published_time(html), None);
    }

    #[test]
    fn test_parse_iso_date_variants() {
        let expected = NaiveDate::from_ymd_opt(2023, 11, 28);
        assert_eq!(parse_iso_date("2023-11-28T10:30:00+09:00"), expected);
        assert_eq!(parse_iso_date("2023-11-28T10:30:00.123+09:00"), expected);
        assert_eq!(parse_iso_date("2023-11-28T10:30:00"), expected);
        assert_eq!(parse_iso_date("2023-11-28"), expected);
        assert_eq!(parse_iso_date(""), None);
    }

    #[tokio::test]
    async fn test_resolve_published_date_rejects_sentinel() {
        assert_eq!(resolve_published_date(MISSING_LINK).await, None);
    }
}
