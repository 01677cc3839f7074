//! Scrapers for the Naver news search surface.
//!
//! The [`naver`] module covers both halves of the scrape:
//!
//! 1. **Listing**: Fetch a search results page for a keyword and offset and
//!    extract candidate article entries
//! 2. **Date resolution**: Fetch an individual article page and extract its
//!    publish date from page metadata
//!
//! Listing fetch failures propagate to the caller; date resolution absorbs
//! every failure into a `None` result.

pub mod naver;
