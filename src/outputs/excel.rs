//! Spreadsheet accumulation and writing.
//!
//! One [`NewsWorkbook`] aggregates the rows for *all* keywords in a run.
//! The document is fully rebuilt each run: any pre-existing file at the
//! output path is deleted before the new one is written, so there is no
//! append/merge across runs.
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! └── 모든키워드_뉴스.xlsx
//!     columns: 키워드 | 뉴스 번호 | 뉴스 제목 | 뉴스 링크 | 뉴스 제작 날짜
//! ```

use crate::models::ResolvedArticleRow;
use rust_xlsxwriter::Workbook;
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Fixed output file name; the directory above it is caller-chosen.
pub const OUTPUT_FILE_NAME: &str = "모든키워드_뉴스.xlsx";

/// Fixed header row, always written even when no rows were collected.
pub const HEADER: [&str; 5] = ["키워드", "뉴스 번호", "뉴스 제목", "뉴스 링크", "뉴스 제작 날짜"];

/// Fixed padding added to every content-derived column width.
const COLUMN_PADDING: usize = 18;

/// The in-progress output document.
///
/// An explicit accumulator passed by reference through the collection
/// routine; rows stay in insertion order.
#[derive(Debug, Default)]
pub struct NewsWorkbook {
    rows: Vec<ResolvedArticleRow>,
}

impl NewsWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_row(&mut self, row: ResolvedArticleRow) {
        debug!(keyword = %row.keyword, sequence = row.sequence, "Appending row");
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ResolvedArticleRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Per-column widths: the maximum content width in characters, header
    /// included, plus [`COLUMN_PADDING`].
    pub fn column_widths(&self) -> [usize; 5] {
        let mut widths = HEADER.map(|title| title.chars().count());
        for row in &self.rows {
            widths[0] = widths[0].max(row.keyword.chars().count());
            widths[1] = widths[1].max(row.sequence.to_string().chars().count());
            widths[2] = widths[2].max(row.title.chars().count());
            widths[3] = widths[3].max(row.link.chars().count());
            widths[4] = widths[4].max(row.published.chars().count());
        }
        widths.map(|width| width + COLUMN_PADDING)
    }

    /// Finalize and write the document.
    ///
    /// Deletes any pre-existing file at `path`, writes the header and all
    /// accumulated rows, and applies the content-derived column widths.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        if path.exists() {
            info!("Removing spreadsheet from previous run");
            stdfs::remove_file(path)?;
        }

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col, title) in HEADER.iter().enumerate() {
            worksheet.write_string(0, col as u16, *title)?;
        }

        for (index, row) in self.rows.iter().enumerate() {
            let row_num = (index + 1) as u32;
            worksheet.write_string(row_num, 0, row.keyword.as_str())?;
            worksheet.write_number(row_num, 1, row.sequence as f64)?;
            worksheet.write_string(row_num, 2, row.title.as_str())?;
            worksheet.write_string(row_num, 3, row.link.as_str())?;
            worksheet.write_string(row_num, 4, row.published.as_str())?;
        }

        for (col, width) in self.column_widths().iter().enumerate() {
            worksheet.set_column_width(col as u16, *width as f64)?;
        }

        workbook.save(path)?;
        info!(rows = self.rows.len(), "Wrote spreadsheet");
        Ok(())
    }
}
