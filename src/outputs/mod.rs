//! Output generation for the exported spreadsheet.
//!
//! The [`excel`] module owns the in-progress output document: rows are
//! appended while keywords are collected, then the document is finalized
//! (column widths sized to content) and written once at the end of the run.

pub mod excel;
