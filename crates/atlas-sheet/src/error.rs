//! # Sheet Error Types
//!
//! Error types for spreadsheet rendering and file output.
//!
//! Write failures always carry the target path and the underlying engine
//! cause: the operator reading the log at 6am needs to know *which* file
//! could not be produced and *why*, not just that "save failed".

use std::path::PathBuf;

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

use atlas_core::CoreError;

/// Result type alias for sheet operations.
pub type SheetResult<T> = Result<T, SheetError>;

/// Spreadsheet rendering / output errors.
#[derive(Debug, Error)]
pub enum SheetError {
    /// Layout failed before any cell was written (row-limit overflow).
    #[error("Layout error: {0}")]
    Layout(#[from] CoreError),

    /// The XLSX engine rejected a draw instruction (bad range, bad table).
    #[error("Spreadsheet engine error: {0}")]
    Engine(#[from] XlsxError),

    /// Saving the finished workbook to disk failed.
    #[error("Failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },

    /// File-system work around the save failed (mkdir, stale-file removal).
    #[error("File system error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
