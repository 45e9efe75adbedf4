//! # atlas-sheet: Spreadsheet Rendering for Atlas Reports
//!
//! Turns the placed block sequence from `atlas-core` into one formatted
//! XLSX file.
//!
//! ## Modules
//!
//! - [`writer`] - The `SpreadsheetWriter` capability trait
//! - [`xlsx`] - The `rust_xlsxwriter`-backed engine
//! - [`assembler`] - The rendering sequence, dated path, overwrite rules
//! - [`error`] - Sheet error types
//!
//! ## Design Principles
//!
//! 1. **One rendering sequence, swappable engines**: the assembler drives
//!    a trait, never a concrete engine
//! 2. **No row arithmetic here**: every index comes from `SheetBlock`
//!    accessors computed by the layout engine
//! 3. **All-or-nothing output**: the workbook is assembled in memory and
//!    only written to disk once complete

pub mod assembler;
pub mod error;
pub mod writer;
pub mod xlsx;

pub use assembler::{render, report_path, write_report};
pub use error::{SheetError, SheetResult};
pub use writer::SpreadsheetWriter;
pub use xlsx::{XlsxEngine, REPORT_SHEET_NAME};
