//! # SpreadsheetWriter Trait
//!
//! The seam between the deterministic rendering sequence and a concrete
//! spreadsheet engine.
//!
//! ## Why a Trait?
//! The original job grew three near-identical copies of its pipeline just
//! to swap the writer engine. Modelling the engine as a capability
//! ("can execute these four draw instructions") collapses that duplication:
//! one [`crate::assembler::render`] drives any engine, and tests drive a
//! recording fake instead of unzipping XLSX files.
//!
//! ## Instruction Set
//! ```text
//! merge_title   ─ one merged, bold, centered bar across the block's width
//! write_header  ─ the column-name row
//! write_row     ─ one data row of typed cells
//! style_table   ─ the banded table style over the header+data range
//! ```
//! Row arithmetic stays in atlas-core's `SheetBlock`; implementations only
//! execute the instructions they are given.

use atlas_core::CellValue;

use crate::error::SheetResult;

/// A collaborator that can execute the four draw instructions of one
/// titled table block.
///
/// All row/column indices are zero-based sheet coordinates.
pub trait SpreadsheetWriter {
    /// Draws the title bar: merge `columns` cells on `row` (starting at
    /// column 0) and write `title` bold/centered into the merged range.
    fn merge_title(&mut self, row: u32, columns: u16, title: &str) -> SheetResult<()>;

    /// Writes the column header cells on `row`.
    fn write_header(&mut self, row: u32, header: &[String]) -> SheetResult<()>;

    /// Writes one data row of typed cells on `row`.
    fn write_row(&mut self, row: u32, cells: &[CellValue]) -> SheetResult<()>;

    /// Applies the table style over `[first_row, last_row]` (the header
    /// row plus all data rows), re-declaring the header names so the
    /// engine's table header matches the written cells.
    fn style_table(&mut self, first_row: u32, last_row: u32, header: &[String])
        -> SheetResult<()>;
}
