//! # XLSX Engine
//!
//! [`SpreadsheetWriter`] implementation backed by `rust_xlsxwriter`.
//!
//! ## Formatting Contract
//! - Single sheet named "Report"
//! - Title bars: bold, horizontally and vertically centered, font size 12
//! - Tables: banded "Medium 9" style over the header+data range
//! - `CellValue::Money` cells are numeric (major units); `Missing` is blank
//!
//! ## Output Visibility
//! Nothing touches the file system until [`XlsxEngine::save`]: the whole
//! workbook is assembled in memory, so a failed run never leaves a
//! partially written report behind.

use std::fs;
use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, Table, TableColumn, TableStyle, Workbook};
use tracing::debug;

use atlas_core::CellValue;

use crate::error::{SheetError, SheetResult};
use crate::writer::SpreadsheetWriter;

/// Name of the single worksheet in the daily report.
pub const REPORT_SHEET_NAME: &str = "Report";

/// The `rust_xlsxwriter`-backed spreadsheet engine.
pub struct XlsxEngine {
    workbook: Workbook,
    title_format: Format,
}

impl XlsxEngine {
    /// Creates a workbook with the single "Report" worksheet.
    pub fn new() -> SheetResult<Self> {
        let mut workbook = Workbook::new();
        workbook.add_worksheet().set_name(REPORT_SHEET_NAME)?;

        let title_format = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_font_size(12);

        Ok(XlsxEngine {
            workbook,
            title_format,
        })
    }

    /// Saves the workbook, overwriting any file already at `path`.
    ///
    /// The stale file from an earlier run of the same day is removed
    /// first, so a same-day re-run replaces rather than appends.
    pub fn save(mut self, path: &Path) -> SheetResult<()> {
        if path.exists() {
            debug!(path = %path.display(), "Removing stale report file");
            fs::remove_file(path).map_err(|source| SheetError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }

        self.workbook
            .save(path)
            .map_err(|source| SheetError::Write {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Serializes the workbook to an in-memory buffer (used by tests).
    pub fn save_to_buffer(mut self) -> SheetResult<Vec<u8>> {
        Ok(self.workbook.save_to_buffer()?)
    }
}

impl SpreadsheetWriter for XlsxEngine {
    fn merge_title(&mut self, row: u32, columns: u16, title: &str) -> SheetResult<()> {
        let worksheet = self.workbook.worksheet_from_index(0)?;
        if columns > 1 {
            worksheet.merge_range(row, 0, row, columns - 1, title, &self.title_format)?;
        } else {
            // A one-column block cannot merge; the engine rejects
            // single-cell merge ranges
            worksheet.write_string_with_format(row, 0, title, &self.title_format)?;
        }
        Ok(())
    }

    fn write_header(&mut self, row: u32, header: &[String]) -> SheetResult<()> {
        let worksheet = self.workbook.worksheet_from_index(0)?;
        for (col, name) in header.iter().enumerate() {
            worksheet.write_string(row, col as u16, name)?;
        }
        Ok(())
    }

    fn write_row(&mut self, row: u32, cells: &[CellValue]) -> SheetResult<()> {
        let worksheet = self.workbook.worksheet_from_index(0)?;
        for (col, cell) in cells.iter().enumerate() {
            let col = col as u16;
            match cell {
                CellValue::Text(text) => {
                    worksheet.write_string(row, col, text)?;
                }
                CellValue::Int(value) => {
                    worksheet.write_number(row, col, *value as f64)?;
                }
                CellValue::Money(amount) => {
                    worksheet.write_number(row, col, amount.to_major_units_f64())?;
                }
                CellValue::Missing => {
                    // Blank cell - the join had no price for this line
                }
            }
        }
        Ok(())
    }

    fn style_table(
        &mut self,
        first_row: u32,
        last_row: u32,
        header: &[String],
    ) -> SheetResult<()> {
        let columns: Vec<TableColumn> = header
            .iter()
            .map(|name| TableColumn::new().set_header(name))
            .collect();
        let table = Table::new()
            .set_columns(&columns)
            .set_style(TableStyle::Medium9);

        let last_col = (header.len() as u16).saturating_sub(1);
        let worksheet = self.workbook.worksheet_from_index(0)?;
        worksheet.add_table(first_row, 0, last_row, last_col, &table)?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::Money;

    #[test]
    fn test_engine_produces_a_workbook() {
        let mut engine = XlsxEngine::new().unwrap();
        engine.merge_title(0, 4, "OrderWiseDetails").unwrap();
        engine
            .write_header(1, &["order_id".into(), "total_price".into()])
            .unwrap();
        engine
            .write_row(
                2,
                &[
                    CellValue::Text("1".into()),
                    CellValue::Money(Money::from_cents(2000)),
                    CellValue::Int(2),
                    CellValue::Missing,
                ],
            )
            .unwrap();
        engine
            .style_table(1, 2, &["order_id".into(), "total_price".into()])
            .unwrap();

        let buffer = engine.save_to_buffer().unwrap();
        // XLSX files are ZIP containers; PK\x03\x04 magic at offset 0
        assert!(buffer.len() > 4);
        assert_eq!(&buffer[..2], b"PK");
    }

    #[test]
    fn test_single_column_title_does_not_merge() {
        let mut engine = XlsxEngine::new().unwrap();
        // Must not fail with a single-cell merge error
        engine.merge_title(0, 1, "Narrow").unwrap();
        assert!(engine.save_to_buffer().is_ok());
    }
}
