//! # Report Assembler
//!
//! Drives a [`SpreadsheetWriter`] over a placed block sequence, and owns
//! the dated output path and overwrite semantics.
//!
//! ## Rendering Sequence (per block)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. merge_title   - title bar over the block's full column span        │
//! │  2. write_header  - column names on the row below the title            │
//! │  3. write_row ×N  - data rows in layout order                          │
//! │  4. style_table   - banded style over [header_row, last_row]           │
//! │                     (skipped when N == 0: an XLSX table needs at       │
//! │                      least one data row, so an empty block renders     │
//! │                      as title + plain header)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering is idempotent with respect to output content: identical block
//! sequences produce identical instruction streams.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use atlas_core::layout::layout;
use atlas_core::{Aggregates, SheetBlock};

use crate::error::{SheetError, SheetResult};
use crate::writer::SpreadsheetWriter;
use crate::xlsx::XlsxEngine;

/// Returns the dated report path: `<dir>/daily_report_<ISO-date>.xlsx`.
///
/// One file per calendar day; a same-day re-run targets the same path and
/// overwrites it.
pub fn report_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("daily_report_{date}.xlsx"))
}

/// Renders every block through the writer, in order.
pub fn render<W: SpreadsheetWriter + ?Sized>(
    blocks: &[SheetBlock],
    sink: &mut W,
) -> SheetResult<()> {
    for block in blocks {
        let columns = block.header.len() as u16;
        sink.merge_title(block.title_row(), columns, &block.title)?;
        sink.write_header(block.header_row(), &block.header)?;

        for (offset, row) in block.rows.iter().enumerate() {
            sink.write_row(block.first_data_row() + offset as u32, row)?;
        }

        if !block.rows.is_empty() {
            sink.style_table(block.header_row(), block.last_row(), &block.header)?;
        }
    }
    Ok(())
}

/// Lays out the three report tables and writes the dated XLSX file.
///
/// The full pipeline tail: `Aggregates` → layout → render → save. The
/// file only becomes visible once the workbook is complete; any earlier
/// failure leaves no partial file behind (see [`XlsxEngine::save`]).
pub fn write_report(
    aggregates: &Aggregates,
    dir: &Path,
    date: NaiveDate,
    gap: u32,
) -> SheetResult<PathBuf> {
    let blocks = layout(aggregates.report_tables(), gap)?;

    let mut engine = XlsxEngine::new()?;
    render(&blocks, &mut engine)?;

    fs::create_dir_all(dir).map_err(|source| SheetError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = report_path(dir, date);
    engine.save(&path)?;

    info!(
        path = %path.display(),
        orders = aggregates.order_wise.len(),
        pending_payments = aggregates.pending_payments.len(),
        pending_departure = aggregates.pending_departure.len(),
        "Report generated"
    );
    Ok(path)
}

// =============================================================================
// Unit Tests
// =============================================================================
