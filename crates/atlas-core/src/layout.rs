//! # Sheet Layout Engine
//!
//! Computes non-overlapping row placements for titled table blocks stacked
//! vertically in one sheet.
//!
//! ## The Cursor Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Row Bookkeeping (gap = 3)                           │
//! │                                                                         │
//! │  row 0   ┌──────── OrderWiseDetails ────────┐   ◄─ title (merged)      │
//! │  row 1   │ order_id │ total │ pay  │ depart │   ◄─ header              │
//! │  row 2   │    1     │ 20.00 │ ...  │  ...   │   ◄─ data (1 row)        │
//! │  row 3   │                                  │   ─┐                     │
//! │  row 4   │                                  │    ├─ gap                │
//! │  row 5   ┌──────── PendingPayments ─────────┐   ◄┘ next title          │
//! │  ...                                                                    │
//! │                                                                         │
//! │  start_row(i+1) = start_row(i) + 1 + row_count(i) + gap                │
//! │                   └───────────┘ └─┘ └──────────┘ └───┘                 │
//! │                    cursor       title  data        trailing            │
//! │                                                                         │
//! │  The header row rides inside the "+ gap" accounting: the last          │
//! │  occupied row is start_row + 1 + row_count (header at start_row+1,     │
//! │  data ending at start_row+1+row_count), so consecutive titles sit      │
//! │  gap rows below the previous block's last occupied row.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Blocks never overlap, for any number of blocks and any row counts
//! - The gap is constant across all block boundaries
//! - A zero-row table still reserves its header row and must not fail
//! - Block i+1's start_row is a pure function of block i's placement
//!
//! This is the part of the report most likely to hide an off-by-one; every
//! derived row index lives on [`SheetBlock`] accessors so the writer never
//! does its own arithmetic.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Constants
// =============================================================================

/// Blank-row spacing constant between stacked blocks (see module docs for
/// exactly what it measures).
pub const DEFAULT_BLOCK_GAP: u32 = 3;

/// Maximum rows an XLSX worksheet can hold (2^20).
pub const SHEET_MAX_ROWS: u32 = 1_048_576;

// =============================================================================
// Cell Values
// =============================================================================

/// A typed cell at the layout/writer boundary.
///
/// The writer decides the physical representation (string cell, number
/// cell, blank); the layout only carries the typed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// A text cell (identifiers, state labels, product names).
    Text(String),
    /// An integer cell (quantities).
    Int(i64),
    /// A monetary cell, written as a numeric cell in major units.
    Money(Money),
    /// A value absent in the source (unmatched join); renders blank.
    Missing,
}

// =============================================================================
// Layout Input / Output
// =============================================================================

/// One titled table before placement: what to draw, not where.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub title: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl TableSpec {
    pub fn new(title: &str, header: &[&str], rows: Vec<Vec<CellValue>>) -> Self {
        TableSpec {
            title: title.to_string(),
            header: header.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }
}

/// One placed block: a [`TableSpec`] plus its start row.
///
/// Fully determines one visual unit in the output sheet (merged title bar,
/// header, data rows, styled table range). Constructed once by
/// [`layout`], consumed once by the writer, then discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetBlock {
    pub title: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub start_row: u32,
}

impl SheetBlock {
    /// Row of the merged title bar.
    #[inline]
    pub fn title_row(&self) -> u32 {
        self.start_row
    }

    /// Row of the column header.
    #[inline]
    pub fn header_row(&self) -> u32 {
        self.start_row + 1
    }

    /// First data row (meaningless when `rows` is empty).
    #[inline]
    pub fn first_data_row(&self) -> u32 {
        self.start_row + 2
    }

    /// Last occupied row: the header row when there is no data, otherwise
    /// the final data row. The styled table range spans
    /// `[header_row(), last_row()]`.
    #[inline]
    pub fn last_row(&self) -> u32 {
        self.header_row() + self.rows.len() as u32
    }

    /// Zero-based index of the last column, for the title merge range.
    #[inline]
    pub fn last_column(&self) -> u16 {
        (self.header.len() as u16).saturating_sub(1)
    }
}

// =============================================================================
// Layout
// =============================================================================

/// Places the tables top-to-bottom with a constant gap between blocks.
///
/// Sequential, stateful accumulation of a `next_row` cursor starting at 0:
/// each block starts at the cursor, and the cursor advances by
/// `1 + row_count + gap` (see module docs).
///
/// ## Errors
/// - [`CoreError::LayoutOverflow`] if any block's last occupied row would
///   pass the XLSX row limit.
pub fn layout(tables: Vec<TableSpec>, gap: u32) -> CoreResult<Vec<SheetBlock>> {
    let mut blocks = Vec::with_capacity(tables.len());
    // u64 cursor so the overflow check itself cannot overflow
    let mut next_row: u64 = 0;

    for table in tables {
        let start_row = next_row;
        let row_count = table.rows.len() as u64;
        let last_occupied = start_row + 1 + row_count;

        if last_occupied >= SHEET_MAX_ROWS as u64 {
            return Err(CoreError::LayoutOverflow {
                rows: last_occupied + 1,
                max: SHEET_MAX_ROWS,
            });
        }

        blocks.push(SheetBlock {
            title: table.title,
            header: table.header,
            rows: table.rows,
            start_row: start_row as u32,
        });

        next_row = last_occupied + gap as u64;
    }

    Ok(blocks)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: usize) -> TableSpec {
        TableSpec::new(
            "Block",
            &["a", "b"],
            (0..rows)
                .map(|i| vec![CellValue::Int(i as i64), CellValue::Missing])
                .collect(),
        )
    }

    #[test]
    fn test_single_block_starts_at_zero() {
        let blocks = layout(vec![table(2)], DEFAULT_BLOCK_GAP).unwrap();
        assert_eq!(blocks[0].title_row(), 0);
        assert_eq!(blocks[0].header_row(), 1);
        assert_eq!(blocks[0].first_data_row(), 2);
        assert_eq!(blocks[0].last_row(), 3);
    }

    #[test]
    fn test_worked_example_one_data_row_gap_three() {
        // title(1) + header + 1 data row + gap(3) => second title at row 5
        let blocks = layout(vec![table(1), table(4)], 3).unwrap();
        assert_eq!(blocks[1].title_row(), 5);
        assert_eq!(blocks[1].header_row(), 6);
        assert_eq!(blocks[1].last_row(), 10);
    }

    #[test]
    fn test_start_row_is_prefix_sum_of_block_footprints() {
        // start_row(k) == Σ_{j<k} (1 + r_j + gap), arbitrary counts, zeros included
        let counts = [3usize, 0, 7, 1, 0, 12];
        let gap = 4u32;
        let blocks = layout(counts.iter().map(|&r| table(r)).collect(), gap).unwrap();

        let mut expected = 0u32;
        for (block, &r) in blocks.iter().zip(counts.iter()) {
            assert_eq!(block.start_row, expected);
            expected += 1 + r as u32 + gap;
        }
    }

    #[test]
    fn test_blocks_never_overlap() {
        let counts = [0usize, 5, 0, 0, 2];
        let blocks = layout(counts.iter().map(|&r| table(r)).collect(), 1).unwrap();
        for pair in blocks.windows(2) {
            assert!(pair[1].title_row() > pair[0].last_row());
        }
    }

    #[test]
    fn test_empty_table_reserves_header_row() {
        let blocks = layout(vec![table(0), table(0)], 3).unwrap();
        assert_eq!(blocks[0].last_row(), 1); // header only, no data rows
        assert_eq!(blocks[1].title_row(), 4); // 0 + 1 (title) + 0 rows + gap 3
        assert_eq!(blocks[1].title_row() - blocks[0].last_row(), 3);
    }

    #[test]
    fn test_no_tables_is_fine() {
        assert!(layout(vec![], 3).unwrap().is_empty());
    }

    #[test]
    fn test_deterministic_for_identical_input() {
        let a = layout(vec![table(3), table(1)], 3).unwrap();
        let b = layout(vec![table(3), table(1)], 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_overflow_is_fatal() {
        let huge = TableSpec {
            title: "Huge".into(),
            header: vec!["a".into()],
            rows: vec![vec![CellValue::Missing]; SHEET_MAX_ROWS as usize],
        };
        let err = layout(vec![huge], 3).unwrap_err();
        assert!(matches!(err, CoreError::LayoutOverflow { .. }));
    }

    #[test]
    fn test_last_column_spans_header_width() {
        let blocks = layout(vec![table(1)], 3).unwrap();
        assert_eq!(blocks[0].last_column(), 1);
    }
}
