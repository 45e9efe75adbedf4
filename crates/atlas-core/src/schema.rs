//! # Input Schema
//!
//! The required-column contract for the two raw tables.
//!
//! The ingestion boundary (whatever delivers the tables - in this workspace
//! the CSV reader in the report-job app) checks its headers against these
//! lists *before* parsing any row, so a malformed export fails with a
//! precise [`CoreError::MissingColumn`] instead of a row-level parse error
//! halfway through the file.

use crate::error::{CoreError, CoreResult};

/// Columns the sales table must carry.
pub const REQUIRED_SALE_COLUMNS: &[&str] = &[
    "order_id",
    "product_id",
    "quantity",
    "payment_state",
    "departure_state",
];

/// Columns the price table must carry.
pub const REQUIRED_PRICE_COLUMNS: &[&str] = &["product_id", "product_name", "unit_price"];

/// Checks that every required column is present in `headers`.
///
/// `table` names the offending input in the error ("sales" / "prices").
/// Extra columns are fine and ignored; only absence is fatal.
pub fn check_columns(table: &str, required: &[&str], headers: &[&str]) -> CoreResult<()> {
    for column in required {
        if !headers.iter().any(|h| h == column) {
            return Err(CoreError::MissingColumn {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}
