//! # CSV Ingestion
//!
//! Reads the two raw tables into typed records.
//!
//! ## Ingestion Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Header check        - against atlas_core::schema BEFORE any row    │
//! │                           parses, so a malformed export fails with     │
//! │                           "column X missing" instead of a row error    │
//! │  2. Column index lookup - extra columns are tolerated and ignored,     │
//! │                           column order does not matter                 │
//! │  3. Row parsing         - quantity as i64, states via FromStr,         │
//! │                           unit_price via Money's decimal parser;       │
//! │                           the first bad row aborts with its line       │
//! │                           number                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::info;

use atlas_core::schema::{check_columns, REQUIRED_PRICE_COLUMNS, REQUIRED_SALE_COLUMNS};
use atlas_core::{Money, PriceRecord, SaleRecord};

use crate::error::{JobError, JobResult};

// =============================================================================
// Public Loaders
// =============================================================================

/// Loads the sales table from `path`.
pub fn load_sales(path: &Path) -> JobResult<Vec<SaleRecord>> {
    let reader = csv::Reader::from_path(path).map_err(|source| JobError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;
    let sales = read_sales(reader, path)?;
    info!(path = %path.display(), rows = sales.len(), "Sales table loaded");
    Ok(sales)
}

/// Loads the price table from `path`.
pub fn load_prices(path: &Path) -> JobResult<Vec<PriceRecord>> {
    let reader = csv::Reader::from_path(path).map_err(|source| JobError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;
    let prices = read_prices(reader, path)?;
    info!(path = %path.display(), rows = prices.len(), "Price table loaded");
    Ok(prices)
}

// =============================================================================
// Readers (split out so tests can feed in-memory CSV)
// =============================================================================

fn read_sales<R: Read>(mut reader: csv::Reader<R>, origin: &Path) -> JobResult<Vec<SaleRecord>> {
    let columns = SaleColumns::resolve(&mut reader, origin)?;

    let mut sales = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| JobError::InputRead {
            path: origin.to_path_buf(),
            source,
        })?;
        sales.push(columns.parse(&record, origin)?);
    }
    Ok(sales)
}

fn read_prices<R: Read>(mut reader: csv::Reader<R>, origin: &Path) -> JobResult<Vec<PriceRecord>> {
    let columns = PriceColumns::resolve(&mut reader, origin)?;

    let mut prices = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| JobError::InputRead {
            path: origin.to_path_buf(),
            source,
        })?;
        prices.push(columns.parse(&record, origin)?);
    }
    Ok(prices)
}

// =============================================================================
// Column Resolution
// =============================================================================

struct SaleColumns {
    order_id: usize,
    product_id: usize,
    quantity: usize,
    payment_state: usize,
    departure_state: usize,
}

impl SaleColumns {
    fn resolve<R: Read>(reader: &mut csv::Reader<R>, origin: &Path) -> JobResult<Self> {
        let headers = headers_of(reader, origin)?;
        let names: Vec<&str> = headers.iter().collect();
        check_columns("sales", REQUIRED_SALE_COLUMNS, &names)?;

        Ok(SaleColumns {
            order_id: index_of(&names, "order_id"),
            product_id: index_of(&names, "product_id"),
            quantity: index_of(&names, "quantity"),
            payment_state: index_of(&names, "payment_state"),
            departure_state: index_of(&names, "departure_state"),
        })
    }

    fn parse(&self, record: &StringRecord, origin: &Path) -> JobResult<SaleRecord> {
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let quantity: i64 = field(self.quantity)
            .parse()
            .map_err(|_| bad_record(origin, record, "quantity is not an integer"))?;
        let payment_state = field(self.payment_state)
            .parse()
            .map_err(|e| bad_record_err(origin, record, e))?;
        let departure_state = field(self.departure_state)
            .parse()
            .map_err(|e| bad_record_err(origin, record, e))?;

        Ok(SaleRecord {
            order_id: field(self.order_id).to_string(),
            product_id: field(self.product_id).to_string(),
            quantity,
            payment_state,
            departure_state,
        })
    }
}

struct PriceColumns {
    product_id: usize,
    product_name: usize,
    unit_price: usize,
}

impl PriceColumns {
    fn resolve<R: Read>(reader: &mut csv::Reader<R>, origin: &Path) -> JobResult<Self> {
        let headers = headers_of(reader, origin)?;
        let names: Vec<&str> = headers.iter().collect();
        check_columns("prices", REQUIRED_PRICE_COLUMNS, &names)?;

        Ok(PriceColumns {
            product_id: index_of(&names, "product_id"),
            product_name: index_of(&names, "product_name"),
            unit_price: index_of(&names, "unit_price"),
        })
    }

    fn parse(&self, record: &StringRecord, origin: &Path) -> JobResult<PriceRecord> {
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let unit_price: Money = field(self.unit_price)
            .parse()
            .map_err(|e| bad_record_err(origin, record, e))?;

        Ok(PriceRecord {
            product_id: field(self.product_id).to_string(),
            product_name: field(self.product_name).to_string(),
            unit_price,
        })
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn headers_of<R: Read>(reader: &mut csv::Reader<R>, origin: &Path) -> JobResult<StringRecord> {
    reader
        .headers()
        .map(Clone::clone)
        .map_err(|source| JobError::InputRead {
            path: origin.to_path_buf(),
            source,
        })
}

// Only called after check_columns succeeded, so the name is present
fn index_of(names: &[&str], name: &str) -> usize {
    names.iter().position(|n| *n == name).unwrap_or(0)
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn bad_record(origin: &Path, record: &StringRecord, message: &str) -> JobError {
    JobError::InputRecord {
        path: origin.to_path_buf(),
        line: record_line(record),
        message: message.to_string(),
    }
}

fn bad_record_err(
    origin: &Path,
    record: &StringRecord,
    err: impl std::fmt::Display,
) -> JobError {
    JobError::InputRecord {
        path: origin.to_path_buf(),
        line: record_line(record),
        message: err.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
