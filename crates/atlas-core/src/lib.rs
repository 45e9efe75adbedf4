//! # atlas-core: Pure Report Logic for Atlas Reports
//!
//! This crate is the **heart** of the daily sales report. It contains the
//! whole aggregation-and-layout engine as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Atlas Reports Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  apps/report-job (binary)                       │   │
//! │  │      CSV ingestion ──► pipeline ──► XLSX file + email           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ atlas-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   join    │  │ aggregate │  │  summary  │  │  layout   │  │   │
//! │  │   │ left join │  │ 3 derived │  │ 4 scalar  │  │ row-offset│  │   │
//! │  │   │ on product│  │  tables   │  │  totals   │  │bookkeeping│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SPREADSHEET ENGINE • NO NETWORK • PURE FUNCTIONS │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        atlas-sheet (writer) / atlas-notify (email)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (SaleRecord, PriceRecord, LineItem, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`schema`] - Required-column contract for the raw tables
//! - [`validation`] - Input record validation
//! - [`join`] - Left outer join of sales against prices
//! - [`aggregate`] - The three derived report tables
//! - [`summary`] - The four scalar totals for the email
//! - [`layout`] - Row placement of titled blocks in one sheet
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input =
//!    same output, so re-running a day reproduces the same report
//! 2. **No I/O**: CSV, spreadsheet, network access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are cents (i64); floats only
//!    exist at the writer's cell boundary
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use atlas_core::aggregate::aggregate;
//! use atlas_core::join::join;
//! use atlas_core::layout::{layout, DEFAULT_BLOCK_GAP};
//! use atlas_core::money::Money;
//! use atlas_core::types::*;
//!
//! let sales = vec![SaleRecord {
//!     order_id: "1".into(),
//!     product_id: "A".into(),
//!     quantity: 2,
//!     payment_state: PaymentState::Unpaid,
//!     departure_state: DepartureState::NotDispatch,
//! }];
//! let prices = vec![PriceRecord {
//!     product_id: "A".into(),
//!     product_name: "Widget".into(),
//!     unit_price: Money::from_cents(1000),
//! }];
//!
//! let items = join(&sales, &prices).unwrap();
//! let aggregates = aggregate(&items);
//! let blocks = layout(aggregates.report_tables(), DEFAULT_BLOCK_GAP).unwrap();
//!
//! // Three stacked blocks; the second title lands on row 5
//! assert_eq!(blocks[1].title_row(), 5);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregate;
pub mod error;
pub mod join;
pub mod layout;
pub mod money;
pub mod schema;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use atlas_core::Money` instead of
// `use atlas_core::money::Money`

pub use aggregate::{aggregate, Aggregates};
pub use error::{CoreError, CoreResult, ValidationError};
pub use join::join;
pub use layout::{layout, CellValue, SheetBlock, TableSpec, DEFAULT_BLOCK_GAP, SHEET_MAX_ROWS};
pub use money::Money;
pub use summary::{reduce_totals, Totals};
pub use types::*;
