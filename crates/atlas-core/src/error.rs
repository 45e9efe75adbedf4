//! # Error Types
//!
//! Domain-specific error types for atlas-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  atlas-core errors (this file)                                         │
//! │  ├── CoreError        - Join / aggregation / layout failures           │
//! │  └── ValidationError  - Input record validation failures               │
//! │                                                                         │
//! │  atlas-sheet errors (separate crate)                                   │
//! │  └── SheetError       - Spreadsheet write failures                     │
//! │                                                                         │
//! │  report-job errors (in app)                                            │
//! │  └── JobError         - What the operator sees (per stage)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SheetError → JobError → exit code │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (column name, product_id, etc.)
//! 3. Errors are enum variants, never String
//! 4. Every stage fails fast - no silent defaulting of required fields

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core report-pipeline errors.
///
/// Each variant corresponds to a stage that must abort the whole run:
/// the job either produces one complete, correctly laid-out report or
/// nothing at all.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required column is missing from one of the raw input tables.
    ///
    /// ## When This Occurs
    /// - Sale.csv is missing one of: order_id, product_id, quantity,
    ///   payment_state, departure_state
    /// - Price.csv is missing one of: product_id, product_name, unit_price
    ///
    /// Raised by the ingestion boundary before any row is parsed, using the
    /// column lists in [`crate::schema`].
    #[error("Required column '{column}' missing from {table} table")]
    MissingColumn { table: String, column: String },

    /// The price table contains the same product_id more than once.
    ///
    /// ## When This Occurs
    /// - Two price rows share a product_id, which would make the join
    ///   ambiguous (a naive merge would fan every matching sale row out)
    ///
    /// Policy: reject outright rather than silently taking the first match.
    #[error("Duplicate product_id '{product_id}' in price table; join would be ambiguous")]
    DuplicateProductId { product_id: String },

    /// The sales table contains no rows at all.
    ///
    /// ## When This Occurs
    /// - The daily export produced an empty Sale.csv
    ///
    /// The aggregation functions themselves tolerate empty input (they
    /// return empty tables); this error is the *pipeline's* policy that a
    /// daily report must cover at least one sale.
    #[error("Sales input contains no rows; refusing to produce an empty report")]
    EmptyInput,

    /// The stacked blocks would run past the spreadsheet row limit.
    ///
    /// ## When This Occurs
    /// - The three tables plus gaps need more rows than XLSX allows
    ///   (1,048,576 rows per sheet)
    #[error("Report layout needs {rows} rows but the sheet limit is {max}")]
    LayoutOverflow { rows: u64, max: u32 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input record validation errors.
///
/// These occur when a raw record parses structurally but carries a value
/// the domain rejects. Used for early validation before the join runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Quantity on a sale line is negative.
    #[error("Quantity {quantity} on order '{order_id}' product '{product_id}' must not be negative")]
    NegativeQuantity {
        order_id: String,
        product_id: String,
        quantity: i64,
    },

    /// Unit price on a price row is negative.
    #[error("Unit price for product '{product_id}' must not be negative")]
    NegativePrice { product_id: String },

    /// A state column holds a value outside its allowed set.
    #[error("{field} has invalid value '{value}'")]
    InvalidStateValue { field: String, value: String },

    /// A monetary amount failed to parse.
    #[error("Invalid money amount '{value}'")]
    InvalidAmount { value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
