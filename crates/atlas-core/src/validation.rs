//! # Validation Module
//!
//! Input validation for the raw sales and price records.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Ingestion (report-job app)                                   │
//! │  ├── Header check against atlas_core::schema                           │
//! │  └── Field parsing (quantity as i64, states via FromStr, Money)        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - domain rules on parsed records                 │
//! │  ├── Non-empty identifiers                                             │
//! │  ├── Non-negative quantities                                           │
//! │  └── Non-negative unit prices                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Join (uniqueness of the price table's product_id)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use atlas_core::money::Money;
//! use atlas_core::types::PriceRecord;
//! use atlas_core::validation::validate_price_record;
//!
//! let record = PriceRecord {
//!     product_id: "P-001".into(),
//!     product_name: "Widget".into(),
//!     unit_price: Money::from_cents(1000),
//! };
//! validate_price_record(&record).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::{PriceRecord, SaleRecord};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Record Validators
// =============================================================================

/// Validates one raw sale line.
///
/// ## Rules
/// - order_id and product_id must not be empty
/// - quantity must be >= 0
pub fn validate_sale_record(record: &SaleRecord) -> ValidationResult<()> {
    if record.order_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "order_id".to_string(),
        });
    }

    if record.product_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product_id".to_string(),
        });
    }

    if record.quantity < 0 {
        return Err(ValidationError::NegativeQuantity {
            order_id: record.order_id.clone(),
            product_id: record.product_id.clone(),
            quantity: record.quantity,
        });
    }

    Ok(())
}

/// Validates one raw price row.
///
/// ## Rules
/// - product_id must not be empty
/// - unit_price must be >= 0
///
/// Uniqueness of product_id is not checked here - that is join-shaped
/// (it needs the whole table) and lives in [`crate::join`].
pub fn validate_price_record(record: &PriceRecord) -> ValidationResult<()> {
    if record.product_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product_id".to_string(),
        });
    }

    if record.unit_price.is_negative() {
        return Err(ValidationError::NegativePrice {
            product_id: record.product_id.clone(),
        });
    }

    Ok(())
}

/// Validates both input tables, failing on the first bad record.
pub fn validate_inputs(sales: &[SaleRecord], prices: &[PriceRecord]) -> ValidationResult<()> {
    for sale in sales {
        validate_sale_record(sale)?;
    }
    for price in prices {
        validate_price_record(price)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
