//! # Domain Types
//!
//! Core domain types used throughout Atlas Reports.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   SaleRecord    │   │  PriceRecord    │   │    LineItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  order_id       │   │  product_id     │   │  sale fields    │       │
//! │  │  product_id     │ + │  product_name   │ = │  + product_name │       │
//! │  │  quantity       │   │  unit_price     │   │  + unit_price   │       │
//! │  │  payment_state  │   └─────────────────┘   │  + extended     │       │
//! │  │  departure_state│                         └─────────────────┘       │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  OrderSummary   │   │  PaymentState   │   │ DepartureState  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  one row per    │   │  Paid           │   │  Dispatch       │       │
//! │  │  order_id       │   │  Unpaid         │   │  NotDispatch    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Left-Join Semantics
//! A `LineItem` always exists for every `SaleRecord`, even when the product
//! has no row in the price table. In that case `unit_price` and
//! `extended_price` are `None` - missing propagates, it never defaults to 0
//! at this layer. Aggregation decides how to treat the gap.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Payment State
// =============================================================================

/// Whether an order line has been paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentState {
    /// Payment received.
    Paid,
    /// Payment still outstanding - shows up in the PendingPayments block.
    Unpaid,
}

impl PaymentState {
    /// Returns the canonical string used in the raw tables and the report.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentState::Paid => "Paid",
            PaymentState::Unpaid => "Unpaid",
        }
    }
}

impl fmt::Display for PaymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the raw table representation.
///
/// Anything outside the two known values is rejected - a typo'd state in
/// the export must fail the run, not silently land in the wrong bucket.
impl FromStr for PaymentState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Paid" => Ok(PaymentState::Paid),
            "Unpaid" => Ok(PaymentState::Unpaid),
            other => Err(ValidationError::InvalidStateValue {
                field: "payment_state".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Departure State
// =============================================================================

/// Whether an order line's goods have physically shipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepartureState {
    /// Goods have left the warehouse.
    Dispatch,
    /// Goods still waiting - shows up in the PendingDeparture block.
    #[serde(rename = "Not Dispatch")]
    NotDispatch,
}

impl DepartureState {
    /// Returns the canonical string used in the raw tables and the report.
    ///
    /// The source system writes "Not Dispatch" (with a space); we keep that
    /// spelling on the wire so re-imported reports match the raw exports.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DepartureState::Dispatch => "Dispatch",
            DepartureState::NotDispatch => "Not Dispatch",
        }
    }
}

impl fmt::Display for DepartureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DepartureState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Dispatch" => Ok(DepartureState::Dispatch),
            "Not Dispatch" => Ok(DepartureState::NotDispatch),
            other => Err(ValidationError::InvalidStateValue {
                field: "departure_state".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Raw Records
// =============================================================================

/// One line item of one order, as delivered by the sales export.
///
/// Source of truth for one order/product pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Business identifier of the order this line belongs to.
    pub order_id: String,

    /// Product sold on this line - the join key against the price table.
    pub product_id: String,

    /// Units sold. Validated non-negative before the join runs.
    pub quantity: i64,

    /// Payment status of this line.
    pub payment_state: PaymentState,

    /// Shipment status of this line.
    pub departure_state: DepartureState,
}

/// One product's pricing row, as delivered by the price export.
///
/// `product_id` must be unique across the table; a duplicate makes the
/// join ambiguous and fails the run (see [`crate::join`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Join key against the sales table.
    pub product_id: String,

    /// Display name shown in the pending blocks.
    pub product_name: String,

    /// Unit price in cents. Validated non-negative.
    pub unit_price: Money,
}

// =============================================================================
// Derived Types
// =============================================================================

/// A sale line enriched with pricing - the output of the Record Joiner.
///
/// Immutable after creation; everything downstream (aggregation, summary
/// totals, pending projections) derives from a slice of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub order_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub payment_state: PaymentState,
    pub departure_state: DepartureState,

    /// Name from the matched price row; `None` when no price row matched.
    pub product_name: Option<String>,

    /// Unit price from the matched price row; `None` when unmatched.
    pub unit_price: Option<Money>,

    /// quantity × unit_price; `None` propagates from a missing unit_price.
    pub extended_price: Option<Money>,
}

impl LineItem {
    /// The line's worth for summing purposes: missing counts as zero.
    ///
    /// The `Option` on `extended_price` preserves the fact that the price
    /// was missing; this accessor is the single place where aggregation
    /// collapses that gap to $0.00.
    #[inline]
    pub fn extended_or_zero(&self) -> Money {
        self.extended_price.unwrap_or_else(Money::zero)
    }
}

/// One aggregated row per order - the OrderWiseDetails block.
///
/// Invariant: exactly one row per distinct order_id present in the line
/// items, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: String,

    /// Sum of extended prices over the order's lines (missing treated as 0).
    pub total_price: Money,

    /// State of the order's first-seen line. A deliberate "representative"
    /// policy, not a consistency guarantee across mixed-state orders.
    pub payment_state: PaymentState,

    /// Likewise, from the first-seen line.
    pub departure_state: DepartureState,
}

// =============================================================================
// Unit Tests
// =============================================================================
