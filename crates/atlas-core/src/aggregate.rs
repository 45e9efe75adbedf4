//! # Aggregator
//!
//! Derives the three report tables from the enriched line items.
//!
//! ## The Three Views
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     LineItem slice (join output)                        │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │  OrderWise     │  │ PendingPayments│  │  PendingDeparture      │    │
//! │  │                │  │                │  │                        │    │
//! │  │ group by order │  │ filter Unpaid  │  │ filter Not Dispatch    │    │
//! │  │ sum extended   │  │ project fields │  │ project fields         │    │
//! │  │ first-seen rep │  │ keep row order │  │ keep row order         │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering Contract
//! Grouping preserves **first-seen order_id ordering** and the projections
//! preserve the source row order. This is observable behavior, not an
//! accident: the rendered sheet is order-sensitive and must be stable
//! across runs on identical input.
//!
//! ## Empty Input Policy
//! `aggregate` on an empty slice returns three empty tables. The layout
//! engine handles zero-row tables (each still reserves its header row), so
//! nothing in this crate fails on an empty day. The report-job pipeline
//! separately refuses to run on an empty sales table - that policy lives
//! with the caller, not here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::layout::{CellValue, TableSpec};
use crate::money::Money;
use crate::types::{DepartureState, LineItem, OrderSummary, PaymentState};

// =============================================================================
// Block Titles & Headers
// =============================================================================

/// Title of the per-order block.
pub const ORDER_WISE_TITLE: &str = "OrderWiseDetails";
/// Title of the unpaid-lines block.
pub const PENDING_PAYMENTS_TITLE: &str = "PendingPayments";
/// Title of the undispatched-lines block.
pub const PENDING_DEPARTURE_TITLE: &str = "PendingDeparture";

/// Column headers of the per-order block, in render order.
pub const ORDER_WISE_HEADER: &[&str] =
    &["order_id", "total_price", "payment_state", "departure_state"];
/// Column headers of the unpaid-lines block, in render order.
pub const PENDING_PAYMENTS_HEADER: &[&str] = &[
    "order_id",
    "product_name",
    "quantity",
    "total_price",
    "payment_state",
];
/// Column headers of the undispatched-lines block, in render order.
pub const PENDING_DEPARTURE_HEADER: &[&str] = &[
    "order_id",
    "product_name",
    "quantity",
    "total_price",
    "payment_state",
    "departure_state",
];

// =============================================================================
// Projected Rows
// =============================================================================

/// One unpaid line item, projected for the PendingPayments block.
///
/// `total_price` is that row's own extended price - no re-aggregation
/// happens at the row level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPaymentRow {
    pub order_id: String,
    pub product_name: Option<String>,
    pub quantity: i64,
    pub total_price: Option<Money>,
    pub payment_state: PaymentState,
}

/// One undispatched line item, projected for the PendingDeparture block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDepartureRow {
    pub order_id: String,
    pub product_name: Option<String>,
    pub quantity: i64,
    pub total_price: Option<Money>,
    pub payment_state: PaymentState,
    pub departure_state: DepartureState,
}

// =============================================================================
// Aggregates
// =============================================================================

/// The three derived tables the daily report renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregates {
    /// One row per distinct order, first-seen order.
    pub order_wise: Vec<OrderSummary>,

    /// Unpaid line items, source row order.
    pub pending_payments: Vec<PendingPaymentRow>,

    /// Undispatched line items, source row order.
    pub pending_departure: Vec<PendingDepartureRow>,
}

impl Aggregates {
    /// Converts the three tables into layout input, in render order.
    ///
    /// This is the single place that fixes block titles, column headers,
    /// and cell typing for the sheet. Missing prices render as blank cells.
    pub fn report_tables(&self) -> Vec<TableSpec> {
        let order_wise_rows = self
            .order_wise
            .iter()
            .map(|o| {
                vec![
                    CellValue::Text(o.order_id.clone()),
                    CellValue::Money(o.total_price),
                    CellValue::Text(o.payment_state.to_string()),
                    CellValue::Text(o.departure_state.to_string()),
                ]
            })
            .collect();

        let pending_payment_rows = self
            .pending_payments
            .iter()
            .map(|r| {
                vec![
                    CellValue::Text(r.order_id.clone()),
                    name_cell(&r.product_name),
                    CellValue::Int(r.quantity),
                    money_cell(r.total_price),
                    CellValue::Text(r.payment_state.to_string()),
                ]
            })
            .collect();

        let pending_departure_rows = self
            .pending_departure
            .iter()
            .map(|r| {
                vec![
                    CellValue::Text(r.order_id.clone()),
                    name_cell(&r.product_name),
                    CellValue::Int(r.quantity),
                    money_cell(r.total_price),
                    CellValue::Text(r.payment_state.to_string()),
                    CellValue::Text(r.departure_state.to_string()),
                ]
            })
            .collect();

        vec![
            TableSpec::new(ORDER_WISE_TITLE, ORDER_WISE_HEADER, order_wise_rows),
            TableSpec::new(
                PENDING_PAYMENTS_TITLE,
                PENDING_PAYMENTS_HEADER,
                pending_payment_rows,
            ),
            TableSpec::new(
                PENDING_DEPARTURE_TITLE,
                PENDING_DEPARTURE_HEADER,
                pending_departure_rows,
            ),
        ]
    }
}

fn name_cell(name: &Option<String>) -> CellValue {
    match name {
        Some(n) => CellValue::Text(n.clone()),
        None => CellValue::Missing,
    }
}

fn money_cell(amount: Option<Money>) -> CellValue {
    match amount {
        Some(m) => CellValue::Money(m),
        None => CellValue::Missing,
    }
}

// =============================================================================
// Aggregation
// =============================================================================

/// Derives the three report tables from the enriched line items.
///
/// Pure function; see the module docs for the ordering and empty-input
/// contracts.
///
/// ## Grouping Rules
/// - `total_price` sums extended prices with missing treated as $0.00
/// - `payment_state` / `departure_state` come from the first line item
///   encountered for the order (representative policy; a mixed-state order
///   keeps its first line's states)
pub fn aggregate(items: &[LineItem]) -> Aggregates {
    // First-seen grouping: the Vec keeps order, the map finds the slot
    let mut order_wise: Vec<OrderSummary> = Vec::new();
    let mut slot_by_order: HashMap<&str, usize> = HashMap::new();

    for item in items {
        match slot_by_order.get(item.order_id.as_str()) {
            Some(&slot) => {
                order_wise[slot].total_price += item.extended_or_zero();
            }
            None => {
                slot_by_order.insert(item.order_id.as_str(), order_wise.len());
                order_wise.push(OrderSummary {
                    order_id: item.order_id.clone(),
                    total_price: item.extended_or_zero(),
                    payment_state: item.payment_state,
                    departure_state: item.departure_state,
                });
            }
        }
    }

    let pending_payments = items
        .iter()
        .filter(|i| i.payment_state == PaymentState::Unpaid)
        .map(|i| PendingPaymentRow {
            order_id: i.order_id.clone(),
            product_name: i.product_name.clone(),
            quantity: i.quantity,
            total_price: i.extended_price,
            payment_state: i.payment_state,
        })
        .collect();

    let pending_departure = items
        .iter()
        .filter(|i| i.departure_state == DepartureState::NotDispatch)
        .map(|i| PendingDepartureRow {
            order_id: i.order_id.clone(),
            product_name: i.product_name.clone(),
            quantity: i.quantity,
            total_price: i.extended_price,
            payment_state: i.payment_state,
            departure_state: i.departure_state,
        })
        .collect();

    Aggregates {
        order_wise,
        pending_payments,
        pending_departure,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(
        order_id: &str,
        payment: PaymentState,
        departure: DepartureState,
        extended_cents: Option<i64>,
    ) -> LineItem {
        LineItem {
            order_id: order_id.into(),
            product_id: "A".into(),
            quantity: 1,
            payment_state: payment,
            departure_state: departure,
            product_name: Some("Widget".into()),
            unit_price: extended_cents.map(Money::from_cents),
            extended_price: extended_cents.map(Money::from_cents),
        }
    }

    #[test]
    fn test_groups_by_first_seen_order() {
        let items = vec![
            item("B", PaymentState::Paid, DepartureState::Dispatch, Some(100)),
            item("A", PaymentState::Paid, DepartureState::Dispatch, Some(200)),
            item("B", PaymentState::Paid, DepartureState::Dispatch, Some(300)),
        ];
        let aggregates = aggregate(&items);
        let ids: Vec<&str> = aggregates
            .order_wise
            .iter()
            .map(|o| o.order_id.as_str())
            .collect();
        // NOT sorted - first-seen order of the input
        assert_eq!(ids, vec!["B", "A"]);
        assert_eq!(aggregates.order_wise[0].total_price.cents(), 400);
        assert_eq!(aggregates.order_wise[1].total_price.cents(), 200);
    }

    #[test]
    fn test_representative_states_come_from_first_line() {
        let items = vec![
            item("1", PaymentState::Unpaid, DepartureState::NotDispatch, None),
            item("1", PaymentState::Paid, DepartureState::Dispatch, Some(100)),
        ];
        let aggregates = aggregate(&items);
        assert_eq!(aggregates.order_wise.len(), 1);
        assert_eq!(aggregates.order_wise[0].payment_state, PaymentState::Unpaid);
        assert_eq!(
            aggregates.order_wise[0].departure_state,
            DepartureState::NotDispatch
        );
    }

    #[test]
    fn test_missing_extended_price_counts_as_zero_in_totals() {
        let items = vec![
            item("1", PaymentState::Paid, DepartureState::Dispatch, None),
            item("1", PaymentState::Paid, DepartureState::Dispatch, Some(250)),
        ];
        let aggregates = aggregate(&items);
        assert_eq!(aggregates.order_wise[0].total_price.cents(), 250);
    }

    #[test]
    fn test_order_totals_conserve_item_sum() {
        // sum(order_wise.total_price) == sum(extended, missing as 0)
        let items = vec![
            item("1", PaymentState::Paid, DepartureState::Dispatch, Some(100)),
            item("2", PaymentState::Unpaid, DepartureState::Dispatch, None),
            item("1", PaymentState::Paid, DepartureState::Dispatch, Some(50)),
            item("3", PaymentState::Paid, DepartureState::NotDispatch, Some(7)),
        ];
        let aggregates = aggregate(&items);
        let order_total: Money = aggregates.order_wise.iter().map(|o| o.total_price).sum();
        let item_total: Money = items.iter().map(|i| i.extended_or_zero()).sum();
        assert_eq!(order_total, item_total);
    }

    #[test]
    fn test_pending_payments_filter_and_projection() {
        let items = vec![
            item("1", PaymentState::Paid, DepartureState::Dispatch, Some(100)),
            item("2", PaymentState::Unpaid, DepartureState::Dispatch, Some(200)),
            item("3", PaymentState::Unpaid, DepartureState::Dispatch, None),
        ];
        let aggregates = aggregate(&items);
        assert_eq!(aggregates.pending_payments.len(), 2);
        // Row-level total is the row's own extended price, missing stays missing
        assert_eq!(
            aggregates.pending_payments[0].total_price,
            Some(Money::from_cents(200))
        );
        assert_eq!(aggregates.pending_payments[1].total_price, None);
        let ids: Vec<&str> = aggregates
            .pending_payments
            .iter()
            .map(|r| r.order_id.as_str())
            .collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_pending_departure_filter() {
        let items = vec![
            item("1", PaymentState::Paid, DepartureState::NotDispatch, Some(9)),
            item("2", PaymentState::Paid, DepartureState::Dispatch, Some(10)),
        ];
        let aggregates = aggregate(&items);
        assert_eq!(aggregates.pending_departure.len(), 1);
        assert_eq!(aggregates.pending_departure[0].order_id, "1");
        assert_eq!(
            aggregates.pending_departure[0].departure_state,
            DepartureState::NotDispatch
        );
    }

    #[test]
    fn test_empty_input_yields_three_empty_tables() {
        let aggregates = aggregate(&[]);
        assert!(aggregates.order_wise.is_empty());
        assert!(aggregates.pending_payments.is_empty());
        assert!(aggregates.pending_departure.is_empty());

        // Still converts to three zero-row table specs in render order
        let tables = aggregates.report_tables();
        assert_eq!(tables.len(), 3);
        assert!(tables.iter().all(|t| t.rows.is_empty()));
    }

    #[test]
    fn test_report_tables_headers_match_contract() {
        let tables = aggregate(&[]).report_tables();
        assert_eq!(tables[0].title, "OrderWiseDetails");
        assert_eq!(
            tables[0].header,
            vec!["order_id", "total_price", "payment_state", "departure_state"]
        );
        assert_eq!(tables[1].title, "PendingPayments");
        assert_eq!(tables[1].header.len(), 5);
        assert_eq!(tables[2].title, "PendingDeparture");
        assert_eq!(tables[2].header.len(), 6);
    }

    #[test]
    fn test_mixed_orders_end_to_end() {
        // One unpaid, undispatched sale of 2 × $10.00 widgets
        let items = vec![LineItem {
            order_id: "1".into(),
            product_id: "A".into(),
            quantity: 2,
            payment_state: PaymentState::Unpaid,
            departure_state: DepartureState::NotDispatch,
            product_name: Some("Widget".into()),
            unit_price: Some(Money::from_cents(1000)),
            extended_price: Some(Money::from_cents(2000)),
        }];
        let aggregates = aggregate(&items);

        assert_eq!(aggregates.order_wise.len(), 1);
        assert_eq!(aggregates.order_wise[0].total_price.cents(), 2000);
        assert_eq!(aggregates.order_wise[0].payment_state, PaymentState::Unpaid);

        assert_eq!(aggregates.pending_payments.len(), 1);
        assert_eq!(
            aggregates.pending_payments[0].product_name.as_deref(),
            Some("Widget")
        );
        assert_eq!(aggregates.pending_payments[0].quantity, 2);

        assert_eq!(aggregates.pending_departure.len(), 1);
    }
}
