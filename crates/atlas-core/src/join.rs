//! # Record Joiner
//!
//! Left outer join of the sales table against the price table.
//!
//! ## Join Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Left Outer Join on product_id                       │
//! │                                                                         │
//! │   sales (left)          prices (right)         line items (output)     │
//! │   ───────────           ──────────────         ───────────────────     │
//! │   order 1, A  ──────►   A: Widget $10   ──►    1, A, Widget, $20       │
//! │   order 1, B  ──────►   (no row for B)  ──►    1, B, ──, ──  (kept!)   │
//! │   order 2, A  ──────►   A: Widget $10   ──►    2, A, Widget, $10       │
//! │                                                                         │
//! │   • Every sale row appears EXACTLY ONCE, matched or not                │
//! │   • Output preserves the sales table's row order                       │
//! │   • Unmatched rows carry None prices (missing propagates)              │
//! │   • Duplicate product_id on the right side is FATAL, not fan-out       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Reject Duplicates?
//! A naive merge would emit one output row per matching price row, silently
//! multiplying order totals. The price table's contract is one row per
//! product; a violated contract is an upstream data bug the run must surface.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::types::{LineItem, PriceRecord, SaleRecord};

/// Joins sales against prices, producing one [`LineItem`] per sale row.
///
/// Pure function of its inputs: no side effects, deterministic output
/// order (the sales table's own order).
///
/// ## Errors
/// - [`CoreError::DuplicateProductId`] if the price table repeats a key.
///
/// ## Example
/// ```rust
/// use atlas_core::join::join;
/// use atlas_core::money::Money;
/// use atlas_core::types::*;
///
/// let sales = vec![SaleRecord {
///     order_id: "1".into(),
///     product_id: "A".into(),
///     quantity: 2,
///     payment_state: PaymentState::Unpaid,
///     departure_state: DepartureState::NotDispatch,
/// }];
/// let prices = vec![PriceRecord {
///     product_id: "A".into(),
///     product_name: "Widget".into(),
///     unit_price: Money::from_cents(1000),
/// }];
///
/// let items = join(&sales, &prices).unwrap();
/// assert_eq!(items[0].extended_price, Some(Money::from_cents(2000)));
/// ```
pub fn join(sales: &[SaleRecord], prices: &[PriceRecord]) -> CoreResult<Vec<LineItem>> {
    // Index the right side, rejecting ambiguous keys up front
    let mut by_product: HashMap<&str, &PriceRecord> = HashMap::with_capacity(prices.len());
    for price in prices {
        if by_product.insert(price.product_id.as_str(), price).is_some() {
            return Err(CoreError::DuplicateProductId {
                product_id: price.product_id.clone(),
            });
        }
    }

    let items = sales
        .iter()
        .map(|sale| {
            let matched = by_product.get(sale.product_id.as_str());
            let unit_price = matched.map(|p| p.unit_price);
            LineItem {
                order_id: sale.order_id.clone(),
                product_id: sale.product_id.clone(),
                quantity: sale.quantity,
                payment_state: sale.payment_state,
                departure_state: sale.departure_state,
                product_name: matched.map(|p| p.product_name.clone()),
                unit_price,
                extended_price: unit_price.map(|p| p.multiply_quantity(sale.quantity)),
            }
        })
        .collect();

    Ok(items)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{DepartureState, PaymentState};

    fn sale(order_id: &str, product_id: &str, quantity: i64) -> SaleRecord {
        SaleRecord {
            order_id: order_id.into(),
            product_id: product_id.into(),
            quantity,
            payment_state: PaymentState::Unpaid,
            departure_state: DepartureState::NotDispatch,
        }
    }

    fn price(product_id: &str, name: &str, cents: i64) -> PriceRecord {
        PriceRecord {
            product_id: product_id.into(),
            product_name: name.into(),
            unit_price: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_matched_row_gets_extended_price() {
        let items = join(&[sale("1", "A", 2)], &[price("A", "Widget", 1000)]).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_name.as_deref(), Some("Widget"));
        assert_eq!(items[0].unit_price, Some(Money::from_cents(1000)));
        assert_eq!(items[0].extended_price, Some(Money::from_cents(2000)));
    }

    #[test]
    fn test_unmatched_row_is_kept_with_missing_price() {
        let items = join(&[sale("1", "B", 5)], &[price("A", "Widget", 1000)]).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_name, None);
        assert_eq!(items[0].unit_price, None);
        // Missing propagates - it does NOT become $0.00 here
        assert_eq!(items[0].extended_price, None);
    }

    #[test]
    fn test_every_sale_row_appears_exactly_once_in_order() {
        let sales = vec![
            sale("2", "A", 1),
            sale("1", "B", 2),
            sale("1", "A", 3),
            sale("3", "A", 4),
        ];
        let items = join(&sales, &[price("A", "Widget", 100)]).unwrap();
        assert_eq!(items.len(), sales.len());
        let ids: Vec<&str> = items.iter().map(|i| i.order_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "1", "3"]);
    }

    #[test]
    fn test_duplicate_price_key_is_fatal() {
        let prices = vec![price("A", "Widget", 100), price("A", "Widget v2", 200)];
        let err = join(&[sale("1", "A", 1)], &prices).unwrap_err();
        assert!(matches!(
            err,
            CoreError::DuplicateProductId { product_id } if product_id == "A"
        ));
    }

    #[test]
    fn test_zero_quantity_extends_to_zero() {
        let items = join(&[sale("1", "A", 0)], &[price("A", "Widget", 999)]).unwrap();
        assert_eq!(items[0].extended_price, Some(Money::zero()));
    }

    #[test]
    fn test_empty_inputs_join_to_empty() {
        assert!(join(&[], &[]).unwrap().is_empty());
        assert!(join(&[], &[price("A", "Widget", 1)]).unwrap().is_empty());
    }
}
