//! # Summary Reducer
//!
//! Derives the four scalar totals the email summary embeds.
//!
//! Two independent partitions of the same line items:
//! ```text
//! by payment_state:      Paid ──► paid        Unpaid ──────► unpaid
//! by departure_state:    Dispatch ──► dispatched   Not Dispatch ──► undispatched
//! ```
//! Each pair sums to the same grand total (missing extended prices count
//! as zero in both partitions).

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{DepartureState, LineItem, PaymentState};

/// The four scalar totals for the notification summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of extended prices over Paid lines.
    pub paid: Money,
    /// Sum of extended prices over Unpaid lines.
    pub unpaid: Money,
    /// Sum of extended prices over Dispatch lines.
    pub dispatched: Money,
    /// Sum of extended prices over Not Dispatch lines.
    pub undispatched: Money,
}

impl Totals {
    /// Grand total via the payment partition (equals the departure one).
    pub fn grand_total(&self) -> Money {
        self.paid + self.unpaid
    }
}

/// Reduces the line items to the four partitioned totals.
///
/// Pure; tolerates empty input (all totals zero). Malformed records are
/// caught upstream, so there is nothing to fail on here.
pub fn reduce_totals(items: &[LineItem]) -> Totals {
    let mut totals = Totals::default();

    for item in items {
        let amount = item.extended_or_zero();
        match item.payment_state {
            PaymentState::Paid => totals.paid += amount,
            PaymentState::Unpaid => totals.unpaid += amount,
        }
        match item.departure_state {
            DepartureState::Dispatch => totals.dispatched += amount,
            DepartureState::NotDispatch => totals.undispatched += amount,
        }
    }

    totals
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(
        payment: PaymentState,
        departure: DepartureState,
        extended_cents: Option<i64>,
    ) -> LineItem {
        LineItem {
            order_id: "1".into(),
            product_id: "A".into(),
            quantity: 1,
            payment_state: payment,
            departure_state: departure,
            product_name: None,
            unit_price: None,
            extended_price: extended_cents.map(Money::from_cents),
        }
    }

    #[test]
    fn test_partitions_are_independent() {
        let items = vec![
            item(PaymentState::Paid, DepartureState::NotDispatch, Some(100)),
            item(PaymentState::Unpaid, DepartureState::Dispatch, Some(40)),
            item(PaymentState::Paid, DepartureState::Dispatch, Some(60)),
        ];
        let totals = reduce_totals(&items);
        assert_eq!(totals.paid.cents(), 160);
        assert_eq!(totals.unpaid.cents(), 40);
        assert_eq!(totals.dispatched.cents(), 100);
        assert_eq!(totals.undispatched.cents(), 100);
    }

    #[test]
    fn test_both_partitions_sum_to_the_same_grand_total() {
        let items = vec![
            item(PaymentState::Paid, DepartureState::Dispatch, Some(500)),
            item(PaymentState::Unpaid, DepartureState::NotDispatch, None),
            item(PaymentState::Unpaid, DepartureState::Dispatch, Some(25)),
        ];
        let totals = reduce_totals(&items);
        assert_eq!(totals.paid + totals.unpaid, totals.dispatched + totals.undispatched);
        assert_eq!(totals.grand_total().cents(), 525);
    }

    #[test]
    fn test_missing_counts_as_zero() {
        let items = vec![item(PaymentState::Unpaid, DepartureState::NotDispatch, None)];
        let totals = reduce_totals(&items);
        assert_eq!(totals.unpaid, Money::zero());
        assert_eq!(totals.undispatched, Money::zero());
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        assert_eq!(reduce_totals(&[]), Totals::default());
    }
}
