//! Stock ledger, sale aggregation and payment tests
//!
//! Tests the rules applied by the sale and receipt paths without a
//! database, including:
//! - Exact-quantity deductions and the one-too-many boundary
//! - Sale totals tracking the sum of line totals after every mutation
//! - The half-of-total payment rule

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{deduct, restock, HalfOfTotalRule, LedgerError, PaymentError, PaymentPolicy, Receipt};
use std::str::FromStr;
use uuid::Uuid;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// In-memory stand-in for one ledger row and the sale selling from it
#[derive(Debug, Default)]
struct Counter {
    stock: i32,
    sale_total: Decimal,
    lines: Vec<Decimal>,
}

impl Counter {
    fn sell(&mut self, quantity: i32, price: Decimal) -> Result<(), LedgerError> {
        let d = deduct(self.stock, quantity, price)?;
        self.stock = d.remaining;
        self.lines.push(d.total_price);
        self.sale_total += d.total_price;
        Ok(())
    }

    fn receive(&mut self, quantity: i32) {
        self.stock = restock(self.stock, quantity).unwrap();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Test selling exactly what is left empties the row
    #[test]
    fn test_exact_quantity_then_one_more() {
        let mut counter = Counter::default();
        counter.receive(5);

        counter.sell(5, dec("10")).unwrap();
        assert_eq!(counter.stock, 0);

        assert_eq!(
            counter.sell(1, dec("10")),
            Err(LedgerError::InsufficientStock {
                available: 0,
                requested: 1
            })
        );
        assert_eq!(counter.sale_total, dec("50"));
    }

    /// Test a rejected line leaves stock and total untouched
    #[test]
    fn test_rejected_line_has_no_effect() {
        let mut counter = Counter::default();
        counter.receive(5);
        counter.sell(3, dec("2.50")).unwrap();

        assert!(counter.sell(3, dec("2.50")).is_err());
        assert_eq!(counter.stock, 2);
        assert_eq!(counter.sale_total, dec("7.50"));
        assert_eq!(counter.lines.len(), 1);
    }

    /// Test two receipts accumulate into one row
    #[test]
    fn test_receipts_accumulate() {
        let mut counter = Counter::default();
        counter.receive(10);
        counter.receive(5);
        assert_eq!(counter.stock, 15);
    }

    /// Test line price is a snapshot of the product price at sale time
    #[test]
    fn test_price_snapshot() {
        let mut counter = Counter::default();
        counter.receive(10);
        counter.sell(2, dec("100")).unwrap();
        // product price changes afterwards
        counter.sell(1, dec("120")).unwrap();

        assert_eq!(counter.lines, vec![dec("200"), dec("120")]);
        assert_eq!(counter.sale_total, dec("320"));
    }

    /// Test receipt cost uses the coming price
    #[test]
    fn test_receipt_cost() {
        let receipt = Receipt::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Flour 1kg",
            10,
            dec("0.80"),
            dec("1.20"),
        )
        .unwrap();
        assert_eq!(receipt.total_cost(), dec("8.00"));
    }

    /// Test the payment scenario: total 1000, 400 refused, 600 accepted
    #[test]
    fn test_make_pay_scenario() {
        let rule = HalfOfTotalRule;
        let total = dec("1000");

        assert_eq!(
            rule.settle(total, dec("400")),
            Err(PaymentError::InsufficientPayment {
                amount: dec("400"),
                total
            })
        );

        let settlement = rule.settle(total, dec("600")).unwrap();
        assert_eq!(settlement.paid, dec("600"));
        assert_eq!(settlement.debt, dec("400"));
    }

    /// Test exactly half of the total is not enough
    #[test]
    fn test_make_pay_exact_half() {
        assert!(HalfOfTotalRule.settle(dec("1000"), dec("500")).is_err());
        assert!(HalfOfTotalRule.settle(dec("1000"), dec("500.01")).is_ok());
    }

    /// Test nothing can be paid on an empty sale
    #[test]
    fn test_make_pay_empty_sale() {
        assert!(HalfOfTotalRule.settle(Decimal::ZERO, Decimal::ZERO).is_err());
        let s = HalfOfTotalRule.settle(Decimal::ZERO, dec("1")).unwrap();
        assert_eq!(s.debt, dec("-1"));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Sale total equals the sum of line totals after every line, and stock
    /// never goes negative.
    #[test]
    fn prop_sale_total_tracks_lines(
        initial in 0..200i32,
        lines in prop::collection::vec((1..30i32, 0..10_000i64), 0..20),
    ) {
        let mut counter = Counter::default();
        if initial > 0 {
            counter.receive(initial);
        }
        let mut sold = 0;

        for (quantity, cents) in lines {
            let price = Decimal::new(cents, 2);
            let before = counter.stock;
            match counter.sell(quantity, price) {
                Ok(()) => {
                    sold += quantity;
                    prop_assert!(quantity <= before);
                }
                Err(LedgerError::InsufficientStock { available, requested }) => {
                    prop_assert_eq!(available, before);
                    prop_assert_eq!(requested, quantity);
                    prop_assert!(quantity > before);
                }
                Err(other) => prop_assert!(false, "unexpected error {:?}", other),
            }

            let sum: Decimal = counter.lines.iter().copied().sum();
            prop_assert_eq!(counter.sale_total, sum);
            prop_assert!(counter.stock >= 0);
            prop_assert_eq!(counter.stock + sold, initial);
        }
    }

    /// Payment is accepted iff it exceeds half of the total, and then
    /// debt == total - amount exactly.
    #[test]
    fn prop_payment_rule(total_cents in 0..10_000_000i64, amount_cents in 0..10_000_000i64) {
        let total = Decimal::new(total_cents, 2);
        let amount = Decimal::new(amount_cents, 2);

        match HalfOfTotalRule.settle(total, amount) {
            Ok(s) => {
                prop_assert!(amount_cents * 2 > total_cents);
                prop_assert_eq!(s.paid, amount);
                prop_assert_eq!(s.debt, total - amount);
            }
            Err(_) => prop_assert!(amount_cents * 2 <= total_cents),
        }
    }
}
