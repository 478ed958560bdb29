//! Sale payment rules
//!
//! The acceptance rule for a payment is kept behind [`PaymentPolicy`] so the
//! sale service can swap it without touching its transactional logic.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when a payment is refused
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentError {
    #[error("not enough money: payment {amount} must exceed half of total {total}")]
    InsufficientPayment { amount: Decimal, total: Decimal },
}

/// Paid/debt split recorded on a sale after an accepted payment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub paid: Decimal,
    pub debt: Decimal,
}

/// Decides whether a payment is accepted for a sale total
pub trait PaymentPolicy: Send + Sync + std::fmt::Debug {
    fn settle(&self, total_price: Decimal, amount: Decimal) -> Result<Settlement, PaymentError>;
}

/// Accepts a payment only when it is strictly greater than half of the
/// sale total.
///
/// An accepted payment replaces any previous one: `paid` becomes the amount
/// and `debt` is `total - amount`, which goes negative on overpayment. There
/// is no installment tracking.
#[derive(Debug, Clone, Copy, Default)]
pub struct HalfOfTotalRule;

impl PaymentPolicy for HalfOfTotalRule {
    fn settle(&self, total_price: Decimal, amount: Decimal) -> Result<Settlement, PaymentError> {
        if amount > total_price / Decimal::TWO {
            Ok(Settlement {
                paid: amount,
                debt: total_price - amount,
            })
        } else {
            Err(PaymentError::InsufficientPayment {
                amount,
                total: total_price,
            })
        }
    }
}
