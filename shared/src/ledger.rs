//! Stock ledger rules
//!
//! The ledger keeps one row per (product, branch) pair holding the quantity
//! on hand and reference prices. Rows are written by two paths: goods
//! receipts add quantity, sale line items deduct it. The functions here
//! decide whether a movement is allowed and what the row becomes; the
//! backend applies the result inside a database transaction.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::validation::fits_money_scale;

/// Errors raised by stock ledger movements
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("not enough quantity: requested {requested}, available {available}")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("quantity must be positive, got {0}")]
    NonPositiveQuantity(i32),

    #[error("{field} cannot be negative")]
    NegativePrice { field: &'static str },

    #[error("{field} must have at most 2 decimal places")]
    SubCentPrice { field: &'static str },

    #[error("ledger quantity overflow")]
    QuantityOverflow,
}

/// Result of deducting stock for a sale line item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deduction {
    /// Quantity left on the ledger row after the deduction
    pub remaining: i32,
    /// Unit price snapshot taken from the product
    pub unit_price: Decimal,
    /// `quantity × unit_price`
    pub total_price: Decimal,
}

/// Deduct `requested` units from a ledger row holding `available` units.
///
/// Deducting exactly the available quantity is allowed and leaves zero.
/// The unit price is the product's current price, not the ledger's stored
/// sale price.
pub fn deduct(available: i32, requested: i32, unit_price: Decimal) -> Result<Deduction, LedgerError> {
    if requested <= 0 {
        return Err(LedgerError::NonPositiveQuantity(requested));
    }
    if available < requested {
        return Err(LedgerError::InsufficientStock {
            available,
            requested,
        });
    }

    Ok(Deduction {
        remaining: available - requested,
        unit_price,
        total_price: Decimal::from(requested) * unit_price,
    })
}

/// Return `quantity` units to a ledger row holding `available` units
pub fn restock(available: i32, quantity: i32) -> Result<i32, LedgerError> {
    if quantity <= 0 {
        return Err(LedgerError::NonPositiveQuantity(quantity));
    }
    available
        .checked_add(quantity)
        .ok_or(LedgerError::QuantityOverflow)
}

/// Apply a signed change in line-item quantity to a ledger row.
///
/// A positive `delta` takes more stock from the ledger, a negative one
/// gives stock back. Returns the new ledger quantity.
pub fn adjust(available: i32, delta: i32) -> Result<i32, LedgerError> {
    match delta {
        0 => Ok(available),
        d if d > 0 => deduct(available, d, Decimal::ZERO).map(|d| d.remaining),
        d => restock(available, d.checked_neg().ok_or(LedgerError::QuantityOverflow)?),
    }
}

/// A validated goods receipt for one product at one branch.
///
/// Receiving into an existing row adds the quantity and refreshes the sale
/// price from the product; the recorded coming price of the existing row is
/// kept as-is rather than averaged with the new receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub product_id: Uuid,
    pub branch_id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub coming_price: Decimal,
    pub sale_price: Decimal,
}

impl Receipt {
    pub fn new(
        product_id: Uuid,
        branch_id: Uuid,
        name: impl Into<String>,
        quantity: i32,
        coming_price: Decimal,
        sale_price: Decimal,
    ) -> Result<Self, LedgerError> {
        if quantity <= 0 {
            return Err(LedgerError::NonPositiveQuantity(quantity));
        }
        if coming_price < Decimal::ZERO {
            return Err(LedgerError::NegativePrice {
                field: "coming_price",
            });
        }
        if sale_price < Decimal::ZERO {
            return Err(LedgerError::NegativePrice { field: "sale_price" });
        }
        if !fits_money_scale(&coming_price) {
            return Err(LedgerError::SubCentPrice {
                field: "coming_price",
            });
        }
        if !fits_money_scale(&sale_price) {
            return Err(LedgerError::SubCentPrice { field: "sale_price" });
        }

        Ok(Self {
            product_id,
            branch_id,
            name: name.into(),
            quantity,
            coming_price,
            sale_price,
        })
    }

    /// Cost of the received goods at the coming price
    pub fn total_cost(&self) -> Decimal {
        Decimal::from(self.quantity) * self.coming_price
    }
}
