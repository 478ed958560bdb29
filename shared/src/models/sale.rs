//! Sale models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sale document.
///
/// `total_price` always equals the sum of the sale's line items and
/// `debt = total_price - paid` as of the last accepted payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: Uuid,
    pub branch_id: Uuid,
    pub client_id: Uuid,
    /// `S-` prefixed document number, unique per table
    pub increment_id: String,
    pub total_price: Decimal,
    pub paid: Decimal,
    pub debt: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for opening or re-assigning a sale. Totals are maintained by the
/// line items and payments, never written directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleInput {
    pub branch_id: Uuid,
    pub client_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleList {
    pub count: i64,
    pub sales: Vec<Sale>,
}

/// Query of `PUT /make_pay`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MakePayParams {
    /// Increment id of the sale (`S-0000001`)
    pub sale_id: Option<String>,
    pub money: Option<String>,
}
