//! Stock ledger ("remainder") models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::validate_money;

/// Current stock of one product at one branch.
///
/// There is at most one row per (product_id, branch_id).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Remainder {
    pub id: Uuid,
    pub product_id: Uuid,
    pub branch_id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub coming_price: Decimal,
    pub sale_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for manually creating or correcting a ledger row
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RemainderInput {
    pub product_id: Uuid,
    pub branch_id: Uuid,
    #[serde(default)]
    pub name: String,
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[validate(custom = "validate_money")]
    pub coming_price: Decimal,
    #[validate(custom = "validate_money")]
    pub sale_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemainderList {
    pub count: i64,
    pub remainders: Vec<Remainder>,
}
