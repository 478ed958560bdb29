//! Picking list models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::validate_money;

/// A received product line of a goods receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PickingList {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    /// Unit purchase price
    pub price: Decimal,
    pub total_price: Decimal,
    pub coming_id: Uuid,
    pub coming_increment_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for recording a received product line
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePickingList {
    pub product_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[validate(custom = "validate_money")]
    pub price: Decimal,
    #[validate(length(min = 3))]
    pub coming_increment_id: String,
}

/// Input for correcting a recorded product line
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePickingList {
    pub product_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[validate(custom = "validate_money")]
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickingListList {
    pub count: i64,
    pub picking_list: Vec<PickingList>,
}
