//! Sale line item models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One product line of a sale.
///
/// `price` is the product price at the time the line was recorded; later
/// product price changes do not touch it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleProduct {
    pub id: Uuid,
    pub product_id: Uuid,
    pub sale_id: Uuid,
    pub sale_increment_id: String,
    pub quantity: i32,
    pub price: Decimal,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for adding a product line to a sale
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSaleProduct {
    pub product_id: Uuid,
    pub sale_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

/// Input for changing the quantity of a product line
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSaleProduct {
    #[validate(range(min = 1))]
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleProductList {
    pub count: i64,
    pub sale_products: Vec<SaleProduct>,
}
