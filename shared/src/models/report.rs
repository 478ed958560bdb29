//! Report models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sales summary of one branch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BranchDoc {
    pub branch_id: Uuid,
    pub branch_name: String,
    /// Sum of `total_price` over all sales of the branch
    pub total_sale_price: Decimal,
    /// Sum of line-item quantities over all sales of the branch
    pub total_sale_quantity: i64,
}

/// Query of `GET /branch_doc`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BranchDocParams {
    pub branch_id: Option<String>,
}

/// Query of `GET /registration`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationParams {
    pub from: Option<String>,
    pub to: Option<String>,
}
