//! Goods receipt ("coming") models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One goods-receipt event at a branch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Coming {
    pub id: Uuid,
    /// `C-` prefixed document number, unique per table
    pub increment_id: String,
    pub branch_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or updating a goods receipt. The increment id is
/// always assigned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComingInput {
    pub branch_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComingList {
    pub count: i64,
    pub cominges: Vec<Coming>,
}
