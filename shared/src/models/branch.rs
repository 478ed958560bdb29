//! Branch models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::validate_phone;

/// A store branch. Products, clients, sales and goods receipts belong to one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Branch {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or updating a branch
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BranchInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    #[validate(custom = "validate_phone")]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchList {
    pub count: i64,
    pub branches: Vec<Branch>,
}
