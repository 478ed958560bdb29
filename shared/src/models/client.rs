//! Client models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::validate_phone;

/// Default value of [`Client::active`]
pub const CLIENT_ACTIVE: &str = "active";

/// A registered customer of a branch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Client {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub father_name: String,
    pub phone: String,
    pub birthday: NaiveDate,
    pub gender: String,
    pub branch_id: Uuid,
    pub active: String,
    /// Registration time, drives the registration report
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or updating a client
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClientInput {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub father_name: String,
    #[serde(default)]
    #[validate(custom = "validate_phone")]
    pub phone: String,
    /// `YYYY-MM-DD`
    pub birthday: NaiveDate,
    #[serde(default)]
    pub gender: String,
    pub branch_id: Uuid,
    pub active: Option<String>,
}

impl ClientInput {
    pub fn active_or_default(&self) -> &str {
        self.active
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or(CLIENT_ACTIVE)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientList {
    pub count: i64,
    pub clients: Vec<Client>,
}
