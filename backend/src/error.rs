//! Error handling for the Market System
//!
//! Every failure is rendered into the same `{status, description, data}`
//! envelope as successful responses. Internal failures keep their detail
//! in the server log and return a generic message to the caller.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use shared::{IncrementError, LedgerError, PaymentError};
use thiserror::Error;

use crate::handlers::respond;

/// Postgres SQLSTATE codes mapped to caller errors
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

/// Unique key holding one ledger row per product and branch
pub const REMAINDER_UNIQUE_KEY: &str = "remainder_product_branch_key";

const REDACTED: &str = "Internal Server Error";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}: no rows in result set")]
    NotFound(&'static str),

    #[error("no rows affected")]
    NoRowsAffected,

    #[error("not enough quantity: requested {requested}, available {available}")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("payment {amount} must be greater than half of total price {total}")]
    InsufficientPayment { amount: Decimal, total: Decimal },

    #[error("request deadline exceeded")]
    Timeout,

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::NotFound(_)
            | AppError::NoRowsAffected
            | AppError::InsufficientPayment { .. } => StatusCode::BAD_REQUEST,
            AppError::InsufficientStock { .. } => StatusCode::CONFLICT,
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let data = if status.is_server_error() && status != StatusCode::GATEWAY_TIMEOUT {
            tracing::error!("Error: {:?}", self);
            REDACTED.to_string()
        } else {
            tracing::warn!(status = status.as_u16(), "Request failed: {}", self);
            self.to_string()
        };

        respond(status, data)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if matches!(err, sqlx::Error::RowNotFound) {
            return AppError::NotFound("record");
        }

        if let Some(db_err) = err.as_database_error() {
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) if db_err.constraint() == Some(REMAINDER_UNIQUE_KEY) => {
                    return AppError::Validation("ledger row already exists".to_string());
                }
                Some(UNIQUE_VIOLATION) => {
                    return AppError::Validation(format!(
                        "duplicate value violates {}",
                        db_err.constraint().unwrap_or("unique constraint")
                    ));
                }
                Some(FOREIGN_KEY_VIOLATION) => {
                    return AppError::Validation(format!(
                        "referenced record is missing or still in use ({})",
                        db_err.constraint().unwrap_or("foreign key")
                    ));
                }
                Some(CHECK_VIOLATION) => {
                    return AppError::Validation(format!(
                        "value violates {}",
                        db_err.constraint().unwrap_or("check constraint")
                    ));
                }
                Some(NUMERIC_VALUE_OUT_OF_RANGE) => {
                    return AppError::Validation("numeric value out of range".to_string());
                }
                _ => {}
            }
        }

        AppError::Database(err)
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientStock {
                available,
                requested,
            } => AppError::InsufficientStock {
                available,
                requested,
            },
            other => AppError::Validation(other.to_string()),
        }
    }
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::InsufficientPayment { amount, total } => {
                AppError::InsufficientPayment { amount, total }
            }
        }
    }
}

impl From<IncrementError> for AppError {
    fn from(err: IncrementError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
