//! HTTP request handlers for the Market System
//!
//! Handlers only parse the request, call the matching service under the
//! request deadline and wrap the result in the response envelope.

pub mod branch;
pub mod business;
pub mod client;
pub mod coming;
pub mod health;
pub mod picking_list;
pub mod product;
pub mod remainder;
pub mod sale;
pub mod sale_product;

pub use branch::*;
pub use business::*;
pub use client::*;
pub use coming::*;
pub use health::*;
pub use picking_list::*;
pub use product::*;
pub use remainder::*;
pub use sale::*;
pub use sale_product::*;

use std::future::Future;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use shared::{ListParams, ListRequest};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::AppState;

/// JSON request body whose rejections are rendered as envelope errors
pub type JsonBody<T> = WithRejection<Json<T>, AppError>;

/// Response envelope shared by every endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub description: String,
    pub data: T,
}

/// Wrap `data` in the envelope with the given status code
pub fn respond<T: Serialize>(status: StatusCode, data: T) -> Response {
    let description = if status.as_u16() < 400 {
        "success"
    } else {
        "error"
    };

    (
        status,
        Json(ApiResponse {
            status: status.as_u16(),
            description: description.to_string(),
            data,
        }),
    )
        .into_response()
}

/// Parse a path id, rejecting anything that is not a UUID
pub fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::Validation("id is not uuid".to_string()))
}

/// Parse `limit`/`offset`/`search` list parameters
pub fn list_request(params: &ListParams) -> AppResult<ListRequest> {
    ListRequest::parse(params).map_err(|msg| AppError::Validation(msg.to_string()))
}

/// Run a store operation under the configured request deadline.
///
/// On expiry the operation future is dropped, which rolls back any open
/// transaction it holds.
pub async fn with_deadline<T, F>(state: &AppState, operation: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(state.config.request.timeout(), operation).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                timeout_secs = state.config.request.timeout_secs,
                "Store operation timed out"
            );
            Err(AppError::Timeout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);

        let err = parse_id("42").unwrap_err();
        assert_eq!(err.to_string(), "id is not uuid");
    }

    #[test]
    fn test_list_request_rejects_bad_limit() {
        let params = ListParams {
            limit: Some("abc".into()),
            ..Default::default()
        };
        let err = list_request(&params).unwrap_err();
        assert_eq!(err.to_string(), "invalid query limit");
    }
}
