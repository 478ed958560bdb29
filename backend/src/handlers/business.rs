//! Cross-entity handlers: payments and reports

use std::str::FromStr;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use rust_decimal::Decimal;
use shared::{BranchDocParams, MakePayParams, RegistrationParams, RegistrationWindow};

use crate::error::{AppError, AppResult};
use crate::handlers::{parse_id, respond, with_deadline};
use crate::services::{ReportingService, SaleService};
use crate::AppState;

/// `PUT /make_pay?sale_id=S-0000001&money=600`
///
/// `sale_id` is the human increment id of the sale, not its UUID.
pub async fn make_pay(
    State(state): State<AppState>,
    Query(params): Query<MakePayParams>,
) -> AppResult<Response> {
    let increment_id = params
        .sale_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("query sale_id is required".to_string()))?;

    let money = params
        .money
        .as_deref()
        .map(str::trim)
        .and_then(|m| Decimal::from_str(m).ok())
        .ok_or_else(|| AppError::Validation("invalid query money".to_string()))?;

    let service = SaleService::new(state.db.clone());
    with_deadline(
        &state,
        service.make_pay(increment_id, money, state.payment_policy.as_ref()),
    )
    .await?;

    Ok(respond(StatusCode::ACCEPTED, "successful payment"))
}

/// `GET /registration?from=YYYY-MM-DD&to=YYYY-MM-DD`, both bounds exclusive
pub async fn registration(
    State(state): State<AppState>,
    Query(params): Query<RegistrationParams>,
) -> AppResult<Response> {
    let window = RegistrationWindow::parse(
        params.from.as_deref().unwrap_or_default(),
        params.to.as_deref().unwrap_or_default(),
    )
    .map_err(|msg| AppError::Validation(msg.to_string()))?;

    let service = ReportingService::new(state.db.clone());
    let clients = with_deadline(&state, service.registration(window)).await?;
    Ok(respond(StatusCode::OK, clients))
}

pub async fn branch_doc(
    State(state): State<AppState>,
    Query(params): Query<BranchDocParams>,
) -> AppResult<Response> {
    let branch_id = parse_id(params.branch_id.as_deref().unwrap_or_default())?;

    let service = ReportingService::new(state.db.clone());
    let doc = with_deadline(&state, service.branch_doc(branch_id)).await?;
    Ok(respond(StatusCode::OK, doc))
}
