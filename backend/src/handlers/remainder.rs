//! Stock ledger (remainder) HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use axum_extra::extract::WithRejection;
use shared::{ListParams, RemainderInput};
use validator::Validate;

use crate::error::AppResult;
use crate::handlers::{list_request, parse_id, respond, with_deadline, JsonBody};
use crate::services::RemainderService;
use crate::AppState;

pub async fn create_remainder(
    State(state): State<AppState>,
    WithRejection(Json(input), _): JsonBody<RemainderInput>,
) -> AppResult<Response> {
    input.validate()?;

    let service = RemainderService::new(state.db.clone());
    let remainder = with_deadline(&state, service.create(input)).await?;
    Ok(respond(StatusCode::CREATED, remainder))
}

pub async fn get_remainder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;

    let service = RemainderService::new(state.db.clone());
    let remainder = with_deadline(&state, service.get(id)).await?;
    Ok(respond(StatusCode::OK, remainder))
}

pub async fn list_remainders(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Response> {
    let req = list_request(&params)?;

    let service = RemainderService::new(state.db.clone());
    let list = with_deadline(&state, service.list(&req)).await?;
    Ok(respond(StatusCode::OK, list))
}

/// Manual stock correction
pub async fn update_remainder(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(input), _): JsonBody<RemainderInput>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    input.validate()?;

    let service = RemainderService::new(state.db.clone());
    let remainder = with_deadline(&state, service.update(id, input)).await?;
    Ok(respond(StatusCode::ACCEPTED, remainder))
}

pub async fn delete_remainder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;

    let service = RemainderService::new(state.db.clone());
    with_deadline(&state, service.delete(id)).await?;
    Ok(respond(StatusCode::OK, "deleted"))
}
