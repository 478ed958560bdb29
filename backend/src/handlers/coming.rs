//! Goods receipt (coming) HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use axum_extra::extract::WithRejection;
use shared::{ComingInput, ListParams};

use crate::error::AppResult;
use crate::handlers::{list_request, parse_id, respond, with_deadline, JsonBody};
use crate::services::ComingService;
use crate::AppState;

/// Open a goods receipt with the next `C-` increment id
pub async fn create_coming(
    State(state): State<AppState>,
    WithRejection(Json(input), _): JsonBody<ComingInput>,
) -> AppResult<Response> {
    let service = ComingService::new(state.db.clone());
    let coming = with_deadline(&state, service.create(input)).await?;
    Ok(respond(StatusCode::CREATED, coming))
}

pub async fn get_coming(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;

    let service = ComingService::new(state.db.clone());
    let coming = with_deadline(&state, service.get(id)).await?;
    Ok(respond(StatusCode::OK, coming))
}

pub async fn list_cominges(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Response> {
    let req = list_request(&params)?;

    let service = ComingService::new(state.db.clone());
    let list = with_deadline(&state, service.list(&req)).await?;
    Ok(respond(StatusCode::OK, list))
}

pub async fn update_coming(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(input), _): JsonBody<ComingInput>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    let service = ComingService::new(state.db.clone());
    let coming = with_deadline(&state, service.update(id, input)).await?;
    Ok(respond(StatusCode::ACCEPTED, coming))
}

pub async fn delete_coming(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;

    let service = ComingService::new(state.db.clone());
    with_deadline(&state, service.delete(id)).await?;
    Ok(respond(StatusCode::OK, "deleted"))
}
