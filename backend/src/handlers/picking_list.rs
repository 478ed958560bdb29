//! Picking list HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use axum_extra::extract::WithRejection;
use shared::{CreatePickingList, ListParams, UpdatePickingList};
use validator::Validate;

use crate::error::AppResult;
use crate::handlers::{list_request, parse_id, respond, with_deadline, JsonBody};
use crate::services::PickingListService;
use crate::AppState;

/// Record received goods and restock the receipt's branch
pub async fn create_picking_list(
    State(state): State<AppState>,
    WithRejection(Json(input), _): JsonBody<CreatePickingList>,
) -> AppResult<Response> {
    input.validate()?;

    let service = PickingListService::new(state.db.clone());
    let picking_list = with_deadline(&state, service.create(input)).await?;
    Ok(respond(StatusCode::CREATED, picking_list))
}

pub async fn get_picking_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;

    let service = PickingListService::new(state.db.clone());
    let picking_list = with_deadline(&state, service.get(id)).await?;
    Ok(respond(StatusCode::OK, picking_list))
}

pub async fn list_picking_lists(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Response> {
    let req = list_request(&params)?;

    let service = PickingListService::new(state.db.clone());
    let list = with_deadline(&state, service.list(&req)).await?;
    Ok(respond(StatusCode::OK, list))
}

pub async fn update_picking_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(input), _): JsonBody<UpdatePickingList>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    input.validate()?;

    let service = PickingListService::new(state.db.clone());
    let picking_list = with_deadline(&state, service.update(id, input)).await?;
    Ok(respond(StatusCode::ACCEPTED, picking_list))
}

pub async fn delete_picking_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;

    let service = PickingListService::new(state.db.clone());
    with_deadline(&state, service.delete(id)).await?;
    Ok(respond(StatusCode::OK, "deleted"))
}
