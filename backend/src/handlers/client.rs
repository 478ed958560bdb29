//! Client HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use axum_extra::extract::WithRejection;
use shared::{ClientInput, ListParams};
use validator::Validate;

use crate::error::AppResult;
use crate::handlers::{list_request, parse_id, respond, with_deadline, JsonBody};
use crate::services::ClientService;
use crate::AppState;

pub async fn create_client(
    State(state): State<AppState>,
    WithRejection(Json(input), _): JsonBody<ClientInput>,
) -> AppResult<Response> {
    input.validate()?;

    let service = ClientService::new(state.db.clone());
    let client = with_deadline(&state, service.create(input)).await?;
    Ok(respond(StatusCode::CREATED, client))
}

pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;

    let service = ClientService::new(state.db.clone());
    let client = with_deadline(&state, service.get(id)).await?;
    Ok(respond(StatusCode::OK, client))
}

pub async fn list_clients(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Response> {
    let req = list_request(&params)?;

    let service = ClientService::new(state.db.clone());
    let list = with_deadline(&state, service.list(&req)).await?;
    Ok(respond(StatusCode::OK, list))
}

pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(input), _): JsonBody<ClientInput>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    input.validate()?;

    let service = ClientService::new(state.db.clone());
    let client = with_deadline(&state, service.update(id, input)).await?;
    Ok(respond(StatusCode::ACCEPTED, client))
}

pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;

    let service = ClientService::new(state.db.clone());
    with_deadline(&state, service.delete(id)).await?;
    Ok(respond(StatusCode::OK, "deleted"))
}
