//! Sale HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use axum_extra::extract::WithRejection;
use shared::{ListParams, SaleInput};

use crate::error::AppResult;
use crate::handlers::{list_request, parse_id, respond, with_deadline, JsonBody};
use crate::services::SaleService;
use crate::AppState;

/// Open an empty sale with the next `S-` increment id
pub async fn create_sale(
    State(state): State<AppState>,
    WithRejection(Json(input), _): JsonBody<SaleInput>,
) -> AppResult<Response> {
    let service = SaleService::new(state.db.clone());
    let sale = with_deadline(&state, service.create(input)).await?;
    Ok(respond(StatusCode::CREATED, sale))
}

pub async fn get_sale(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;

    let service = SaleService::new(state.db.clone());
    let sale = with_deadline(&state, service.get(id)).await?;
    Ok(respond(StatusCode::OK, sale))
}

pub async fn list_sales(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Response> {
    let req = list_request(&params)?;

    let service = SaleService::new(state.db.clone());
    let list = with_deadline(&state, service.list(&req)).await?;
    Ok(respond(StatusCode::OK, list))
}

pub async fn update_sale(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(input), _): JsonBody<SaleInput>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    let service = SaleService::new(state.db.clone());
    let sale = with_deadline(&state, service.update(id, input)).await?;
    Ok(respond(StatusCode::ACCEPTED, sale))
}

/// Void a sale, restocking every line item
pub async fn delete_sale(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;

    let service = SaleService::new(state.db.clone());
    with_deadline(&state, service.delete(id)).await?;
    Ok(respond(StatusCode::OK, "deleted"))
}
