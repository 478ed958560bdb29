//! Product HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use axum_extra::extract::WithRejection;
use shared::{ListParams, ProductInput};
use validator::Validate;

use crate::error::AppResult;
use crate::handlers::{list_request, parse_id, respond, with_deadline, JsonBody};
use crate::services::ProductService;
use crate::AppState;

pub async fn create_product(
    State(state): State<AppState>,
    WithRejection(Json(input), _): JsonBody<ProductInput>,
) -> AppResult<Response> {
    input.validate()?;

    let service = ProductService::new(state.db.clone());
    let product = with_deadline(&state, service.create(input)).await?;
    Ok(respond(StatusCode::CREATED, product))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;

    let service = ProductService::new(state.db.clone());
    let product = with_deadline(&state, service.get(id)).await?;
    Ok(respond(StatusCode::OK, product))
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Response> {
    let req = list_request(&params)?;

    let service = ProductService::new(state.db.clone());
    let list = with_deadline(&state, service.list(&req)).await?;
    Ok(respond(StatusCode::OK, list))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(input), _): JsonBody<ProductInput>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    input.validate()?;

    let service = ProductService::new(state.db.clone());
    let product = with_deadline(&state, service.update(id, input)).await?;
    Ok(respond(StatusCode::ACCEPTED, product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;

    let service = ProductService::new(state.db.clone());
    with_deadline(&state, service.delete(id)).await?;
    Ok(respond(StatusCode::OK, "deleted"))
}
