//! Sale line item HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use axum_extra::extract::WithRejection;
use shared::{CreateSaleProduct, ListParams, UpdateSaleProduct};
use validator::Validate;

use crate::error::AppResult;
use crate::handlers::{list_request, parse_id, respond, with_deadline, JsonBody};
use crate::services::SaleProductService;
use crate::AppState;

/// Sell a product on a sale, deducting branch stock.
///
/// Answers 409 when the branch ledger holds less than the requested quantity.
pub async fn create_sale_product(
    State(state): State<AppState>,
    WithRejection(Json(input), _): JsonBody<CreateSaleProduct>,
) -> AppResult<Response> {
    input.validate()?;

    let service = SaleProductService::new(state.db.clone());
    let sale_product = with_deadline(&state, service.create(input)).await?;
    Ok(respond(StatusCode::CREATED, sale_product))
}

pub async fn get_sale_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;

    let service = SaleProductService::new(state.db.clone());
    let sale_product = with_deadline(&state, service.get(id)).await?;
    Ok(respond(StatusCode::OK, sale_product))
}

pub async fn list_sale_products(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Response> {
    let req = list_request(&params)?;

    let service = SaleProductService::new(state.db.clone());
    let list = with_deadline(&state, service.list(&req)).await?;
    Ok(respond(StatusCode::OK, list))
}

pub async fn update_sale_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(input), _): JsonBody<UpdateSaleProduct>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    input.validate()?;

    let service = SaleProductService::new(state.db.clone());
    let sale_product = with_deadline(&state, service.update(id, input)).await?;
    Ok(respond(StatusCode::ACCEPTED, sale_product))
}

/// Remove a line item and return its quantity to the ledger
pub async fn delete_sale_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;

    let service = SaleProductService::new(state.db.clone());
    with_deadline(&state, service.delete(id)).await?;
    Ok(respond(StatusCode::OK, "deleted"))
}
