//! Route definitions for the Market System
//!
//! Paths are kept flat (`/branch`, `/sale/:id`, ...) to stay compatible with
//! existing clients.

use axum::{
    routing::{get, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(branch_routes())
        .merge(client_routes())
        .merge(product_routes())
        .merge(coming_routes())
        .merge(picking_list_routes())
        .merge(remainder_routes())
        .merge(sale_routes())
        .merge(sale_product_routes())
        .merge(business_routes())
}

fn branch_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/branch",
            get(handlers::list_branches).post(handlers::create_branch),
        )
        .route(
            "/branch/:id",
            get(handlers::get_branch)
                .put(handlers::update_branch)
                .delete(handlers::delete_branch),
        )
}

fn client_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/client",
            get(handlers::list_clients).post(handlers::create_client),
        )
        .route(
            "/client/:id",
            get(handlers::get_client)
                .put(handlers::update_client)
                .delete(handlers::delete_client),
        )
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/product",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/product/:id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
}

/// Goods receipts
fn coming_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/coming",
            get(handlers::list_cominges).post(handlers::create_coming),
        )
        .route(
            "/coming/:id",
            get(handlers::get_coming)
                .put(handlers::update_coming)
                .delete(handlers::delete_coming),
        )
}

fn picking_list_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/picking_list",
            get(handlers::list_picking_lists).post(handlers::create_picking_list),
        )
        .route(
            "/picking_list/:id",
            get(handlers::get_picking_list)
                .put(handlers::update_picking_list)
                .delete(handlers::delete_picking_list),
        )
}

/// Stock ledger
fn remainder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/remainder",
            get(handlers::list_remainders).post(handlers::create_remainder),
        )
        .route(
            "/remainder/:id",
            get(handlers::get_remainder)
                .put(handlers::update_remainder)
                .delete(handlers::delete_remainder),
        )
}

fn sale_routes() -> Router<AppState> {
    Router::new()
        .route("/sale", get(handlers::list_sales).post(handlers::create_sale))
        .route(
            "/sale/:id",
            get(handlers::get_sale)
                .put(handlers::update_sale)
                .delete(handlers::delete_sale),
        )
}

/// Sale line items
fn sale_product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/saleproduct",
            get(handlers::list_sale_products).post(handlers::create_sale_product),
        )
        .route(
            "/saleproduct/:id",
            get(handlers::get_sale_product)
                .put(handlers::update_sale_product)
                .delete(handlers::delete_sale_product),
        )
}

/// Payment and reports
fn business_routes() -> Router<AppState> {
    Router::new()
        .route("/make_pay", put(handlers::make_pay))
        .route("/registration", get(handlers::registration))
        .route("/branch_doc", get(handlers::branch_doc))
}
