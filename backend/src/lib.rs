//! Market System - Backend
//!
//! HTTP backend for a small retail chain: branches, clients, products,
//! goods receipts, stock ledger, sales and their line items.

use std::sync::Arc;

use axum::Router;
use shared::{HalfOfTotalRule, PaymentPolicy};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
    /// Rule deciding whether a sale payment is accepted
    pub payment_policy: Arc<dyn PaymentPolicy>,
}

impl AppState {
    pub fn new(db: sqlx::PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
            payment_policy: Arc::new(HalfOfTotalRule),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes::api_routes()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
