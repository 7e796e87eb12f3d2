use axum::{Router, middleware as axum_middleware, routing::get};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::db::services::PgSeriesStore;
use crate::monitor::query::QueryEngine;
use crate::server::config::ServerConfig;

pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;

pub use error::AppError;

pub struct AppState {
    pub db_pool: DatabaseConnection,
    pub query_engine: QueryEngine<PgSeriesStore>,
    pub config: Arc<ServerConfig>,
}

async fn health_check_handler() -> &'static str {
    "OK"
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let target_routes = routes::create_target_router().route_layer(
        axum_middleware::from_fn_with_state(app_state.clone(), middleware::auth::auth),
    );

    Router::new()
        .route("/api/health", get(health_check_handler))
        .nest("/api/targets", target_routes)
        .with_state(app_state)
}
