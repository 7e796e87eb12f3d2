use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use std::sync::Arc;

use crate::db::entities::target;
use crate::db::services::target_service;
use crate::monitor::query::{IncidentSeries, LatencySeries, SeriesQuery};
use crate::web::models::{AuthenticatedUser, CreateTarget, SeriesParams};
use crate::web::{AppError, AppState};

pub fn create_target_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_targets).post(create_target))
        .route("/{id}", get(get_target).delete(delete_target))
        .route("/{id}/latencies", get(get_target_latencies))
        .route("/{id}/incidents", get(get_target_incidents))
}

#[axum::debug_handler]
async fn list_targets(
    State(app_state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<target::Model>>, AppError> {
    let targets = target_service::get_targets_by_user_id(&app_state.db_pool, user.id).await?;
    Ok(Json(targets))
}

#[axum::debug_handler]
async fn create_target(
    State(app_state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(payload): Json<CreateTarget>,
) -> Result<(StatusCode, Json<target::Model>), AppError> {
    if payload.url.is_empty() {
        return Err(AppError::InvalidInput("url must not be empty".to_string()));
    }
    if payload.interval_seconds.is_some_and(|interval| interval <= 0) {
        return Err(AppError::InvalidInput(
            "interval_seconds must be positive".to_string(),
        ));
    }

    let created = target_service::create_target(&app_state.db_pool, user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[axum::debug_handler]
async fn get_target(
    State(app_state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<target::Model>, AppError> {
    let target = target_service::get_user_target(&app_state.db_pool, user.id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Target not found".to_string()))?;
    Ok(Json(target))
}

#[axum::debug_handler]
async fn delete_target(
    State(app_state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let delete_result = target_service::delete_target(&app_state.db_pool, user.id, id).await?;
    if delete_result.rows_affected == 0 {
        return Err(AppError::NotFound("Target not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
async fn get_target_latencies(
    State(app_state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    Query(params): Query<SeriesParams>,
) -> Result<Json<LatencySeries>, AppError> {
    target_service::get_user_target(&app_state.db_pool, user.id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Target not found".to_string()))?;

    let series = app_state
        .query_engine
        .query_latencies(
            user.id,
            id,
            SeriesQuery {
                since: params.since,
                step: params.step,
            },
        )
        .await?;
    Ok(Json(series))
}

#[axum::debug_handler]
async fn get_target_incidents(
    State(app_state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    Query(params): Query<SeriesParams>,
) -> Result<Json<IncidentSeries>, AppError> {
    target_service::get_user_target(&app_state.db_pool, user.id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Target not found".to_string()))?;

    let series = app_state
        .query_engine
        .query_incidents(user.id, id, params.since)
        .await?;
    Ok(Json(series))
}
