//! HTTP request handlers for the exam compliance API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::PathRejection},
    routing::get,
};
use serde_json::{Value, json};
use tracing::{info, warn};
use uuid::Uuid;

use crate::compliance::{WorkerAlert, list_due_workers, worker_report};

use super::auth::AdminUser;
use super::response::ApiErrorResponse;
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/compliance/due", get(due_list_handler))
        .route(
            "/api/v1/workers/:worker_id/compliance",
            get(worker_compliance_handler),
        )
        .with_state(state)
}

/// Handler for GET /health.
async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Handler for GET /api/v1/compliance/due.
///
/// Returns every active worker with a cycle that is overdue, due now, or
/// upcoming within 30 days. An empty array means nothing needs attention.
async fn due_list_handler(
    State(state): State<AppState>,
    AdminUser(username): AdminUser,
) -> Result<Json<Vec<WorkerAlert>>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let today = state.today();
    info!(correlation_id = %correlation_id, %username, %today, "Processing due list request");

    let start_time = Instant::now();
    let snapshots = state.store().active_worker_snapshots().map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Failed to load workers");
        ApiErrorResponse::from(err)
    })?;

    let alerts = list_due_workers(&snapshots, today);
    info!(
        correlation_id = %correlation_id,
        active_workers = snapshots.len(),
        flagged_workers = alerts.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Due list completed"
    );

    Ok(Json(alerts))
}

/// Handler for GET /api/v1/workers/{worker_id}/compliance.
///
/// Returns the status of every scheduled cycle for one worker, whether or
/// not any of them needs attention.
async fn worker_compliance_handler(
    State(state): State<AppState>,
    AdminUser(username): AdminUser,
    worker_id: Result<Path<u64>, PathRejection>,
) -> Result<Json<WorkerAlert>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();

    let worker_id = match worker_id {
        Ok(Path(worker_id)) => worker_id,
        Err(rejection) => {
            let body_text = rejection.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "Invalid worker id");
            return Err(ApiErrorResponse::invalid_worker_id(body_text));
        }
    };

    let today = state.today();
    info!(
        correlation_id = %correlation_id,
        %username,
        worker_id,
        %today,
        "Processing worker compliance request"
    );

    let snapshot = state.store().worker_snapshot(worker_id).map_err(|err| {
        warn!(correlation_id = %correlation_id, worker_id, error = %err, "Worker lookup failed");
        ApiErrorResponse::from(err)
    })?;

    Ok(Json(worker_report(&snapshot, today)))
}
