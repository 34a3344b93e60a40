// Read-only HTTP handlers and the shared error payload.

use crate::interface_adapters::protocol::{TickMetricsDto, VehicleStateDto, WorldSnapshotDto};
use crate::interface_adapters::state::AppState;

use axum::{
    extract::{Json, Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    // Human-readable error string for consistent JSON error responses.
    pub error: String,
}

#[derive(Debug, serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    vehicles: usize,
    projectiles: usize,
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        vehicles: state.world.vehicles.len(),
        projectiles: state.world.projectiles.len(),
    })
}

pub async fn world_snapshot_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(WorldSnapshotDto::from(&state.world.snapshot()))
}

/// Last broadcast world diff, verbatim. 204 until the first non-empty tick.
pub async fn latest_diff_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let latest = state.latest_diff_tx.borrow().clone();
    if latest.is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }
    (
        [(header::CONTENT_TYPE, "application/json")],
        latest.to_string(),
    )
        .into_response()
}

pub async fn vehicle_handler(
    State(state): State<Arc<AppState>>,
    Path(vehicle_id): Path<String>,
) -> impl IntoResponse {
    match state.world.vehicles.get(&vehicle_id) {
        Some(vehicle) => Json(VehicleStateDto::from(&vehicle)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "vehicle not found".to_string(),
            }),
        )
            .into_response(),
    }
}

pub async fn tick_metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(TickMetricsDto::from(state.tick_monitor.snapshot()))
}
