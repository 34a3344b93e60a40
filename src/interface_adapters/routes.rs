use crate::interface_adapters::http::{
    health_handler, latest_diff_handler, tick_metrics_handler, vehicle_handler,
    world_snapshot_handler,
};
use crate::interface_adapters::state::AppState;
use axum::{Router, routing::get};
use std::sync::Arc;

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/world/snapshot", get(world_snapshot_handler))
        .route("/world/latest", get(latest_diff_handler))
        .route("/vehicles/{vehicle_id}", get(vehicle_handler))
        .route("/metrics/ticks", get(tick_metrics_handler))
        .with_state(state)
}
