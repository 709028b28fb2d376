use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health_check))
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
        .route("/metrics", get(metrics))
}

pub async fn health_check(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "uptimeSecs": state.uptime_secs(),
        "simulation": {
            "availableSlots": state.simulations().available_slots(),
            "maxConcurrent": state.config().simulation.max_concurrent,
        }
    }))
}

pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Not ready once shutdown has closed the simulation slots.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.simulations().is_closed() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}

pub async fn metrics(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    Json(serde_json::json!({
        "simulations": state.simulations().metrics().snapshot(),
    }))
}
