/// GET /api/health
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Reports `degraded` when the data directory has gone missing
pub async fn health(State(app_state): State<AppState>) -> Json<HealthResponse> {
    let status = if app_state.store.dir().is_dir() {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
    })
}
