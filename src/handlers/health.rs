use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "moodlens",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn readyz(State(state): State<AppState>) -> AppResult<Json<Value>> {
    if !crate::db::ping(&state.db).await {
        tracing::warn!("Readiness check failed: database unreachable");
        return Err(AppError::NotReady("database".into()));
    }

    Ok(Json(json!({
        "status": "ready",
        "checks": { "database": "ok" },
    })))
}
