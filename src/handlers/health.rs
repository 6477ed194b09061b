// src/handlers/health.rs

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::config::AppState;

// GET /api/health
pub async fn health(State(app_state): State<AppState>) -> impl IntoResponse {
    let stats = app_state.cache.stats();
    Json(json!({
        "status": "OK",
        "cache": {
            "hits": stats.hits,
            "misses": stats.misses,
            "backendErrors": stats.backend_errors,
            "hitRate": stats.hit_rate(),
        }
    }))
}
