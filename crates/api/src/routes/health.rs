//! Liveness and readiness check, mounted at the root rather than under
//! `/api/v1`.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Number of categories currently held by the read cache.
    pub cached_categories: usize,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = catalog_db::health_check(&state.pool).await.is_ok();
    if !db_healthy {
        tracing::warn!("Health check could not reach the database");
    }

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        cached_categories: state.categories.cache().len().await,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
