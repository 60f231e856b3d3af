//! Health check handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use petrodesk_core::traits::cache::CacheProvider;

use crate::dto::response::{ApiResponse, DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// GET /api/health/detailed
///
/// Probes database, cache, and storage. Returns 503 when any component
/// is unreachable so load balancers can pull the instance.
pub async fn health_detailed(State(state): State<AppState>) -> impl IntoResponse {
    let database = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
        .is_ok();
    let cache = state.cache.health_check().await.unwrap_or(false);
    let storage = state.storage.health_check().await.unwrap_or(false);

    let all_up = database && cache && storage;
    let label = |up: bool| {
        if up { "connected" } else { "unavailable" }.to_string()
    };

    let body = ApiResponse::ok(DetailedHealthResponse {
        status: if all_up { "ok" } else { "degraded" }.to_string(),
        database: label(database),
        cache: label(cache),
        storage: label(storage),
    });

    let code = if all_up {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(body))
}
