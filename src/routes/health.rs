use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::models::CatalogStats;
use crate::AppState;

/// Root endpoint - basic status
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "CineShelf Server",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "runtime": "rust"
    }))
}

/// Lookup cache stats
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupCacheStats {
    search_entries: usize,
    details_entries: usize,
}

/// Health check response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: String,
    uptime: u64,
    version: String,
    catalog: CatalogStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    catalog_loaded_at: Option<i64>,
    lookup_cache: LookupCacheStats,
}

/// GET /health - Uptime, catalog counters and lookup cache sizes
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let uptime = state.start_time.elapsed().as_secs();
    let snapshot = state.catalog.snapshot().await;
    let loaded_at = state.catalog.loaded_at().await;
    let (search_entries, details_entries) = state.tmdb.cache_sizes();

    Json(HealthResponse {
        status: "ok".to_string(),
        uptime,
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog: snapshot.stats(),
        catalog_loaded_at: loaded_at.map(|t| t.timestamp_millis()),
        lookup_cache: LookupCacheStats {
            search_entries,
            details_entries,
        },
    })
}
