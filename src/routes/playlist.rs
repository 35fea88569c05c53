use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::models::CatalogStats;
use crate::AppState;

/// Request body for loading a playlist file
#[derive(Deserialize)]
pub struct LoadRequest {
    pub path: String,
}

/// Response for a completed load
#[derive(Serialize)]
pub struct LoadResponse {
    pub stats: CatalogStats,
}

/// POST /api/playlist/load - Parse a local M3U file and replace the catalog
///
/// The previous catalog stays visible to readers until the new one is fully
/// built and sorted; a failed load leaves it untouched.
pub async fn load_playlist(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoadRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    // Validate path
    if payload.path.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Caminho do arquivo é obrigatório" })),
        ));
    }

    let catalog = state
        .parser
        .parse_file(Path::new(&payload.path))
        .await
        .map_err(|e| {
            tracing::error!("Playlist load failed for {}: {}", payload.path, e);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
        })?;

    let stats = state.catalog.replace(catalog).await;
    tracing::info!(
        "Catalog replaced from {}: {} series, {} movies, {} episodes",
        payload.path,
        stats.series,
        stats.movies,
        stats.episodes
    );

    Ok(Json(LoadResponse { stats }))
}
