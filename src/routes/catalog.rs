//! Catalog Browse Routes
//!
//! Read-only views over the in-memory catalog snapshot: paginated listings
//! with accent-insensitive search, per-series season breakdowns, and
//! TMDB-enriched detail payloads.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::SeasonView;
use crate::services::tmdb::{EnrichedTitle, TitleKind};
use crate::AppState;

// ============================================================================
// Query Parameters
// ============================================================================

#[derive(Deserialize, Default)]
pub struct CatalogQuery {
    pub search: Option<String>,
    #[serde(default = "default_page")]
    pub page: usize,
    pub per_page: Option<usize>,
}

fn default_page() -> usize {
    1
}

// ============================================================================
// Response Types
// ============================================================================

/// One series with its seasons expanded
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDetailResponse {
    pub original_title: String,
    pub clean_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    pub cover: String,
    pub seasons: Vec<SeasonView>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /api/catalog/series - Paginated series summaries
pub async fn list_series(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CatalogQuery>,
) -> impl IntoResponse {
    let snapshot = state.catalog.snapshot().await;
    let per_page = query
        .per_page
        .unwrap_or(state.config.page_size)
        .min(state.config.max_page_size);

    Json(snapshot.series_page(query.search.as_deref(), query.page, per_page))
}

/// GET /api/catalog/series/:title - One series with seasons in numeric order
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let snapshot = state.catalog.snapshot().await;
    let series = snapshot.series_by_title(&title).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Série não encontrada" })),
        )
    })?;

    Ok(Json(SeriesDetailResponse {
        original_title: series.original_title.clone(),
        clean_title: series.clean_title.clone(),
        year: series.year.clone(),
        cover: series.cover.clone(),
        seasons: series.season_views(),
    }))
}

/// GET /api/catalog/movies - Paginated movie entries
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CatalogQuery>,
) -> impl IntoResponse {
    let snapshot = state.catalog.snapshot().await;
    let per_page = query
        .per_page
        .unwrap_or(state.config.page_size)
        .min(state.config.max_page_size);

    Json(snapshot.movies_page(query.search.as_deref(), query.page, per_page))
}

/// GET /api/catalog/stats - Catalog counters
pub async fn get_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.catalog.snapshot().await;
    Json(snapshot.stats())
}

/// GET /api/catalog/series/:title/details - Series entry enriched with TMDB metadata
///
/// Always 200: when the lookup fails the payload carries the entry's own
/// fields with a placeholder overview.
pub async fn get_series_details(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let snapshot = state.catalog.snapshot().await;
    let series = snapshot.series_by_title(&title).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Série não encontrada" })),
        )
    })?;

    let details = state
        .tmdb
        .enrich(
            TitleKind::Tv,
            &series.original_title,
            &series.clean_title,
            series.year.as_deref(),
            &series.cover,
        )
        .await;

    Ok(Json(EnrichedTitle {
        original_title: series.original_title.clone(),
        clean_title: series.clean_title.clone(),
        year: series.year.clone(),
        cover: series.cover.clone(),
        details,
    }))
}

/// GET /api/catalog/movies/:title/details - Movie entry enriched with TMDB metadata
pub async fn get_movie_details(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let snapshot = state.catalog.snapshot().await;
    let movie = snapshot.movie_by_title(&title).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Filme não encontrado" })),
        )
    })?;

    let details = state
        .tmdb
        .enrich(
            TitleKind::Movie,
            &movie.original_title,
            &movie.clean_title,
            movie.year.as_deref(),
            &movie.cover,
        )
        .await;

    Ok(Json(EnrichedTitle {
        original_title: movie.original_title.clone(),
        clean_title: movie.clean_title.clone(),
        year: movie.year.clone(),
        cover: movie.cover.clone(),
        details,
    }))
}
