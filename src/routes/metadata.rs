//! TMDB Proxy Routes
//!
//! These routes act as a caching proxy between the frontend and the TMDB API,
//! trimming upstream responses down to the fields the catalog UI consumes.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::services::tmdb::{Lookup, TitleKind};
use crate::AppState;

// ============================================================================
// Query Parameters
// ============================================================================

#[derive(Deserialize, Default)]
pub struct SearchParams {
    pub query: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub year: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct DetailsParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: Option<String>,
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_kind(s: &str) -> Result<TitleKind, (StatusCode, Json<serde_json::Value>)> {
    TitleKind::parse(s).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Type inválido. Use: movie ou tv" })),
        )
    })
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /api/tmdb - Search TMDB for a title, first result only
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let (query, kind) = match (params.query.as_deref(), params.kind.as_deref()) {
        (Some(q), Some(k)) if !q.trim().is_empty() => (q, k),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": "Query e Type são obrigatórios" })),
            ))
        }
    };
    let kind = parse_kind(kind)?;

    match state.tmdb.search(query, kind, params.year.as_deref()).await {
        Ok(Lookup::Found(hit)) => Ok(Json(hit)),
        Ok(Lookup::NotFound) => Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Não encontrado" })),
        )),
        Err(e) => {
            tracing::error!("TMDB search failed: {}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({ "error": "Erro no servidor TMDB" })),
            ))
        }
    }
}

/// GET /api/details - Full TMDB record for one title
pub async fn details(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DetailsParams>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let (kind, id) = match (params.kind.as_deref(), params.id.as_deref()) {
        (Some(k), Some(i)) => (k, i),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": "Type e ID são obrigatórios" })),
            ))
        }
    };
    let kind = parse_kind(kind)?;
    let id: i64 = id.parse().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "ID inválido" })),
        )
    })?;

    match state.tmdb.details(kind, id).await {
        Ok(Lookup::Found(details)) => Ok(Json(details)),
        Ok(Lookup::NotFound) => Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Não encontrado" })),
        )),
        Err(e) => {
            tracing::error!("TMDB details failed: {}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({ "error": "Erro no servidor TMDB" })),
            ))
        }
    }
}
