mod config;
mod models;
mod routes;
mod services;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::{
    catalog_store::CatalogStore,
    m3u_parser::M3UParser,
    tmdb::{CachePolicy, TmdbClient},
};

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub catalog: CatalogStore,
    pub parser: M3UParser,
    pub tmdb: TmdbClient,
    pub start_time: Instant,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cineshelf_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let config = Config::from_env();
    let port = config.port;

    tracing::info!("Starting CineShelf Server v{}", env!("CARGO_PKG_VERSION"));
    if config.tmdb_api_key.is_empty() {
        tracing::warn!("TMDB_API_KEY is not set; metadata lookups will fail");
    }

    // Initialize services
    let catalog = CatalogStore::new();

    let parser = M3UParser::new(config.parse_yield_every);
    tracing::info!(
        "M3U parser initialized (yield every {} records)",
        config.parse_yield_every
    );

    let cache_policy = CachePolicy {
        max_entries: config.lookup_cache_max_entries,
        ttl: config.lookup_cache_ttl_ms.map(Duration::from_millis),
        cache_negative: config.lookup_cache_negative,
    };
    let tmdb = TmdbClient::new(
        &config.tmdb_api_key,
        &config.tmdb_base_url,
        &config.tmdb_image_base_url,
        &config.tmdb_language,
        config.fetch_timeout_ms,
        cache_policy,
    );
    tracing::info!("TMDB client initialized: {}", config.tmdb_base_url);

    let static_dir = config.static_dir.clone();

    // Build application state
    let state = Arc::new(AppState {
        config,
        catalog,
        parser,
        tmdb,
        start_time: Instant::now(),
    });

    // Build router
    let app = Router::new()
        // Health endpoints
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health_check))
        // Playlist ingestion
        .route("/api/playlist/load", post(routes::playlist::load_playlist))
        // Catalog browsing
        .route("/api/catalog/series", get(routes::catalog::list_series))
        .route(
            "/api/catalog/series/:title",
            get(routes::catalog::get_series),
        )
        .route(
            "/api/catalog/series/:title/details",
            get(routes::catalog::get_series_details),
        )
        .route("/api/catalog/movies", get(routes::catalog::list_movies))
        .route(
            "/api/catalog/movies/:title/details",
            get(routes::catalog::get_movie_details),
        )
        .route("/api/catalog/stats", get(routes::catalog::get_stats))
        // TMDB proxy
        .route("/api/tmdb", get(routes::metadata::search))
        .route("/api/details", get(routes::metadata::details))
        // Static frontend
        .fallback_service(ServeDir::new(&static_dir))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
