use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub static_dir: String,

    // TMDB
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub tmdb_image_base_url: String,
    pub tmdb_language: String,
    pub fetch_timeout_ms: u64,

    // Lookup cache
    pub lookup_cache_max_entries: Option<usize>,
    pub lookup_cache_ttl_ms: Option<u64>,
    pub lookup_cache_negative: bool,

    // Parsing
    pub parse_yield_every: usize,

    // Pagination
    pub page_size: usize,
    pub max_page_size: usize,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            // Server
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string()),

            // TMDB
            tmdb_api_key: env::var("TMDB_API_KEY").unwrap_or_default(),
            tmdb_base_url: env::var("TMDB_BASE_URL")
                .unwrap_or_else(|_| "https://api.themoviedb.org/3".to_string()),
            tmdb_image_base_url: env::var("TMDB_IMAGE_BASE_URL")
                .unwrap_or_else(|_| "https://image.tmdb.org/t/p".to_string()),
            tmdb_language: env::var("TMDB_LANGUAGE").unwrap_or_else(|_| "pt-BR".to_string()),
            fetch_timeout_ms: env::var("FETCH_TIMEOUT_MS")
                .unwrap_or_else(|_| "15000".to_string())
                .parse()
                .unwrap_or(15_000), // 15 seconds

            // Lookup cache (unset = unbounded, keep forever)
            lookup_cache_max_entries: env::var("LOOKUP_CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok()),
            lookup_cache_ttl_ms: env::var("LOOKUP_CACHE_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok()),
            lookup_cache_negative: env::var("LOOKUP_CACHE_NEGATIVE")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),

            // Parsing
            parse_yield_every: env::var("PARSE_YIELD_EVERY")
                .unwrap_or_else(|_| "2000".to_string())
                .parse()
                .unwrap_or(2000),

            // Pagination
            page_size: env::var("PAGE_SIZE")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            max_page_size: env::var("MAX_PAGE_SIZE")
                .unwrap_or_else(|_| "200".to_string())
                .parse()
                .unwrap_or(200),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
