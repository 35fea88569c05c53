use reqwest::Client;
use std::time::Duration;

use crate::services::tmdb::cache::{CachePolicy, Lookup, ResponseCache};
use crate::services::tmdb::types::{
    DetailsResponse, SearchHit, SearchResponse, SearchResult, TitleDetails, TitleKind,
};

/// TMDB lookup error types
#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP error: {0}")]
    Http(u16),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Caching client for the TMDB v3 API.
///
/// Every search and details call goes through a response cache keyed on the
/// exact request parameters; only upstream failures bypass it (they are
/// never cached). `enrich` layers the two calls into a best-effort helper
/// that cannot fail.
pub struct TmdbClient {
    http: Client,
    base_url: String,
    image_base_url: String,
    api_key: String,
    language: String,
    search_cache: ResponseCache<SearchHit>,
    details_cache: ResponseCache<TitleDetails>,
}

impl TmdbClient {
    pub fn new(
        api_key: &str,
        base_url: &str,
        image_base_url: &str,
        language: &str,
        timeout_ms: u64,
        cache_policy: CachePolicy,
    ) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .gzip(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            image_base_url: image_base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            language: language.to_string(),
            search_cache: ResponseCache::new(cache_policy),
            details_cache: ResponseCache::new(cache_policy),
        }
    }

    /// Search for a title; the first upstream result wins. An empty result
    /// list is a cacheable `NotFound`, not an error.
    pub async fn search(
        &self,
        query: &str,
        kind: TitleKind,
        year: Option<&str>,
    ) -> Result<Lookup<SearchHit>, TmdbError> {
        let cache_key = format!("{}:{}:{}", kind.as_str(), query, year.unwrap_or(""));
        if let Some(cached) = self.search_cache.get(&cache_key) {
            tracing::debug!("TMDB search cache hit: {}", cache_key);
            return Ok(cached);
        }

        tracing::info!("TMDB search: {} (type: {})", query, kind.as_str());

        let mut params = vec![
            ("api_key", self.api_key.as_str()),
            ("query", query),
            ("language", self.language.as_str()),
        ];
        if let Some(year) = year {
            params.push(("year", year));
        }

        let url = format!("{}/search/{}", self.base_url, kind.as_str());
        let response = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| TmdbError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TmdbError::Http(status.as_u16()));
        }

        let payload: SearchResponse = response
            .json()
            .await
            .map_err(|e| TmdbError::Parse(e.to_string()))?;

        let lookup = match payload.results.into_iter().next() {
            Some(first) => Lookup::Found(self.map_search_result(first)),
            None => Lookup::NotFound,
        };

        self.search_cache.put(cache_key, lookup.clone());
        Ok(lookup)
    }

    /// Fetch full details by id. Upstream 404 maps to `NotFound`; any other
    /// failure is an error and stays uncached.
    pub async fn details(
        &self,
        kind: TitleKind,
        id: i64,
    ) -> Result<Lookup<TitleDetails>, TmdbError> {
        let cache_key = format!("details:{}:{}", kind.as_str(), id);
        if let Some(cached) = self.details_cache.get(&cache_key) {
            tracing::debug!("TMDB details cache hit: {}", cache_key);
            return Ok(cached);
        }

        tracing::info!("TMDB details: {} id {}", kind.as_str(), id);

        let url = format!("{}/{}/{}", self.base_url, kind.as_str(), id);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await
            .map_err(|e| TmdbError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            self.details_cache.put(cache_key, Lookup::NotFound);
            return Ok(Lookup::NotFound);
        }
        if !status.is_success() {
            return Err(TmdbError::Http(status.as_u16()));
        }

        let payload: DetailsResponse = response
            .json()
            .await
            .map_err(|e| TmdbError::Parse(e.to_string()))?;

        let details = self.map_details(payload);
        self.details_cache
            .put(cache_key, Lookup::Found(details.clone()));
        Ok(Lookup::Found(details))
    }

    /// Best-effort enrichment for one catalog title: search by clean title
    /// and year, then fetch details for the first hit. Any miss or failure
    /// along the way falls back to the locally known fields; never errors.
    pub async fn enrich(
        &self,
        kind: TitleKind,
        original_title: &str,
        clean_title: &str,
        year: Option<&str>,
        cover: &str,
    ) -> TitleDetails {
        let resolved = match self.search(clean_title, kind, year).await {
            Ok(Lookup::Found(hit)) => match self.details(kind, hit.id).await {
                Ok(Lookup::Found(details)) => Some(details),
                Ok(Lookup::NotFound) => None,
                Err(err) => {
                    tracing::warn!("TMDB details failed for '{}': {}", original_title, err);
                    None
                }
            },
            Ok(Lookup::NotFound) => None,
            Err(err) => {
                tracing::warn!("TMDB search failed for '{}': {}", original_title, err);
                None
            }
        };

        resolved.unwrap_or_else(|| Self::local_fallback(original_title, year, cover))
    }

    /// Cache entry counts (search, details) for the health endpoint.
    pub fn cache_sizes(&self) -> (usize, usize) {
        (self.search_cache.len(), self.details_cache.len())
    }

    fn map_search_result(&self, result: SearchResult) -> SearchHit {
        SearchHit {
            id: result.id,
            title: result.title.or(result.name),
            overview: result.overview,
            poster_path: self.image_url("w500", result.poster_path),
            vote_average: Self::format_rating(result.vote_average),
            release_date: result.release_date.or(result.first_air_date),
        }
    }

    fn map_details(&self, payload: DetailsResponse) -> TitleDetails {
        TitleDetails {
            title: payload.title.or(payload.name),
            overview: payload.overview,
            poster_path: self.image_url("w780", payload.poster_path),
            vote_average: Self::format_rating(payload.vote_average),
            release_date: payload.release_date.or(payload.first_air_date),
            genres: payload.genres.into_iter().map(|g| g.name).collect(),
            runtime: payload.runtime,
        }
    }

    fn image_url(&self, width: &str, path: Option<String>) -> Option<String> {
        path.map(|p| format!("{}/{}{}", self.image_base_url, width, p))
    }

    /// One decimal, as a string; missing ratings read as unrated.
    fn format_rating(value: Option<f64>) -> String {
        format!("{:.1}", value.unwrap_or(0.0))
    }

    fn local_fallback(original_title: &str, year: Option<&str>, cover: &str) -> TitleDetails {
        TitleDetails {
            title: Some(original_title.to_string()),
            overview: Some("Informações detalhadas não encontradas.".to_string()),
            poster_path: Some(cover.to_string()),
            vote_average: "N/A".to_string(),
            release_date: year.map(|y| y.to_string()),
            genres: Vec::new(),
            runtime: None,
        }
    }
}
