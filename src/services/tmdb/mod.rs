//! TMDB Metadata Integration
//!
//! This module provides a caching proxy client for The Movie Database API.
//!
//! # Overview
//!
//! Catalog entries only carry what the playlist knew about them (a title, a
//! year, a cover URL). TMDB fills in the rest:
//!
//! - **Search**: Resolve a cleaned title (plus optional year) to a TMDB entry
//! - **Details**: Fetch the full record (genres, runtime, overview) by id
//! - **Enrichment**: Chain search and details, falling back to playlist data
//!
//! # Caching
//!
//! Every upstream response is memoized in-process, including "no results"
//! outcomes, so repeated lookups for the same title never hit TMDB twice.
//! Capacity and expiry are tunable via [`CachePolicy`]; the default keeps
//! everything for the lifetime of the process.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::services::tmdb::{CachePolicy, Lookup, TitleKind, TmdbClient};
//!
//! let client = TmdbClient::new(api_key, base, images, "pt-BR", 15_000, CachePolicy::default());
//! match client.search("Dark", TitleKind::Tv, Some("2017")).await? {
//!     Lookup::Found(hit) => println!("found id {}", hit.id),
//!     Lookup::NotFound => println!("no match"),
//! }
//! ```

pub mod cache;
pub mod client;
pub mod types;

// Re-exports for convenience
pub use cache::{CachePolicy, Lookup, ResponseCache};
pub use client::{TmdbClient, TmdbError};
pub use types::{EnrichedTitle, SearchHit, TitleDetails, TitleKind};
