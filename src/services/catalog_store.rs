use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{Catalog, CatalogStats};

struct CurrentCatalog {
    catalog: Arc<Catalog>,
    loaded_at: Option<DateTime<Utc>>,
}

/// Holds the catalog snapshot currently being served.
///
/// A completed ingest replaces the snapshot wholesale; readers clone the
/// `Arc` out and keep reading the version they started with. Concurrent
/// loads race benignly: the last one to finish wins. The lock is held only
/// for the swap or the clone, never across awaits.
#[derive(Clone)]
pub struct CatalogStore {
    current: Arc<RwLock<CurrentCatalog>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            current: Arc::new(RwLock::new(CurrentCatalog {
                catalog: Arc::new(Catalog::new()),
                loaded_at: None,
            })),
        }
    }

    /// Swap in a freshly built catalog; returns its stats.
    pub async fn replace(&self, catalog: Catalog) -> CatalogStats {
        let stats = catalog.stats();
        let mut current = self.current.write().await;
        current.catalog = Arc::new(catalog);
        current.loaded_at = Some(Utc::now());
        stats
    }

    /// Cheap read snapshot; the caller keeps it valid for as long as needed.
    pub async fn snapshot(&self) -> Arc<Catalog> {
        let current = self.current.read().await;
        Arc::clone(&current.catalog)
    }

    /// When the current catalog was loaded; `None` until the first load.
    pub async fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.current.read().await.loaded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Classification, MovieRecord};

    fn one_movie_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(Classification::Movie(MovieRecord {
            original_title: "Movie".into(),
            clean_title: "Movie".into(),
            year: None,
            cover: "http://logo/m.png".into(),
            link: "http://host/movie/1.mp4".into(),
        }));
        catalog
    }

    #[tokio::test]
    async fn test_store_starts_empty() {
        let store = CatalogStore::new();
        assert_eq!(store.snapshot().await.stats(), CatalogStats::default());
        assert!(store.loaded_at().await.is_none());
    }

    #[tokio::test]
    async fn test_replace_swaps_wholesale() {
        let store = CatalogStore::new();
        let stats = store.replace(one_movie_catalog()).await;
        assert_eq!(stats.movies, 1);

        let stats = store.replace(Catalog::new()).await;
        assert_eq!(stats.movies, 0);
        assert_eq!(store.snapshot().await.stats().movies, 0);
    }

    #[tokio::test]
    async fn test_old_snapshot_survives_replace() {
        let store = CatalogStore::new();
        let before = store.snapshot().await;

        store.replace(one_movie_catalog()).await;

        assert_eq!(before.stats().movies, 0);
        assert_eq!(store.snapshot().await.stats().movies, 1);
    }

    #[tokio::test]
    async fn test_loaded_at_set_by_replace() {
        let store = CatalogStore::new();
        store.replace(one_movie_catalog()).await;

        let loaded_at = store.loaded_at().await;
        assert!(loaded_at.is_some());
        assert!(loaded_at.unwrap() <= Utc::now());
    }
}
