use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One playable episode inside a season.
///
/// `episode` is kept as a normalized decimal string (no leading zeros) so the
/// model never loses digits on absurdly long numbers; ordering is handled by
/// [`compare_numeric_strings`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeEntry {
    pub episode: String,
    pub link: String,
}

/// A series aggregated from its episode lines, keyed by the raw playlist
/// title. Seasons map normalized season numbers (as strings) to episode
/// lists in arrival order until [`Catalog::sort_episodes`] runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesEntry {
    pub original_title: String,
    pub clean_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    pub cover: String,
    pub seasons: HashMap<String, Vec<EpisodeEntry>>,
}

impl SeriesEntry {
    /// Seasons in numeric ascending order, for API responses.
    pub fn season_views(&self) -> Vec<SeasonView> {
        let mut views: Vec<SeasonView> = self
            .seasons
            .iter()
            .map(|(season, episodes)| SeasonView {
                season: season.clone(),
                episodes: episodes.clone(),
            })
            .collect();
        views.sort_by(|a, b| compare_numeric_strings(&a.season, &b.season));
        views
    }

    /// Total episode entries across all seasons (duplicates included).
    pub fn episode_count(&self) -> usize {
        self.seasons.values().map(Vec::len).sum()
    }
}

/// One movie line. No deduplication: the playlist may legitimately carry the
/// same title several times (different sources/qualities).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieEntry {
    pub original_title: String,
    pub clean_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    pub cover: String,
    pub link: String,
}

/// A season of one series with its episodes, sorted for presentation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonView {
    pub season: String,
    pub episodes: Vec<EpisodeEntry>,
}

/// Series record produced by the classifier. Clean title and year are split
/// off the raw title at classification time; the aggregator only uses them
/// when it sees the series for the first time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesEpisodeRecord {
    pub title: String,
    pub clean_title: String,
    pub year: Option<String>,
    pub season: String,
    pub episode: String,
    pub cover: String,
    pub link: String,
}

/// Movie record produced by the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRecord {
    pub original_title: String,
    pub clean_title: String,
    pub year: Option<String>,
    pub cover: String,
    pub link: String,
}

/// Outcome of classifying one (metadata line, URL line) pair. A closed set:
/// anything that does not parse into the two known shapes is `Unclassified`
/// and silently skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    SeriesEpisode(SeriesEpisodeRecord),
    Movie(MovieRecord),
    Unclassified,
}

/// Catalog counts returned by the load endpoint and health check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub series: usize,
    pub movies: usize,
    pub episodes: usize,
}

/// Series summary row for the paginated list endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub original_title: String,
    pub clean_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    pub cover: String,
    pub seasons: usize,
    pub episodes: usize,
}

/// One page of catalog results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// The in-memory aggregate of one playlist load. Series are keyed by the raw
/// (un-cleaned) title so similarly-named but distinct series never merge.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub series: HashMap<String, SeriesEntry>,
    pub movies: Vec<MovieEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one classified record into the catalog. First-seen wins for a
    /// series' clean title, year and cover; later episodes only extend the
    /// season lists. Movies append unconditionally.
    pub fn insert(&mut self, record: Classification) {
        match record {
            Classification::SeriesEpisode(rec) => {
                let entry = self
                    .series
                    .entry(rec.title.clone())
                    .or_insert_with(|| SeriesEntry {
                        original_title: rec.title.clone(),
                        clean_title: rec.clean_title.clone(),
                        year: rec.year.clone(),
                        cover: rec.cover.clone(),
                        seasons: HashMap::new(),
                    });
                entry
                    .seasons
                    .entry(rec.season)
                    .or_default()
                    .push(EpisodeEntry {
                        episode: rec.episode,
                        link: rec.link,
                    });
            }
            Classification::Movie(rec) => {
                self.movies.push(MovieEntry {
                    original_title: rec.original_title,
                    clean_title: rec.clean_title,
                    year: rec.year,
                    cover: rec.cover,
                    link: rec.link,
                });
            }
            Classification::Unclassified => {}
        }
    }

    /// Post-ingest pass: order every season's episodes by numeric episode
    /// value ascending. The sort is stable, so duplicate episode numbers
    /// keep their arrival order.
    pub fn sort_episodes(&mut self) {
        for entry in self.series.values_mut() {
            for episodes in entry.seasons.values_mut() {
                episodes.sort_by(|a, b| compare_numeric_strings(&a.episode, &b.episode));
            }
        }
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            series: self.series.len(),
            movies: self.movies.len(),
            episodes: self.series.values().map(SeriesEntry::episode_count).sum(),
        }
    }

    pub fn series_by_title(&self, original_title: &str) -> Option<&SeriesEntry> {
        self.series.get(original_title)
    }

    /// First movie whose raw title matches exactly (the list may hold
    /// duplicates; any of them carries the same lookup-relevant fields).
    pub fn movie_by_title(&self, original_title: &str) -> Option<&MovieEntry> {
        self.movies
            .iter()
            .find(|movie| movie.original_title == original_title)
    }

    /// Series summaries filtered by accent-folded substring match on the raw
    /// title, sorted by raw title, paginated.
    pub fn series_page(
        &self,
        search: Option<&str>,
        page: usize,
        per_page: usize,
    ) -> Page<SeriesSummary> {
        let needle = search.map(normalize_search).unwrap_or_default();

        let mut titles: Vec<&String> = self.series.keys().collect();
        titles.sort();

        let matching: Vec<&SeriesEntry> = titles
            .into_iter()
            .filter(|title| needle.is_empty() || normalize_search(title).contains(&needle))
            .map(|title| &self.series[title])
            .collect();

        paginate(matching, page, per_page, |entry| SeriesSummary {
            original_title: entry.original_title.clone(),
            clean_title: entry.clean_title.clone(),
            year: entry.year.clone(),
            cover: entry.cover.clone(),
            seasons: entry.seasons.len(),
            episodes: entry.episode_count(),
        })
    }

    /// Movies filtered and paginated the same way, sorted by raw title.
    pub fn movies_page(
        &self,
        search: Option<&str>,
        page: usize,
        per_page: usize,
    ) -> Page<MovieEntry> {
        let needle = search.map(normalize_search).unwrap_or_default();

        let mut matching: Vec<&MovieEntry> = self
            .movies
            .iter()
            .filter(|movie| {
                needle.is_empty() || normalize_search(&movie.original_title).contains(&needle)
            })
            .collect();
        matching.sort_by(|a, b| a.original_title.cmp(&b.original_title));

        paginate(matching, page, per_page, |movie| movie.clone())
    }
}

/// Slice one page out of a filtered list. Page numbers are 1-based; an
/// out-of-range page yields an empty item list with the real totals.
fn paginate<S, T, F>(matching: Vec<S>, page: usize, per_page: usize, project: F) -> Page<T>
where
    F: Fn(S) -> T,
{
    let per_page = per_page.max(1);
    let page = page.max(1);
    let total_items = matching.len();
    let total_pages = total_items.div_ceil(per_page);
    let start = (page - 1).saturating_mul(per_page);

    let items = matching
        .into_iter()
        .skip(start)
        .take(per_page)
        .map(project)
        .collect();

    Page {
        items,
        page,
        per_page,
        total_items,
        total_pages,
    }
}

/// Numeric order for normalized decimal strings: shorter means smaller, and
/// equal lengths compare lexicographically. Holds because normalization
/// strips leading zeros.
pub fn compare_numeric_strings(a: &str, b: &str) -> std::cmp::Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Search normalization: lowercase plus a fold of the Latin accents that
/// show up in playlist titles, so "Pantanal" matches "pantanál".
pub fn normalize_search(text: &str) -> String {
    text.to_lowercase().chars().map(fold_accent).collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode_record(title: &str, season: &str, episode: &str) -> Classification {
        episode_record_with_link(
            title,
            season,
            episode,
            &format!("http://host/series/{}/{}/{}", title, season, episode),
        )
    }

    fn episode_record_with_link(
        title: &str,
        season: &str,
        episode: &str,
        link: &str,
    ) -> Classification {
        Classification::SeriesEpisode(SeriesEpisodeRecord {
            title: title.to_string(),
            clean_title: title.to_string(),
            year: None,
            season: season.to_string(),
            episode: episode.to_string(),
            cover: "http://logo/cover.png".to_string(),
            link: link.to_string(),
        })
    }

    fn movie_record(title: &str) -> Classification {
        Classification::Movie(MovieRecord {
            original_title: title.to_string(),
            clean_title: title.to_string(),
            year: None,
            cover: "http://logo/cover.png".to_string(),
            link: format!("http://host/movie/{}", title),
        })
    }

    #[test]
    fn test_episodes_sort_ascending() {
        let mut catalog = Catalog::new();
        catalog.insert(episode_record("Show", "1", "2"));
        catalog.insert(episode_record("Show", "1", "1"));
        catalog.insert(episode_record("Show", "1", "10"));
        catalog.sort_episodes();

        let episodes = &catalog.series["Show"].seasons["1"];
        let order: Vec<&str> = episodes.iter().map(|e| e.episode.as_str()).collect();
        assert_eq!(order, vec!["1", "2", "10"]);
    }

    #[test]
    fn test_duplicate_episodes_preserved_in_arrival_order() {
        let mut catalog = Catalog::new();
        catalog.insert(episode_record_with_link("Show", "1", "1", "http://host/series/a"));
        catalog.insert(episode_record_with_link("Show", "1", "1", "http://host/series/b"));
        catalog.sort_episodes();

        let episodes = &catalog.series["Show"].seasons["1"];
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].link, "http://host/series/a");
        assert_eq!(episodes[1].link, "http://host/series/b");
    }

    #[test]
    fn test_series_keyed_by_raw_title_never_merge() {
        let mut catalog = Catalog::new();
        catalog.insert(episode_record("Show (2020)", "1", "1"));
        catalog.insert(episode_record("Show", "1", "1"));

        assert_eq!(catalog.series.len(), 2);
        assert!(catalog.series.contains_key("Show (2020)"));
        assert!(catalog.series.contains_key("Show"));
    }

    #[test]
    fn test_first_seen_wins_for_series_fields() {
        let mut catalog = Catalog::new();
        catalog.insert(Classification::SeriesEpisode(SeriesEpisodeRecord {
            title: "Show".into(),
            clean_title: "Show".into(),
            year: Some("2020".into()),
            season: "1".into(),
            episode: "1".into(),
            cover: "http://logo/first.png".into(),
            link: "http://host/series/1".into(),
        }));
        catalog.insert(Classification::SeriesEpisode(SeriesEpisodeRecord {
            title: "Show".into(),
            clean_title: "Show".into(),
            year: Some("1999".into()),
            season: "1".into(),
            episode: "2".into(),
            cover: "http://logo/second.png".into(),
            link: "http://host/series/2".into(),
        }));

        let entry = &catalog.series["Show"];
        assert_eq!(entry.cover, "http://logo/first.png");
        assert_eq!(entry.year.as_deref(), Some("2020"));
        assert_eq!(entry.episode_count(), 2);
    }

    #[test]
    fn test_season_views_numeric_order() {
        let mut catalog = Catalog::new();
        catalog.insert(episode_record("Show", "10", "1"));
        catalog.insert(episode_record("Show", "2", "1"));
        catalog.insert(episode_record("Show", "1", "1"));

        let views = catalog.series["Show"].season_views();
        let order: Vec<&str> = views.iter().map(|v| v.season.as_str()).collect();
        assert_eq!(order, vec!["1", "2", "10"]);
    }

    #[test]
    fn test_unclassified_is_a_no_op() {
        let mut catalog = Catalog::new();
        catalog.insert(Classification::Unclassified);
        assert_eq!(catalog.stats(), CatalogStats::default());
    }

    #[test]
    fn test_stats_count_episodes_across_seasons() {
        let mut catalog = Catalog::new();
        catalog.insert(episode_record("Show", "1", "1"));
        catalog.insert(episode_record("Show", "2", "1"));
        catalog.insert(movie_record("Movie"));

        let stats = catalog.stats();
        assert_eq!(stats.series, 1);
        assert_eq!(stats.movies, 1);
        assert_eq!(stats.episodes, 2);
    }

    #[test]
    fn test_series_page_filters_and_paginates() {
        let mut catalog = Catalog::new();
        for title in ["Alpha", "Beta", "Gamma", "Alta Pressão"] {
            catalog.insert(episode_record(title, "1", "1"));
        }

        let page = catalog.series_page(Some("al"), 1, 30);
        let titles: Vec<&str> = page.items.iter().map(|s| s.original_title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "Alta Pressão"]);
        assert_eq!(page.total_items, 2);
        assert_eq!(page.total_pages, 1);

        let paged = catalog.series_page(None, 2, 3);
        assert_eq!(paged.items.len(), 1);
        assert_eq!(paged.total_items, 4);
        assert_eq!(paged.total_pages, 2);
    }

    #[test]
    fn test_movies_page_sorted_by_title() {
        let mut catalog = Catalog::new();
        catalog.insert(movie_record("Zebra"));
        catalog.insert(movie_record("Apple"));

        let page = catalog.movies_page(None, 1, 30);
        let titles: Vec<&str> = page.items.iter().map(|m| m.original_title.as_str()).collect();
        assert_eq!(titles, vec!["Apple", "Zebra"]);
    }

    #[test]
    fn test_out_of_range_page_is_empty_with_real_totals() {
        let mut catalog = Catalog::new();
        catalog.insert(movie_record("Only One"));

        let page = catalog.movies_page(None, 5, 30);
        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_normalize_search_folds_case_and_accents() {
        assert_eq!(normalize_search("Pantanál"), "pantanal");
        assert_eq!(normalize_search("AÇÃO"), "acao");
        assert_eq!(normalize_search("Épico"), "epico");
    }

    #[test]
    fn test_numeric_string_ordering() {
        use std::cmp::Ordering;
        assert_eq!(compare_numeric_strings("2", "10"), Ordering::Less);
        assert_eq!(compare_numeric_strings("10", "10"), Ordering::Equal);
        assert_eq!(compare_numeric_strings("3", "2"), Ordering::Greater);
    }
}
