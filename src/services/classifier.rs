use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{Classification, MovieRecord, SeriesEpisodeRecord};

lazy_static! {
    // ============ LINE EXTRACTORS ============
    static ref EXTINF_ATTRS: Regex =
        Regex::new(r#"(?i)#EXTINF:-1.*?tvg-name="(.*?)" .*?tvg-logo="(.*?)""#).unwrap();
    static ref SERIES_EPISODE: Regex = Regex::new(r"(?i)^(.*?)\s+S(\d+)E(\d+)$").unwrap();

    // ============ TITLE CLEANERS ============
    static ref TITLE_YEAR: Regex = Regex::new(r"^(.*?)(?:\s*\((\d{4})\))?$").unwrap();
    static ref BRACKET_TAGS: Regex = Regex::new(r"\[.*?\]").unwrap();
}

/// Classifies one (metadata line, URL line) pair into a catalog record.
///
/// Kind dispatch goes by URL path: `/series/` wins over `/movie/`, and
/// anything else is skipped. Names that carry no parsable attributes, series
/// names without an `SxxExx` suffix, and adult-tagged movies all come back
/// as [`Classification::Unclassified`].
pub struct LineClassifier;

impl LineClassifier {
    pub fn classify(metadata_line: &str, url: &str) -> Classification {
        let caps = match EXTINF_ATTRS.captures(metadata_line) {
            Some(caps) => caps,
            None => return Classification::Unclassified,
        };
        let name = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
        let logo = caps.get(2).map(|m| m.as_str()).unwrap_or_default();

        if url.contains("/series/") {
            Self::classify_series(name, logo, url)
        } else if url.contains("/movie/") {
            Self::classify_movie(name, logo, url)
        } else {
            Classification::Unclassified
        }
    }

    fn classify_series(name: &str, logo: &str, url: &str) -> Classification {
        let caps = match SERIES_EPISODE.captures(name) {
            Some(caps) => caps,
            None => return Classification::Unclassified,
        };

        let title = caps
            .get(1)
            .map(|m| m.as_str().trim())
            .unwrap_or_default()
            .to_string();
        let season = Self::normalize_number(caps.get(2).map(|m| m.as_str()).unwrap_or_default());
        let episode = Self::normalize_number(caps.get(3).map(|m| m.as_str()).unwrap_or_default());
        let (clean_title, year) = Self::split_title_year(&title);

        Classification::SeriesEpisode(SeriesEpisodeRecord {
            title,
            clean_title,
            year,
            season,
            episode,
            cover: logo.to_string(),
            link: url.to_string(),
        })
    }

    fn classify_movie(name: &str, logo: &str, url: &str) -> Classification {
        // Adult content filter applies to movies only
        if name.to_lowercase().contains("xxx") {
            return Classification::Unclassified;
        }

        // Year comes off first, then bracket tags; series titles keep theirs
        let (base_title, year) = Self::split_title_year(name);
        let clean_title = BRACKET_TAGS
            .replace_all(base_title.trim(), "")
            .trim()
            .to_string();

        Classification::Movie(MovieRecord {
            original_title: name.to_string(),
            clean_title,
            year,
            cover: logo.to_string(),
            link: url.to_string(),
        })
    }

    /// Split a trailing `(YYYY)` off a title. The lazy head plus optional
    /// tail means the year group only captures when the title actually ends
    /// with a parenthesized four-digit year.
    fn split_title_year(title: &str) -> (String, Option<String>) {
        match TITLE_YEAR.captures(title) {
            Some(caps) => {
                let clean = caps
                    .get(1)
                    .map(|m| m.as_str().trim())
                    .unwrap_or(title)
                    .to_string();
                let year = caps.get(2).map(|m| m.as_str().to_string());
                (clean, year)
            }
            None => (title.trim().to_string(), None),
        }
    }

    /// Canonical decimal form: strip leading zeros, keep every significant
    /// digit no matter how long the run is.
    fn normalize_number(digits: &str) -> String {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }
}
