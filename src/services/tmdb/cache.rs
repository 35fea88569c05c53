use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// What a lookup produced: a value, or a confirmed "not there". Negative
/// results are first-class so repeated misses can stay off the upstream API.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

/// Cache tuning knobs, all optional. The default is cache-forever: no cap,
/// no expiry, negatives kept.
#[derive(Debug, Clone, Copy)]
pub struct CachePolicy {
    pub max_entries: Option<usize>,
    pub ttl: Option<Duration>,
    pub cache_negative: bool,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            max_entries: None,
            ttl: None,
            cache_negative: true,
        }
    }
}

#[derive(Debug)]
struct CachedEntry<T> {
    value: Lookup<T>,
    stored_at: Instant,
}

/// Response cache for lookup results, keyed on the exact request parameters.
///
/// Unbounded and permanent by default. `max_entries` switches on LRU
/// eviction; `ttl` makes aged entries read as misses (they get replaced by
/// the next upstream fetch).
pub struct ResponseCache<T> {
    entries: Mutex<LruCache<String, CachedEntry<T>>>,
    ttl: Option<Duration>,
    cache_negative: bool,
}

impl<T: Clone> ResponseCache<T> {
    pub fn new(policy: CachePolicy) -> Self {
        let entries = match policy.max_entries.and_then(NonZeroUsize::new) {
            Some(cap) => LruCache::new(cap),
            None => LruCache::unbounded(),
        };

        Self {
            entries: Mutex::new(entries),
            ttl: policy.ttl,
            cache_negative: policy.cache_negative,
        }
    }

    pub fn get(&self, key: &str) -> Option<Lookup<T>> {
        let mut entries = self.entries.lock().unwrap();

        let expired = match (entries.peek(key), self.ttl) {
            (None, _) => return None,
            (Some(entry), Some(ttl)) => entry.stored_at.elapsed() > ttl,
            (Some(_), None) => false,
        };

        if expired {
            entries.pop(key);
            return None;
        }

        // get (unlike peek) marks the entry as recently used
        entries.get(key).map(|entry| entry.value.clone())
    }

    pub fn put(&self, key: String, value: Lookup<T>) {
        if matches!(value, Lookup::NotFound) && !self.cache_negative {
            return;
        }

        let mut entries = self.entries.lock().unwrap();
        entries.put(
            key,
            CachedEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forever() -> ResponseCache<String> {
        ResponseCache::new(CachePolicy::default())
    }

    #[test]
    fn test_unbounded_default_keeps_everything() {
        let cache = forever();
        for i in 0..100 {
            cache.put(format!("key{}", i), Lookup::Found(format!("value{}", i)));
        }
        assert_eq!(cache.len(), 100);
        assert_eq!(
            cache.get("key0"),
            Some(Lookup::Found("value0".to_string()))
        );
    }

    #[test]
    fn test_negative_results_are_cached_by_default() {
        let cache = forever();
        cache.put("missing".to_string(), Lookup::NotFound);
        assert_eq!(cache.get("missing"), Some(Lookup::NotFound));
    }

    #[test]
    fn test_negative_caching_can_be_disabled() {
        let cache: ResponseCache<String> = ResponseCache::new(CachePolicy {
            cache_negative: false,
            ..CachePolicy::default()
        });
        cache.put("missing".to_string(), Lookup::NotFound);
        assert_eq!(cache.get("missing"), None);

        // positive entries still cache
        cache.put("hit".to_string(), Lookup::Found("value".to_string()));
        assert_eq!(cache.get("hit"), Some(Lookup::Found("value".to_string())));
    }

    #[test]
    fn test_lru_evicts_least_recently_used_at_capacity() {
        let cache: ResponseCache<String> = ResponseCache::new(CachePolicy {
            max_entries: Some(2),
            ..CachePolicy::default()
        });
        cache.put("a".to_string(), Lookup::Found("1".to_string()));
        cache.put("b".to_string(), Lookup::Found("2".to_string()));

        // touching "a" makes "b" the eviction candidate
        assert!(cache.get("a").is_some());
        cache.put("c".to_string(), Lookup::Found("3".to_string()));

        assert!(cache.get("a").is_some());
        assert_eq!(cache.get("b"), None);
        assert!(cache.get("c").is_some());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_ttl_expires_entries() {
        let cache: ResponseCache<String> = ResponseCache::new(CachePolicy {
            ttl: Some(Duration::from_millis(1)),
            ..CachePolicy::default()
        });
        cache.put("key".to_string(), Lookup::Found("value".to_string()));

        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(cache.get("key"), None);
        assert_eq!(cache.len(), 0, "expired entry must be dropped on read");
    }

    #[test]
    fn test_without_ttl_entries_never_expire() {
        let cache = forever();
        cache.put("key".to_string(), Lookup::Found("value".to_string()));
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get("key").is_some());
    }
}
