//! JSON document loading with a shared cache.
//!
//! Documents live at `data/{name}.json` and are addressed by their logical
//! name. Failures are logged and surface as `None`; nothing here returns an
//! error to the caller.
//!
//! # Cache policy
//!
//! The first successful load of a name is memoized for the loader's lifetime.
//! [`CachePolicy::Refresh`] forces a re-fetch and stores the fresh result.
//! Failed loads are never cached, so a later call retries.

use super::fetch::Fetch;
use crate::log;
use parking_lot::RwLock;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::sync::Arc;

/// Whether a load may be answered from the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    #[default]
    Use,
    #[allow(dead_code)] // Reserved API
    Refresh,
}

/// Result of [`DataLoader::load_multiple`]: every requested name, in request
/// order, paired with its document or `None` on failure.
#[derive(Debug, Clone, Default)]
pub struct DataBundle {
    entries: Vec<(String, Option<Arc<Value>>)>,
}

impl DataBundle {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, doc)| doc.as_deref())
    }

    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, doc)| doc.is_none())
            .map(|(key, _)| key.as_str())
    }
}

pub struct DataLoader<F> {
    fetcher: Arc<F>,
    cache: RwLock<FxHashMap<String, Arc<Value>>>,
}

impl<F: Fetch> DataLoader<F> {
    pub fn new(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            cache: RwLock::new(FxHashMap::default()),
        }
    }

    /// Relative path of a data document.
    pub fn path_of(name: &str) -> String {
        format!("data/{name}.json")
    }

    /// Load one document.
    pub fn load(&self, name: &str, policy: CachePolicy) -> Option<Arc<Value>> {
        if policy == CachePolicy::Use
            && let Some(doc) = self.get_cached(name)
        {
            return Some(doc);
        }

        let path = Self::path_of(name);
        let bytes = match self.fetcher.fetch(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                log!("data"; "{name}: {err}");
                return None;
            }
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(value) => {
                let doc = Arc::new(value);
                self.cache.write().insert(name.to_owned(), Arc::clone(&doc));
                Some(doc)
            }
            Err(err) => {
                log!("data"; "{path}: invalid JSON ({err})");
                None
            }
        }
    }

    /// Load several documents concurrently. Duplicate names are loaded once.
    pub fn load_multiple<S: AsRef<str> + Sync>(&self, names: &[S]) -> DataBundle {
        let mut unique: Vec<&str> = Vec::with_capacity(names.len());
        for name in names {
            if !unique.contains(&name.as_ref()) {
                unique.push(name.as_ref());
            }
        }

        let entries = unique
            .par_iter()
            .map(|name| ((*name).to_owned(), self.load(name, CachePolicy::Use)))
            .collect();

        DataBundle { entries }
    }

    /// Drop one cached document, or all of them with `None`.
    pub fn clear_cache(&self, name: Option<&str>) {
        let mut cache = self.cache.write();
        match name {
            Some(name) => {
                cache.remove(name);
            }
            None => cache.clear(),
        }
    }

    pub fn get_cached(&self, name: &str) -> Option<Arc<Value>> {
        self.cache.read().get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::fetch::testing::MemoryFetcher;

    fn loader(fetcher: MemoryFetcher) -> (DataLoader<MemoryFetcher>, Arc<MemoryFetcher>) {
        let fetcher = Arc::new(fetcher);
        (DataLoader::new(Arc::clone(&fetcher)), fetcher)
    }

    #[test]
    fn test_load_caches_identical_document() {
        let (loader, fetcher) =
            loader(MemoryFetcher::new().with("data/x.json", r#"{"name": "x"}"#));

        let first = loader.load("x", CachePolicy::Use).unwrap();
        let second = loader.load("x", CachePolicy::Use).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(fetcher.hits("data/x.json"), 1);
    }

    #[test]
    fn test_refresh_refetches_and_updates_cache() {
        let (loader, fetcher) = loader(MemoryFetcher::new().with("data/x.json", "[1]"));

        let first = loader.load("x", CachePolicy::Use).unwrap();
        let fresh = loader.load("x", CachePolicy::Refresh).unwrap();

        assert_eq!(fetcher.hits("data/x.json"), 2);
        assert!(!Arc::ptr_eq(&first, &fresh));
        assert!(Arc::ptr_eq(&fresh, &loader.get_cached("x").unwrap()));
    }

    #[test]
    fn test_missing_document_is_absent_and_not_cached() {
        let (loader, fetcher) = loader(MemoryFetcher::new());

        assert!(loader.load("nope", CachePolicy::Use).is_none());
        assert!(loader.get_cached("nope").is_none());
        assert!(loader.load("nope", CachePolicy::Use).is_none());
        assert_eq!(fetcher.hits("data/nope.json"), 2);
    }

    #[test]
    fn test_invalid_json_is_absent() {
        let (loader, _) = loader(MemoryFetcher::new().with("data/bad.json", "{ not json"));
        assert!(loader.load("bad", CachePolicy::Use).is_none());
        assert!(loader.get_cached("bad").is_none());
    }

    #[test]
    fn test_load_multiple_partial_failure() {
        let (loader, _) = loader(MemoryFetcher::new().with("data/b.json", r#"{"ok": true}"#));

        let bundle = loader.load_multiple(&["a", "b"]);

        assert!(bundle.get("a").is_none());
        assert_eq!(bundle.get("b").unwrap()["ok"], Value::Bool(true));
        assert_eq!(bundle.missing().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_load_multiple_dedups_and_keeps_order() {
        let (loader, fetcher) = loader(
            MemoryFetcher::new()
                .with("data/a.json", "1")
                .with("data/b.json", "2"),
        );

        let bundle = loader.load_multiple(&["b", "a", "b"]);

        assert_eq!(bundle.entries.len(), 2);
        assert_eq!(bundle.entries[0].0, "b");
        assert_eq!(bundle.get("a"), Some(&Value::from(1)));
        assert_eq!(fetcher.hits("data/b.json"), 1);
    }

    #[test]
    fn test_clear_cache_single_and_all() {
        let (loader, _) = loader(
            MemoryFetcher::new()
                .with("data/a.json", "1")
                .with("data/b.json", "2"),
        );
        loader.load_multiple(&["a", "b"]);

        loader.clear_cache(Some("a"));
        assert!(loader.get_cached("a").is_none());
        assert!(loader.get_cached("b").is_some());

        loader.clear_cache(None);
        assert!(loader.get_cached("b").is_none());
    }
}
