//! ISSN → pathway memoization
//!
//! A pathway is deterministic per ISSN absent an upstream policy change, so
//! the cache is write-once per key with no expiry. Concurrent writers racing
//! on the same key produce at most a redundant provider call, never an
//! inconsistent value. Persistence is wholesale: the caller loads the JSON
//! file at start and flushes it at the end of a run.

use std::path::Path;
use std::sync::Mutex;

use rustc_hash::FxHashMap;

use crate::error::CoreError;
use crate::schema::OaPathway;

/// Process-lifetime pathway cache, optionally persisted as a JSON object.
#[derive(Debug, Default)]
pub struct PathwayCache {
    inner: Mutex<FxHashMap<String, OaPathway>>,
}

impl PathwayCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON file; a missing file yields an empty cache.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if !path.is_file() {
            log::debug!("no pathway cache at {}, starting empty", path.display());
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)?;
        let entries: FxHashMap<String, OaPathway> = serde_json::from_str(&content)?;
        log::info!(
            "loaded pathway cache with {} entries from {}",
            entries.len(),
            path.display()
        );
        Ok(Self {
            inner: Mutex::new(entries),
        })
    }

    /// Write the whole cache out as a pretty-printed JSON object.
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        let entries = self.inner.lock().expect("cache mutex poisoned");
        let json = serde_json::to_string_pretty(&*entries)?;
        std::fs::write(path, json)?;
        log::info!(
            "saved pathway cache with {} entries to {}",
            entries.len(),
            path.display()
        );
        Ok(())
    }

    /// Explicit presence check: `Some` for any cached value, including ones
    /// a looser reading might consider "falsy".
    pub fn get(&self, issn: &str) -> Option<OaPathway> {
        self.inner
            .lock()
            .expect("cache mutex poisoned")
            .get(issn)
            .copied()
    }

    /// Write-once upsert: the first resolved value for an ISSN sticks.
    pub fn put(&self, issn: &str, pathway: OaPathway) {
        self.inner
            .lock()
            .expect("cache mutex poisoned")
            .entry(issn.to_string())
            .or_insert(pathway);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("cache mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_distinguishes_absent_from_present() {
        let cache = PathwayCache::new();
        assert_eq!(cache.get("1234-1234"), None);

        cache.put("1234-1234", OaPathway::Other);
        assert_eq!(cache.get("1234-1234"), Some(OaPathway::Other));
    }

    #[test]
    fn put_is_write_once() {
        let cache = PathwayCache::new();
        cache.put("1234-1234", OaPathway::Nocost);
        cache.put("1234-1234", OaPathway::Other);
        assert_eq!(cache.get("1234-1234"), Some(OaPathway::Nocost));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pathway.json");

        let cache = PathwayCache::new();
        cache.put("2050-084X", OaPathway::Nocost);
        cache.put("1179-3163", OaPathway::Other);
        cache.save(&path).unwrap();

        let reloaded = PathwayCache::load(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get("2050-084X"), Some(OaPathway::Nocost));
        assert_eq!(reloaded.get("1179-3163"), Some(OaPathway::Other));
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PathwayCache::load(&dir.path().join("absent.json")).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn corrupt_file_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pathway.json");
        std::fs::write(&path, "not json").unwrap();

        let err = PathwayCache::load(&path).unwrap_err();
        assert!(matches!(err, CoreError::CacheFormat(_)));
    }

    #[test]
    fn file_format_is_a_flat_json_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pathway.json");

        let cache = PathwayCache::new();
        cache.put("2050-084X", OaPathway::Nocost);
        cache.save(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["2050-084X"], "nocost");
    }

    #[test]
    fn concurrent_puts_to_same_key_are_benign() {
        let cache = std::sync::Arc::new(PathwayCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || cache.put("1234-1234", OaPathway::Nocost))
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(cache.get("1234-1234"), Some(OaPathway::Nocost));
        assert_eq!(cache.len(), 1);
    }
}
