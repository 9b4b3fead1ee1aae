//! In-memory content cache.

use indexmap::IndexMap;

use crate::path::ContentPath;

/// Fetched HTML keyed by content path, in insertion order.
///
/// Unbounded and never expires. Lives as long as the page.
#[derive(Debug, Default)]
pub struct ContentCache {
    entries: IndexMap<ContentPath, String>,
}

impl ContentCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached HTML for `path`, if any.
    #[must_use]
    pub fn get(&self, path: &ContentPath) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    /// Whether `path` has been cached.
    #[must_use]
    pub fn contains(&self, path: &ContentPath) -> bool {
        self.entries.contains_key(path)
    }

    /// Store HTML for `path`.
    ///
    /// Re-inserting an existing path replaces its HTML but keeps its position.
    pub fn insert(&mut self, path: ContentPath, html: String) {
        self.entries.insert(path, html);
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached paths in the order they were first stored.
    pub fn paths(&self) -> impl Iterator<Item = &ContentPath> {
        self.entries.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathNormalizer;

    fn path(raw: &str) -> ContentPath {
        PathNormalizer::new("start.html", "html").normalize(raw)
    }

    #[test]
    fn test_get_after_insert() {
        let mut cache = ContentCache::new();
        cache.insert(path("guide"), "<h1>Guide</h1>".to_owned());

        assert_eq!(cache.get(&path("guide")), Some("<h1>Guide</h1>"));
        assert_eq!(cache.get(&path("other")), None);
        assert!(cache.contains(&path("#/guide.html")));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cache = ContentCache::new();
        cache.insert(path("b"), "b".to_owned());
        cache.insert(path("a"), "a".to_owned());
        cache.insert(path("b"), "b2".to_owned());

        let order: Vec<&str> = cache.paths().map(ContentPath::as_str).collect();
        assert_eq!(order, vec!["b.html", "a.html"]);
        assert_eq!(cache.get(&path("b")), Some("b2"));
    }

    #[test]
    fn test_clear() {
        let mut cache = ContentCache::new();
        cache.insert(path("a"), "a".to_owned());
        assert_eq!(cache.len(), 1);

        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.get(&path("a")), None);
    }
}
