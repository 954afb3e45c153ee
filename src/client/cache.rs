//! Time-bounded cache of successful read responses.

use std::collections::HashMap;

use serde_json::Value;

use super::transport::Method;

/// Builds the cache key for a request: method, path and serialized body.
pub fn cache_key(method: Method, path: &str, body: Option<&str>) -> String {
    format!("{}:{}:{}", method, path, body.unwrap_or(""))
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub data: Value,
    /// When the response was received (ms).
    pub timestamp: u64,
}

#[derive(Debug)]
pub struct ResponseCache {
    entries: HashMap<String, CacheEntry>,
    ttl_ms: u64,
}

impl ResponseCache {
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            ttl_ms,
        }
    }

    /// Returns the entry if it is younger than the TTL at `now`.
    /// Expired entries are dropped on the way.
    pub fn get(&mut self, key: &str, now: u64) -> Option<CacheEntry> {
        let entry = self.entries.get(key)?;
        if now.saturating_sub(entry.timestamp) < self.ttl_ms {
            return Some(entry.clone());
        }
        self.entries.remove(key);
        None
    }

    pub fn insert(&mut self, key: String, data: Value, timestamp: u64) {
        self.entries.insert(key, CacheEntry { data, timestamp });
    }

    /// Drops the entry stored under exactly `key`.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drops every entry whose key contains `pattern`. Returns how many went.
    pub fn invalidate(&mut self, pattern: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.contains(pattern));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TTL: u64 = 300_000;

    #[test]
    fn key_includes_method_path_and_body() {
        assert_eq!(cache_key(Method::Get, "/products", None), "GET:/products:");
        assert_eq!(
            cache_key(Method::Post, "/products", Some(r#"{"a":1}"#)),
            r#"POST:/products:{"a":1}"#
        );
    }

    #[test]
    fn entry_expires_after_ttl() {
        let mut cache = ResponseCache::new(TTL);
        cache.insert("GET:/products:".to_string(), json!([]), 1_000);

        let hit = cache.get("GET:/products:", 1_000 + TTL - 1).unwrap();
        assert_eq!(hit.timestamp, 1_000);
        assert!(cache.get("GET:/products:", 1_000 + TTL).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn invalidate_matches_substring() {
        let mut cache = ResponseCache::new(TTL);
        cache.insert("GET:/products:".to_string(), json!([]), 0);
        cache.insert("GET:/products/p1:".to_string(), json!({}), 0);
        cache.insert("GET:/categories:".to_string(), json!([]), 0);

        assert_eq!(cache.invalidate("/products"), 2);
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn remove_matches_key_exactly() {
        let mut cache = ResponseCache::new(TTL);
        cache.insert("GET:/products:".to_string(), json!([]), 0);
        cache.insert("GET:/products/p1:".to_string(), json!({}), 0);

        assert!(cache.remove("GET:/products:"));
        assert!(!cache.remove("GET:/products:"));
        assert_eq!(cache.len(), 1);
    }
}
