use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use notin_core::ContentId;
use serde::Serialize;

/// Production default: content files change rarely, avoid repeated reads.
pub const PRODUCTION_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone)]
struct CacheEntry {
    text: String,
    cached_at: Instant,
    last_modified: Option<DateTime<Utc>>,
}

/// Time-bounded in-memory store of loaded content, keyed by identifier.
///
/// Expiry is lazy: an entry older than the TTL is evicted by the `get`/`has`
/// that observes it; there is no background sweep. A zero TTL disables
/// caching entirely (every lookup is a miss), which is the development-mode
/// configuration so that content edits are visible immediately.
///
/// The interior mutex keeps the read-evict-write sequence a single logical
/// operation on multi-threaded runtimes.
#[derive(Debug)]
pub struct ContentCache {
    entries: Mutex<HashMap<ContentId, CacheEntry>>,
    ttl: Duration,
}

/// Diagnostic view of one cache entry.
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntryStats {
    pub id: ContentId,
    pub age: Duration,
    pub is_valid: bool,
}

/// Diagnostic snapshot of the whole cache. Never mutates state.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub size: usize,
    pub entries: Vec<CacheEntryStats>,
}

impl ContentCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Cache with the production TTL.
    pub fn production() -> Self {
        Self::new(PRODUCTION_TTL)
    }

    /// Cache that never holds anything (development mode).
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    fn is_valid(&self, entry: &CacheEntry) -> bool {
        !self.ttl.is_zero() && entry.cached_at.elapsed() < self.ttl
    }

    /// Cloned text for `id` if present and fresh; evicts a stale entry as a
    /// side effect of observing it.
    pub fn get(&self, id: ContentId) -> Option<String> {
        let mut entries = self.entries.lock().expect("content cache poisoned");
        match entries.get(&id) {
            Some(entry) if self.is_valid(entry) => Some(entry.text.clone()),
            Some(_) => {
                entries.remove(&id);
                None
            }
            None => None,
        }
    }

    /// Stores `text` for `id`, overwriting any existing entry and resetting
    /// its age to zero.
    pub fn set(&self, id: ContentId, text: String, last_modified: Option<DateTime<Utc>>) {
        let entry = CacheEntry {
            text,
            cached_at: Instant::now(),
            last_modified,
        };
        self.entries
            .lock()
            .expect("content cache poisoned")
            .insert(id, entry);
    }

    pub fn has(&self, id: ContentId) -> bool {
        self.get(id).is_some()
    }

    /// Last-modified metadata recorded with a live entry, if any.
    pub fn last_modified(&self, id: ContentId) -> Option<DateTime<Utc>> {
        let entries = self.entries.lock().expect("content cache poisoned");
        entries
            .get(&id)
            .filter(|entry| self.is_valid(entry))
            .and_then(|entry| entry.last_modified)
    }

    pub fn delete(&self, id: ContentId) -> bool {
        self.entries
            .lock()
            .expect("content cache poisoned")
            .remove(&id)
            .is_some()
    }

    pub fn clear(&self) {
        self.entries.lock().expect("content cache poisoned").clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("content cache poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Diagnostic snapshot; does not evict stale entries.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock().expect("content cache poisoned");
        let mut per_entry: Vec<CacheEntryStats> = entries
            .iter()
            .map(|(&id, entry)| CacheEntryStats {
                id,
                age: entry.cached_at.elapsed(),
                is_valid: self.is_valid(entry),
            })
            .collect();
        per_entry.sort_by_key(|e| e.id.index());
        CacheStats {
            size: entries.len(),
            entries: per_entry,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn set_ttl(&mut self, ttl: Duration) {
        self.ttl = ttl;
    }
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::production()
    }
}
