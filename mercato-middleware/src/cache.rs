//! Time-to-live cache with stale reads.

use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use lru::LruCache;
use tokio::time::Instant;

/// Outcome of a fresh lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<V> {
    /// Entry younger than the TTL.
    Hit(V),
    /// Entry was present but expired; it has been evicted and its last value
    /// is handed back so the caller can still serve it as stale.
    Expired {
        /// Last stored value.
        value: V,
        /// Time since it was written.
        age: Duration,
    },
    /// No entry.
    Miss,
}

impl<V> Lookup<V> {
    /// Fresh value, if any.
    pub fn fresh(self) -> Option<V> {
        match self {
            Self::Hit(v) => Some(v),
            Self::Expired { .. } | Self::Miss => None,
        }
    }
}

struct Entry<V> {
    value: V,
    written_at: Instant,
}

/// Entries kept by [`TtlCache::new`].
pub const DEFAULT_CAPACITY: usize = 1024;

/// Capacity-bounded key/value store where each read supplies its own TTL.
///
/// Expired entries are evicted lazily by the read that observes them. When
/// the store is full, a write evicts the least recently used entry, expired
/// or not. All access goes through one `std::sync::Mutex` that is never held
/// across an `.await`.
pub struct TtlCache<V> {
    entries: Mutex<LruCache<String, Entry<V>>>,
}

impl<V> Default for TtlCache<V> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl<V> TtlCache<V> {
    /// Empty cache holding at most `capacity` entries (minimum one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(cap)),
        }
    }

    fn store(&self) -> MutexGuard<'_, LruCache<String, Entry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V: Clone> TtlCache<V> {
    /// Empty cache with [`DEFAULT_CAPACITY`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh read: the value if it was written less than `ttl` ago.
    ///
    /// An entry at or past its TTL is removed and `None` is returned.
    pub fn get(&self, key: &str, ttl: Duration) -> Option<V> {
        self.lookup(key, ttl).fresh()
    }

    /// Fresh read that also reports an expired entry's value.
    ///
    /// A hit marks the entry as recently used.
    pub fn lookup(&self, key: &str, ttl: Duration) -> Lookup<V> {
        let mut map = self.store();
        let fresh = match map.peek(key) {
            Some(entry) => entry.written_at.elapsed() < ttl,
            None => return Lookup::Miss,
        };
        if fresh {
            return map
                .get(key)
                .map_or(Lookup::Miss, |e| Lookup::Hit(e.value.clone()));
        }
        match map.pop(key) {
            Some(e) => Lookup::Expired {
                age: e.written_at.elapsed(),
                value: e.value,
            },
            None => Lookup::Miss,
        }
    }

    /// Insert or overwrite, stamping the current time.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.store().put(
            key.into(),
            Entry {
                value,
                written_at: Instant::now(),
            },
        );
    }

    /// Put back a value observed `age` ago, keeping its original write time.
    ///
    /// Does nothing if the key was written in the meantime.
    pub fn reinstate(&self, key: impl Into<String>, value: V, age: Duration) {
        let key = key.into();
        let mut map = self.store();
        if map.contains(key.as_str()) {
            return;
        }
        let now = Instant::now();
        map.put(
            key,
            Entry {
                value,
                written_at: now.checked_sub(age).unwrap_or(now),
            },
        );
    }

    /// Read ignoring the TTL. Never evicts and leaves recency untouched.
    pub fn get_stale(&self, key: &str) -> Option<V> {
        self.store().peek(key).map(|e| e.value.clone())
    }

    /// Age of the entry under `key`, if present.
    pub fn age(&self, key: &str) -> Option<Duration> {
        self.store().peek(key).map(|e| e.written_at.elapsed())
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.store().len()
    }

    /// Maximum number of stored entries.
    pub fn capacity(&self) -> usize {
        self.store().cap().get()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.store().clear();
    }
}
