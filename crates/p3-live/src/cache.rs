//! Expiring key-value cache for embed markup.

use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::clock::{Clock, SystemClock};

/// Shared string cache with per-entry expiry.
///
/// Concurrent writers may race; the last write wins.
pub trait EmbedCache: Send + Sync {
    /// Value for `key`, unless absent or expired.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: String, ttl: Duration);
}

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-process [`EmbedCache`] backed by a sharded concurrent map.
#[derive(Debug)]
pub struct MemoryCache<C: Clock = SystemClock> {
    entries: DashMap<String, Entry>,
    clock: C,
}

impl MemoryCache<SystemClock> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl Default for MemoryCache<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryCache<C> {
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// Number of stored entries, expired ones included until next read.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C: Clock> EmbedCache for MemoryCache<C> {
    fn get(&self, key: &str) -> Option<String> {
        let now = self.clock.now();
        // The read guard must be released before removing.
        let expired = match self.entries.get(key) {
            Some(entry) if entry.expires_at > now => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
        }
        None
    }

    fn set(&self, key: &str, value: String, ttl: Duration) {
        let Some(expires_at) = self.clock.now().checked_add(ttl) else {
            tracing::warn!(key, ?ttl, "cache ttl out of range; entry not stored");
            return;
        };
        self.entries
            .insert(key.to_string(), Entry { value, expires_at });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockClock;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn returns_value_within_ttl() {
        let clock = MockClock::new(Instant::now());
        let cache = MemoryCache::with_clock(clock.clone());
        cache.set("k", "v".into(), HOUR);

        clock.advance(HOUR - Duration::from_secs(1));
        assert_eq!(cache.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn expired_entries_are_dropped_on_read() {
        let clock = MockClock::new(Instant::now());
        let cache = MemoryCache::with_clock(clock.clone());
        cache.set("k", "v".into(), HOUR);

        clock.advance(HOUR);
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn last_write_wins() {
        let cache = MemoryCache::new();
        cache.set("k", "first".into(), HOUR);
        cache.set("k", "second".into(), HOUR);
        assert_eq!(cache.get("k").as_deref(), Some("second"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn unrepresentable_expiry_is_not_stored() {
        let cache = MemoryCache::new();
        cache.set("k", "v".into(), Duration::MAX);
        assert!(cache.is_empty());
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn missing_key_is_none() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("absent"), None);
    }
}
