// src/dashboard/cache.rs
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Keyed read cache with a fixed time-to-live. Failed loads are not cached.
/// `now` is passed in so callers (and tests) own the clock.
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    entries: HashMap<String, (Instant, T)>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: HashMap::new() }
    }

    pub fn ttl(&self) -> Duration { self.ttl }

    /// Fresh value for `key`, if any.
    pub fn get(&self, key: &str, now: Instant) -> Option<&T> {
        self.entries
            .get(key)
            .filter(|(at, _)| now.saturating_duration_since(*at) < self.ttl)
            .map(|(_, v)| v)
    }

    pub fn put(&mut self, key: &str, now: Instant, value: T) {
        self.entries.insert(s!(key), (now, value));
    }

    /// Cached value, or run `load` and cache its success.
    pub fn get_or_try_load<E, F>(&mut self, key: &str, now: Instant, load: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(v) = self.get(key, now) {
            return Ok(v.clone());
        }
        let v = load()?;
        self.put(key, now, v.clone());
        Ok(v)
    }

    pub fn invalidate(&mut self, key: &str) {
        self.entries.remove(key);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
