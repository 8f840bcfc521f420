//! Memoization of fetched document bytes, keyed by source.
//!
//! The renderer takes the cache as an injected trait object so tests can
//! swap in [`NoopCache`] or a small [`BoundedCache`].

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Get/put store for fetched bytes.
pub trait FetchCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Vec<u8>>;
    fn put(&self, key: &str, bytes: Vec<u8>);
}

impl<T: FetchCache + ?Sized> FetchCache for Arc<T> {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, bytes: Vec<u8>) {
        (**self).put(key, bytes)
    }
}

/// Cache that never stores anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

impl NoopCache {
    pub fn new() -> Self {
        NoopCache
    }
}

impl FetchCache for NoopCache {
    fn get(&self, _key: &str) -> Option<Vec<u8>> {
        None
    }

    fn put(&self, _key: &str, _bytes: Vec<u8>) {}
}

/// Unbounded cache that lives as long as the process (or the renderer).
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FetchCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn put(&self, key: &str, bytes: Vec<u8>) {
        if let Ok(mut map) = self.entries.lock() {
            map.insert(key.to_string(), bytes);
        }
    }
}

/// Cache holding at most `capacity` entries; the oldest insertion is evicted first.
#[derive(Debug)]
pub struct BoundedCache {
    capacity: usize,
    inner: Mutex<BoundedInner>,
}

#[derive(Debug, Default)]
struct BoundedInner {
    order: VecDeque<String>,
    entries: HashMap<String, Vec<u8>>,
}

impl BoundedCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(BoundedInner::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|i| i.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FetchCache for BoundedCache {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.lock().ok()?.entries.get(key).cloned()
    }

    fn put(&self, key: &str, bytes: Vec<u8>) {
        if self.capacity == 0 {
            return;
        }
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        if inner.entries.insert(key.to_string(), bytes).is_some() {
            // Overwrite keeps the original insertion position
            return;
        }
        inner.order.push_back(key.to_string());
        while inner.order.len() > self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.entries.remove(&oldest);
            }
        }
    }
}
