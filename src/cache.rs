//! In-memory TTL cache for provider responses.
//!
//! Entries are keyed by (provider, endpoint, params) and served for
//! [`DEFAULT_TTL`] after insertion. Values are shared as `Arc` snapshots,
//! so a cached payload is never mutated in place. Time is read through the
//! [`Clock`] trait, which lets tests drive expiry deterministically.

use crate::api::Provider;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// How long a cached response stays fresh.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// The real clock used outside of tests.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Identity of one upstream request. Params are part of the key, so the
/// same endpoint queried with different parameters caches independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub provider: Provider,
    pub endpoint: String,
    pub params: Vec<(String, String)>,
}

impl CacheKey {
    pub fn new(provider: Provider, endpoint: &str, params: &[(String, String)]) -> Self {
        Self {
            provider,
            endpoint: endpoint.to_string(),
            params: params.to_vec(),
        }
    }
}

struct Entry {
    value: Arc<Value>,
    inserted_at: Instant,
}

pub struct TtlCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<CacheKey, Entry>>,
}

impl TtlCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fresh value for `key`, if any. An entry that has aged past the TTL
    /// is dropped on access.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<Value>> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if now.duration_since(entry.inserted_at) < self.ttl => {
                Some(Arc::clone(&entry.value))
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store `value` under `key`, replacing any previous entry and
    /// restarting its TTL window.
    pub fn put(&self, key: CacheKey, value: Arc<Value>) {
        let entry = Entry {
            value,
            inserted_at: self.clock.now(),
        };
        self.entries.lock().unwrap().insert(key, entry);
    }

    /// Drop every entry past its TTL.
    pub fn purge_expired(&self) {
        let now = self.clock.now();
        self.entries
            .lock()
            .unwrap()
            .retain(|_, entry| now.duration_since(entry.inserted_at) < self.ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}
