//! Query cache shared by all data hooks.
//!
//! Entries are type-erased and keyed by [`QueryKey`]. Each entry remembers
//! when it was last written and whether it has been invalidated; a read is
//! served from cache while the entry is younger than the caller's stale time.
//!
//! Reads of the same key are deduplicated with a per-key async lock: while one
//! fetch is in flight, other callers wait for it and then take its result from
//! the cache. Mutations use a separate set of per-key locks.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use quirkverse_player_ports::outbound::ApiError;

use super::key::QueryKey;

struct CacheEntry {
    value: Arc<dyn Any + Send + Sync>,
    updated_at: Instant,
    invalidated: bool,
}

impl CacheEntry {
    fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            updated_at: Instant::now(),
            invalidated: false,
        }
    }

    fn is_fresh(&self, stale_time: Duration) -> bool {
        !self.invalidated && self.updated_at.elapsed() < stale_time
    }

    fn typed<T: Clone + 'static>(&self) -> Option<T> {
        self.value.downcast_ref::<T>().cloned()
    }
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<QueryKey, CacheEntry>,
    errors: HashMap<QueryKey, ApiError>,
    /// In-flight fetch count per key
    fetching: HashMap<QueryKey, usize>,
}

/// One async mutex per key, dropped once nobody holds or waits on it.
#[derive(Default)]
struct KeyedLocks {
    locks: Mutex<HashMap<QueryKey, Arc<AsyncMutex<()>>>>,
}

impl KeyedLocks {
    async fn acquire(&self, key: &QueryKey) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(key.clone()).or_default())
        };
        lock.lock_owned().await
    }
}

#[derive(Default)]
struct ClientInner {
    state: RwLock<CacheState>,
    fetch_locks: KeyedLocks,
    mutation_locks: KeyedLocks,
}

/// Cloneable handle to the shared query cache
#[derive(Clone, Default)]
pub struct QueryClient {
    inner: Arc<ClientInner>,
}

/// Marks a key as fetching for the lifetime of the guard
struct FetchingGuard<'a> {
    client: &'a QueryClient,
    key: QueryKey,
}

impl<'a> FetchingGuard<'a> {
    fn new(client: &'a QueryClient, key: &QueryKey) -> Self {
        *client.write().fetching.entry(key.clone()).or_insert(0) += 1;
        Self {
            client,
            key: key.clone(),
        }
    }
}

impl Drop for FetchingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.client.write();
        if let Some(count) = state.fetching.get_mut(&self.key) {
            *count -= 1;
            if *count == 0 {
                state.fetching.remove(&self.key);
            }
        }
    }
}

impl QueryClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, CacheState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn fresh_data<T: Clone + 'static>(&self, key: &QueryKey, stale_time: Duration) -> Option<T> {
        self.read()
            .entries
            .get(key)
            .filter(|entry| entry.is_fresh(stale_time))
            .and_then(CacheEntry::typed)
    }

    /// Return cached data if fresh, otherwise run `fetcher` and cache its result.
    ///
    /// Only one fetch per key runs at a time. A caller that waited on an
    /// in-flight fetch re-checks the cache before fetching itself.
    pub async fn fetch_query<T, F, Fut>(
        &self,
        key: &QueryKey,
        stale_time: Duration,
        fetcher: F,
    ) -> Result<T, ApiError>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if let Some(data) = self.fresh_data(key, stale_time) {
            return Ok(data);
        }

        let _lock = self.inner.fetch_locks.acquire(key).await;

        if let Some(data) = self.fresh_data(key, stale_time) {
            tracing::trace!(key = %key, "Query filled by concurrent fetch");
            return Ok(data);
        }

        let _fetching = FetchingGuard::new(self, key);
        tracing::debug!(key = %key, "Fetching query");

        match fetcher().await {
            Ok(data) => {
                self.set_query_data(key.clone(), data.clone());
                Ok(data)
            }
            Err(error) => {
                tracing::debug!(key = %key, error = %error, "Query fetch failed");
                self.write().errors.insert(key.clone(), error.clone());
                Err(error)
            }
        }
    }

    /// Cached data for `key`, fresh or not
    pub fn get_query_data<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        self.read().entries.get(key).and_then(CacheEntry::typed)
    }

    /// Replace the entry for `key` and mark it fresh
    pub fn set_query_data<T: Send + Sync + 'static>(&self, key: QueryKey, value: T) {
        let mut state = self.write();
        state.errors.remove(&key);
        state.entries.insert(key, CacheEntry::new(value));
    }

    /// Compute a new entry from the current one (if any) under one lock
    pub fn update_query_data<T, F>(&self, key: QueryKey, update: F) -> T
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce(Option<T>) -> T,
    {
        let mut state = self.write();
        let current = state.entries.get(&key).and_then(CacheEntry::typed);
        let next = update(current);
        state.errors.remove(&key);
        state.entries.insert(key, CacheEntry::new(next.clone()));
        next
    }

    /// Edit an entry in place if it exists. Returns false when absent.
    pub fn update_existing<T, F>(&self, key: &QueryKey, update: F) -> bool
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce(&mut T),
    {
        let mut state = self.write();
        let Some(mut current) = state.entries.get(key).and_then(CacheEntry::typed::<T>) else {
            return false;
        };
        update(&mut current);
        state.entries.insert(key.clone(), CacheEntry::new(current));
        true
    }

    /// Mark exactly `key` stale, leaving longer keys under it alone
    pub fn invalidate_query(&self, key: &QueryKey) -> bool {
        self.invalidate_where(|candidate| candidate == key) > 0
    }

    /// Mark every entry under `prefix` stale. Returns the number marked.
    pub fn invalidate_queries(&self, prefix: &QueryKey) -> usize {
        self.invalidate_where(|key| key.starts_with(prefix))
    }

    pub fn invalidate_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&QueryKey) -> bool,
    {
        let mut state = self.write();
        let mut count = 0;
        for (key, entry) in state.entries.iter_mut() {
            if predicate(key) {
                entry.invalidated = true;
                count += 1;
            }
        }
        if count > 0 {
            tracing::debug!(count, "Invalidated queries");
        }
        count
    }

    /// Drop every entry under `prefix`. Returns the number removed.
    pub fn remove_queries(&self, prefix: &QueryKey) -> usize {
        let mut state = self.write();
        let before = state.entries.len();
        state.entries.retain(|key, _| !key.starts_with(prefix));
        state.errors.retain(|key, _| !key.starts_with(prefix));
        before - state.entries.len()
    }

    pub fn clear(&self) {
        let mut state = self.write();
        state.entries.clear();
        state.errors.clear();
        tracing::debug!("Query cache cleared");
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.read().fetching.contains_key(key)
    }

    /// Error from the last failed fetch, cleared by the next successful write
    pub fn error(&self, key: &QueryKey) -> Option<ApiError> {
        self.read().errors.get(key).cloned()
    }

    pub fn is_stale(&self, key: &QueryKey, stale_time: Duration) -> bool {
        self.read()
            .entries
            .get(key)
            .map_or(true, |entry| !entry.is_fresh(stale_time))
    }

    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().entries.is_empty()
    }

    /// Serialize mutations against one entity key
    pub async fn lock_mutation(&self, key: &QueryKey) -> OwnedMutexGuard<()> {
        self.inner.mutation_locks.acquire(key).await
    }
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClient")
            .field("entries", &self.len())
            .finish()
    }
}
