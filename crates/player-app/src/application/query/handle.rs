//! Read handle bound to one cache key.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{BoxFuture, FutureExt};

use quirkverse_player_ports::outbound::ApiError;

use super::cache::QueryClient;
use super::key::QueryKey;

type Fetcher<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>;
type Enabled = Arc<dyn Fn() -> bool + Send + Sync>;

/// Snapshot of a query as a UI would render it
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    /// No data yet and a fetch is in flight
    pub is_loading: bool,
    pub is_fetching: bool,
    pub error: Option<ApiError>,
}

/// A cached read: key, stale time, `enabled` gate and fetcher.
///
/// A disabled query never touches the network; `fetch` then returns whatever
/// is cached.
#[derive(Clone)]
pub struct Query<T> {
    client: QueryClient,
    key: QueryKey,
    stale_time: Duration,
    enabled: Enabled,
    fetcher: Fetcher<T>,
}

impl<T> Query<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new<F, Fut>(client: QueryClient, key: QueryKey, fetcher: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        Self {
            client,
            key,
            stale_time: Duration::ZERO,
            enabled: Arc::new(|| true),
            fetcher: Arc::new(move || fetcher().boxed()),
        }
    }

    pub fn stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }

    pub fn enabled_when<P>(mut self, predicate: P) -> Self
    where
        P: Fn() -> bool + Send + Sync + 'static,
    {
        self.enabled = Arc::new(predicate);
        self
    }

    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    pub fn is_enabled(&self) -> bool {
        (self.enabled)()
    }

    /// Cached data, without fetching
    pub fn data(&self) -> Option<T> {
        self.client.get_query_data(&self.key)
    }

    pub fn state(&self) -> QueryState<T> {
        let data = self.data();
        let is_fetching = self.client.is_fetching(&self.key);
        QueryState {
            is_loading: data.is_none() && is_fetching,
            is_fetching,
            error: self.client.error(&self.key),
            data,
        }
    }

    /// Serve from cache while fresh, otherwise fetch.
    pub async fn fetch(&self) -> Result<Option<T>, ApiError> {
        if !self.is_enabled() {
            tracing::trace!(key = %self.key, "Query disabled, serving cache only");
            return Ok(self.data());
        }

        let fetcher = Arc::clone(&self.fetcher);
        self.client
            .fetch_query(&self.key, self.stale_time, move || fetcher())
            .await
            .map(Some)
    }

    /// Fetch regardless of freshness
    pub async fn refetch(&self) -> Result<Option<T>, ApiError> {
        if self.is_enabled() {
            self.client.invalidate_query(&self.key);
        }
        self.fetch().await
    }
}

impl<T> Query<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    /// Cached data or `T::default()` (empty list, empty record)
    pub fn data_or_default(&self) -> T {
        self.data().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    fn counting_query(client: &QueryClient, calls: &Arc<AtomicUsize>) -> Query<Vec<String>> {
        let calls = Arc::clone(calls);
        Query::new(client.clone(), QueryKey::new("artifacts"), move || {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec!["Rubber Duck".to_string()])
            }
        })
        .stale_time(Duration::from_secs(600))
    }

    #[tokio::test]
    async fn refetch_leaves_nested_keys_fresh() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let detail = QueryKey::new("artifacts").with("rubber-duck");
        client.set_query_data(detail.clone(), "Rubber Duck".to_string());
        let query = counting_query(&client, &calls);

        query.fetch().await.expect("first");
        query.refetch().await.expect("refetch");

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!client.is_stale(&detail, Duration::from_secs(600)));
        assert!(!client.is_stale(query.key(), Duration::from_secs(600)));
    }

    #[tokio::test]
    async fn disabled_query_does_not_fetch() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let enabled = Arc::new(AtomicBool::new(false));
        let gate = Arc::clone(&enabled);

        let query = counting_query(&client, &calls)
            .enabled_when(move || gate.load(Ordering::SeqCst));

        assert_eq!(query.fetch().await.expect("no error"), None);
        assert_eq!(query.data_or_default(), Vec::<String>::new());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        enabled.store(true, Ordering::SeqCst);
        let data = query.fetch().await.expect("fetches");

        assert_eq!(data, Some(vec!["Rubber Duck".to_string()]));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn refetch_bypasses_freshness() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let query = counting_query(&client, &calls);

        query.fetch().await.expect("first");
        query.fetch().await.expect("cached");
        query.refetch().await.expect("forced");

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn state_reports_error() {
        let client = QueryClient::new();
        let query: Query<Vec<String>> =
            Query::new(client, QueryKey::new("characters"), || async {
                Err(ApiError::from_status(401, r#"{"detail":"Not authenticated"}"#))
            });

        assert!(query.fetch().await.is_err());

        let state = query.state();
        assert_eq!(state.data, None);
        assert!(!state.is_loading);
        assert!(!state.is_fetching);
        assert_eq!(
            state.error.map(|e| e.message()),
            Some("Not authenticated".to_string())
        );
    }
}
