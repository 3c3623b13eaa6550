//! Write trigger with pending state and notification on outcome.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use quirkverse_player_ports::outbound::{ApiError, Notifier};

use super::cache::QueryClient;
use super::key::QueryKey;

struct PendingGuard(Arc<AtomicUsize>);

impl PendingGuard {
    fn new(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A mutation runs one operation at a time per entity key.
///
/// On success `on_success` updates the cache and the success message (if any)
/// is sent to the notifier. On failure the error is logged, its message is
/// sent to the notifier after the failure message, and the error is
/// returned to the caller.
#[derive(Clone)]
pub struct Mutation {
    client: QueryClient,
    notifier: Arc<dyn Notifier>,
    pending: Arc<AtomicUsize>,
    success_message: Option<&'static str>,
    failure_message: &'static str,
}

impl Mutation {
    pub fn new(
        client: QueryClient,
        notifier: Arc<dyn Notifier>,
        failure_message: &'static str,
    ) -> Self {
        Self {
            client,
            notifier,
            pending: Arc::new(AtomicUsize::new(0)),
            success_message: None,
            failure_message,
        }
    }

    pub fn with_success_message(mut self, message: &'static str) -> Self {
        self.success_message = Some(message);
        self
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }

    pub async fn execute<T, Fut, S>(
        &self,
        lock_key: &QueryKey,
        operation: Fut,
        on_success: S,
    ) -> Result<T, ApiError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
        S: FnOnce(&QueryClient, &T),
    {
        let _pending = PendingGuard::new(&self.pending);
        let _lock = self.client.lock_mutation(lock_key).await;

        match operation.await {
            Ok(value) => {
                on_success(&self.client, &value);
                if let Some(message) = self.success_message {
                    self.notifier.success(message);
                }
                Ok(value)
            }
            Err(error) => {
                tracing::error!(key = %lock_key, error = %error, "{}", self.failure_message);
                let message = error.message();
                if message.is_empty() {
                    self.notifier.error(self.failure_message);
                } else {
                    self.notifier
                        .error(&format!("{}: {}", self.failure_message, message));
                }
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quirkverse_player_ports::outbound::MockNotifier;

    #[tokio::test]
    async fn success_updates_cache_and_notifies() {
        let client = QueryClient::new();
        let mut notifier = MockNotifier::new();
        notifier
            .expect_success()
            .withf(|msg| msg == "Character created")
            .times(1)
            .return_const(());
        notifier.expect_error().never();

        let mutation = Mutation::new(client.clone(), Arc::new(notifier), "Error creating character")
            .with_success_message("Character created");
        let key = QueryKey::new("characters");

        let value = mutation
            .execute(&key, async { Ok(7) }, |cache, v| {
                cache.set_query_data(QueryKey::new("characters"), *v)
            })
            .await
            .expect("succeeds");

        assert_eq!(value, 7);
        assert_eq!(client.get_query_data::<i32>(&key), Some(7));
        assert!(!mutation.is_pending());
    }

    #[tokio::test]
    async fn failure_notifies_with_server_message() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_error()
            .withf(|msg| msg == "Error updating: Name already taken")
            .times(1)
            .return_const(());

        let mutation = Mutation::new(QueryClient::new(), Arc::new(notifier), "Error updating");

        let error = mutation
            .execute(
                &QueryKey::new("user"),
                async { Err::<(), _>(ApiError::from_status(400, r#"{"detail":"Name already taken"}"#)) },
                |_, _| panic!("must not run on failure"),
            )
            .await
            .expect_err("fails");

        assert_eq!(error.status(), Some(400));
    }

    #[tokio::test]
    async fn failure_without_message_uses_fallback() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_error()
            .withf(|msg| msg == "Error deleting character")
            .times(1)
            .return_const(());

        let mutation = Mutation::new(
            QueryClient::new(),
            Arc::new(notifier),
            "Error deleting character",
        );

        let result = mutation
            .execute(
                &QueryKey::new("characters"),
                async { Err::<(), _>(ApiError::Network(String::new())) },
                |_, _| {},
            )
            .await;

        assert!(result.is_err());
    }
}
