//! Desktop platform implementations

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use quirkverse_player_ports::outbound::{Notifier, SleepProvider};

/// Sleep provider backed by tokio timers
#[derive(Clone, Copy, Default)]
pub struct TokioSleepProvider;

impl SleepProvider for TokioSleepProvider {
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + Send + 'static>> {
        Box::pin(tokio::time::sleep(Duration::from_millis(ms)))
    }
}

/// Log target for notifications; sits under the binary's `quirkverse_player` filter
pub const NOTIFY_TARGET: &str = "quirkverse_player::notify";

/// Notifier for headless runs: notifications become log lines
#[derive(Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(target: NOTIFY_TARGET, "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: NOTIFY_TARGET, "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sleep_waits_for_requested_duration() {
        let started = tokio::time::Instant::now();

        TokioSleepProvider.sleep_ms(20).await;

        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
