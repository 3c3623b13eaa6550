//! Notifier Port - transient user-facing notifications (toasts)

/// Sink for short success/error messages shown to the user.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);

    fn error(&self, message: &str);
}
