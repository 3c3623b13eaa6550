//! Application layer - Session, API dispatch, services and data hooks

pub mod api;
pub mod context;
pub mod hooks;
pub mod query;
pub mod retry;
pub mod services;
pub mod session;
pub mod stores;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export common types
pub use api::{Api, ApiClient};
pub use context::ClientContext;
pub use retry::RetryConfig;
pub use session::AuthSession;
