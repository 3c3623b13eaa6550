//! Platform abstraction ports
//!
//! These traits abstract platform-specific operations so that:
//! 1. Application code remains platform-agnostic
//! 2. Platform-specific code is isolated in adapters
//! 3. Code becomes easily testable with in-memory implementations

use std::{future::Future, pin::Pin};

/// Async sleep abstraction
///
/// Used by the retry wrapper so backoff delays can be skipped in tests.
pub trait SleepProvider: Send + Sync {
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + Send + 'static>>;
}

/// Persistent key-value storage abstraction (browser storage / file-based)
///
/// Single-key writes are atomic; nothing more is promised.
pub trait StorageProvider: Send + Sync {
    /// Save a string value with the given key
    fn save(&self, key: &str, value: &str);

    /// Load a string value by key, returns None if not found
    fn load(&self, key: &str) -> Option<String>;

    /// Remove a value by key
    fn remove(&self, key: &str);
}

/// Storage key constants
///
/// These are kept in the ports layer as they define the contract for
/// what keys are used across the application.
pub mod storage_keys {
    pub const AUTH_TOKEN: &str = "auth_token";
    pub const AUTH_USER: &str = "auth_user";
    pub const LANGUAGE: &str = "language";
    pub const PERSONALITY_PROGRESS: &str = "personality-progress";
}
