//! Infrastructure layer - External adapters

pub mod config;
pub mod http;
pub mod platform;
pub mod storage;

pub use config::{ClientConfig, ConfigError};
pub use http::ReqwestTransport;
pub use platform::{TokioSleepProvider, TracingNotifier, NOTIFY_TARGET};
pub use storage::{FileStorageProvider, MemoryStorageProvider};
