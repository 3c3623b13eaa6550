//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing application services to interact with external systems without
//! depending on concrete implementations.

pub mod api_port;
pub mod http_transport;
pub mod notifier;
pub mod platform;

pub use api_port::{ApiError, ApiPort, ApiRequest, HttpMethod, RequestBody};
pub use http_transport::{HttpRequest, HttpResponse, HttpTransport};
pub use notifier::Notifier;
pub use platform::{storage_keys, SleepProvider, StorageProvider};

#[cfg(any(test, feature = "testing"))]
pub use api_port::MockApiPort;
#[cfg(any(test, feature = "testing"))]
pub use http_transport::MockHttpTransport;
#[cfg(any(test, feature = "testing"))]
pub use notifier::MockNotifier;
