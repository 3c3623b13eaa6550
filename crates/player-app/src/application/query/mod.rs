//! Client-side query cache, read handles and mutations

mod cache;
mod handle;
mod key;
mod mutation;

pub use cache::QueryClient;
pub use handle::{Query, QueryState};
pub use key::QueryKey;
pub use mutation::Mutation;

use std::time::Duration;

/// Stale times for the cached resources
pub mod stale {
    use super::Duration;

    pub const CHARACTERS: Duration = Duration::from_secs(5 * 60);
    pub const ARTIFACTS: Duration = Duration::from_secs(10 * 60);
    pub const QUESTIONS: Duration = Duration::from_secs(24 * 60 * 60);
    pub const RESULTS: Duration = Duration::from_secs(10 * 60);
    pub const STORY: Duration = Duration::from_secs(30 * 60);
    pub const PROFILE: Duration = Duration::from_secs(5 * 60);
    pub const PROGRESS: Duration = Duration::ZERO;
}
