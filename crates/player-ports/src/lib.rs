//! Player port definitions.
//!
//! The application layer depends only on these traits; concrete adapters
//! (reqwest, file storage, tokio timers) live in `quirkverse-player-adapters`.

pub mod outbound;
