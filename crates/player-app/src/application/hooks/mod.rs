//! Data hooks - cached reads and mutation triggers per resource
//!
//! Hooks are built from a [`ClientContext`](crate::application::ClientContext)
//! and are cheap to clone. Reads are [`Query`](crate::application::query::Query)
//! handles; writes are async methods that update the cache on success.

pub mod adventure;
pub mod artifacts;
pub mod auth;
pub mod characters;
pub mod language;
pub mod personality;

pub use adventure::AdventureHook;
pub use artifacts::ArtifactsHook;
pub use auth::AuthHook;
pub use characters::CharactersHook;
pub use language::{LanguageError, LanguageHook, LanguageOption, SUPPORTED_LANGUAGES};
pub use personality::PersonalityHook;
