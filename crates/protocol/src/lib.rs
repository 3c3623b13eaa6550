//! Quirkverse Protocol - Shared wire types for the Player client
//!
//! This crate contains the types exchanged with the remote HTTP API:
//! - Wire-format records (users, characters, artifacts, quiz, adventure)
//! - Request payloads for create/update operations
//! - The fixed API route table
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, uuid, chrono, and serde_json
//! 2. **No business logic** - Pure data types and serialization
//! 3. **Field names match the server** - snake_case except where the API uses camelCase

pub mod adventure;
pub mod artifact;
pub mod character;
pub mod health;
pub mod personality;
pub mod routes;
pub mod user;

pub use adventure::{CharacterProgressResponse, ProgressSubmit, StoryStep};
pub use artifact::{Artifact, CharacterArtifactCreate, CharacterArtifactUpdate};
pub use character::{
    stat_level, stat_progress, Character, CharacterCreate, CharacterStats, CharacterUpdate,
    POINTS_PER_LEVEL,
};
pub use health::HealthStatus;
pub use personality::{
    PersonalityOption, PersonalityQuestion, PersonalityStats, PersonalityTestResults,
    PersonalityTestSubmit,
};
pub use routes::ApiRoutes;
pub use user::{LoginCredentials, SocialLoginData, User, UserCreate, UserUpdate, UserWithToken};
