//! Typed services, one per remote resource

pub mod adventure_service;
pub mod artifact_service;
pub mod auth_service;
pub mod character_service;
pub mod health_service;
pub mod personality_service;
pub mod resource_service;

pub use adventure_service::AdventureService;
pub use artifact_service::ArtifactService;
pub use auth_service::AuthService;
pub use character_service::CharacterService;
pub use health_service::HealthService;
pub use personality_service::PersonalityService;
pub use resource_service::{Pagination, ResourceService};
