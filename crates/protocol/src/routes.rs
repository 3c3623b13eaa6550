//! API route table
//!
//! Every endpoint the client talks to, relative to the configured base URL.
//! Parameterised routes are functions so call sites can't misspell a segment.

use std::fmt::Display;

/// Namespace for the fixed route table.
pub struct ApiRoutes;

impl ApiRoutes {
    pub const HEALTH: &'static str = "/api/health";

    // Auth
    pub const AUTH_REGISTER: &'static str = "/api/auth/register";
    pub const AUTH_LOGIN: &'static str = "/api/auth/login";
    pub const AUTH_SOCIAL_LOGIN: &'static str = "/api/auth/social-login";
    pub const USER_PROFILE: &'static str = "/api/users/profile";

    // Characters
    pub const CHARACTERS: &'static str = "/api/characters";

    // Artifacts
    pub const ARTIFACTS: &'static str = "/api/artifacts";

    // Personality
    pub const PERSONALITY_QUESTIONS: &'static str = "/api/personality/questions";
    pub const PERSONALITY_RESULTS: &'static str = "/api/personality/results";

    // Adventure
    pub const ADVENTURE_STORY: &'static str = "/api/adventure/story";
    pub const ADVENTURE_PROGRESS: &'static str = "/api/adventure/progress";

    /// `{base}/{id}` for any collection route.
    pub fn detail(base: &str, id: impl Display) -> String {
        format!("{}/{}", base.trim_end_matches('/'), id)
    }

    pub fn character(id: impl Display) -> String {
        Self::detail(Self::CHARACTERS, id)
    }

    pub fn character_artifacts(character_id: impl Display) -> String {
        format!("{}/characters/{}/artifacts", Self::ARTIFACTS, character_id)
    }

    pub fn character_artifact(character_id: impl Display, artifact_id: impl Display) -> String {
        format!(
            "{}/{}",
            Self::character_artifacts(character_id),
            artifact_id
        )
    }
}
