//! Artifact service - catalogue and character equipment

use uuid::Uuid;

use quirkverse_player_ports::outbound::{ApiError, ApiRequest};
use quirkverse_protocol::{
    ApiRoutes, Artifact, Character, CharacterArtifactCreate, CharacterArtifactUpdate,
};

use super::resource_service::ResourceService;
use crate::application::api::Api;

#[derive(Clone)]
pub struct ArtifactService {
    resource: ResourceService<Artifact>,
}

impl ArtifactService {
    pub fn new(api: Api) -> Self {
        Self {
            resource: ResourceService::new(api, ApiRoutes::ARTIFACTS),
        }
    }

    pub async fn get_all_artifacts(&self) -> Result<Vec<Artifact>, ApiError> {
        self.resource.get_all(None).await
    }

    /// Equip an artifact; returns the updated character
    pub async fn add_artifact_to_character(
        &self,
        character_id: Uuid,
        artifact_id: Uuid,
    ) -> Result<Character, ApiError> {
        let request = ApiRequest::post(ApiRoutes::character_artifacts(character_id))
            .with_json(&CharacterArtifactCreate { artifact_id })?;
        self.resource.api().send(request).await
    }

    /// Toggle an equipped artifact; returns the updated character
    pub async fn update_character_artifact(
        &self,
        character_id: Uuid,
        artifact_id: Uuid,
        is_active: bool,
    ) -> Result<Character, ApiError> {
        let request = ApiRequest::put(ApiRoutes::character_artifact(character_id, artifact_id))
            .with_json(&CharacterArtifactUpdate { is_active })?;
        self.resource.api().send(request).await
    }
}
