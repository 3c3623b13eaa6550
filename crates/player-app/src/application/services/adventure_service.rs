//! Adventure service - story steps and character progress

use uuid::Uuid;

use quirkverse_player_ports::outbound::{ApiError, ApiRequest};
use quirkverse_protocol::{ApiRoutes, CharacterProgressResponse, ProgressSubmit, StoryStep};

use crate::application::api::Api;

#[derive(Clone)]
pub struct AdventureService {
    api: Api,
}

impl AdventureService {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn get_story(&self, adventure_id: Uuid) -> Result<Vec<StoryStep>, ApiError> {
        self.api
            .send(ApiRequest::get(ApiRoutes::ADVENTURE_STORY).with_param("adventure_id", adventure_id))
            .await
    }

    pub async fn save_progress(
        &self,
        character_id: Uuid,
        adventure_id: Option<Uuid>,
        current_step: u32,
        choices: Vec<u32>,
    ) -> Result<CharacterProgressResponse, ApiError> {
        let body = ProgressSubmit {
            character_id,
            adventure_id,
            current_step,
            choices,
        };
        self.api
            .send(ApiRequest::post(ApiRoutes::ADVENTURE_PROGRESS).with_json(&body)?)
            .await
    }

    pub async fn get_progress(
        &self,
        character_id: Uuid,
        adventure_id: Uuid,
    ) -> Result<CharacterProgressResponse, ApiError> {
        let request = ApiRequest::get(ApiRoutes::ADVENTURE_PROGRESS)
            .with_param("character_id", character_id)
            .with_param("adventure_id", adventure_id);
        self.api.send(request).await
    }
}
