//! Character service - the signed-in user's characters

use uuid::Uuid;

use quirkverse_player_ports::outbound::ApiError;
use quirkverse_protocol::{ApiRoutes, Character, CharacterCreate, CharacterUpdate};

use super::resource_service::{Pagination, ResourceService};
use crate::application::api::Api;

#[derive(Clone)]
pub struct CharacterService {
    resource: ResourceService<Character>,
}

impl CharacterService {
    pub fn new(api: Api) -> Self {
        Self {
            resource: ResourceService::new(api, ApiRoutes::CHARACTERS),
        }
    }

    /// The server scopes the list to the token's user
    pub async fn get_user_characters(&self) -> Result<Vec<Character>, ApiError> {
        self.resource.get_all(None).await
    }

    pub async fn get_user_characters_page(
        &self,
        pagination: Pagination,
    ) -> Result<Vec<Character>, ApiError> {
        self.resource.get_all(Some(pagination)).await
    }

    pub async fn get_character(&self, id: Uuid) -> Result<Character, ApiError> {
        self.resource.get_by_id(id).await
    }

    pub async fn create_character(&self, data: &CharacterCreate) -> Result<Character, ApiError> {
        self.resource.create(data).await
    }

    pub async fn update_character(
        &self,
        id: Uuid,
        data: &CharacterUpdate,
    ) -> Result<Character, ApiError> {
        self.resource.update(id, data).await
    }

    pub async fn delete_character(&self, id: Uuid) -> Result<(), ApiError> {
        self.resource.delete(id).await
    }
}
