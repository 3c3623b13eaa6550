//! Artifacts hook - catalogue query and equip/toggle triggers
//!
//! Equipping returns the updated character: its detail entry is replaced and
//! the whole `characters` bucket is invalidated.

use uuid::Uuid;

use quirkverse_player_ports::outbound::ApiError;
use quirkverse_protocol::{Artifact, Character};

use super::characters::{character_key, characters_key};
use crate::application::context::ClientContext;
use crate::application::query::{stale, Mutation, Query, QueryClient, QueryKey};
use crate::application::services::ArtifactService;

pub const ARTIFACTS_KEY: &str = "artifacts";

#[derive(Clone)]
pub struct ArtifactsHook {
    ctx: ClientContext,
    service: ArtifactService,
    add: Mutation,
    update: Mutation,
}

fn merge_character(cache: &QueryClient, character: &Character) {
    cache.set_query_data(character_key(character.id), character.clone());
    cache.invalidate_queries(&characters_key());
}

impl ArtifactsHook {
    pub fn new(ctx: &ClientContext) -> Self {
        let mutation = |failure: &'static str| {
            Mutation::new(ctx.queries.clone(), ctx.notifier.clone(), failure)
        };
        Self {
            ctx: ctx.clone(),
            service: ctx.artifact_service(),
            add: mutation("Error adding artifact").with_success_message("Artifact added"),
            update: mutation("Error updating artifact").with_success_message("Artifact updated"),
        }
    }

    pub fn artifacts(&self) -> Query<Vec<Artifact>> {
        let service = self.service.clone();
        Query::new(self.ctx.queries.clone(), QueryKey::new(ARTIFACTS_KEY), move || {
            let service = service.clone();
            async move { service.get_all_artifacts().await }
        })
        .stale_time(stale::ARTIFACTS)
        .enabled_when(self.ctx.auth_gate())
    }

    pub async fn add_artifact_to_character(
        &self,
        character_id: Uuid,
        artifact_id: Uuid,
    ) -> Result<Character, ApiError> {
        self.add
            .execute(
                &character_key(character_id),
                self.service
                    .add_artifact_to_character(character_id, artifact_id),
                merge_character,
            )
            .await
    }

    pub async fn update_character_artifact(
        &self,
        character_id: Uuid,
        artifact_id: Uuid,
        is_active: bool,
    ) -> Result<Character, ApiError> {
        self.update
            .execute(
                &character_key(character_id),
                self.service
                    .update_character_artifact(character_id, artifact_id, is_active),
                merge_character,
            )
            .await
    }

    pub fn is_adding_artifact(&self) -> bool {
        self.add.is_pending()
    }

    pub fn is_updating_artifact(&self) -> bool {
        self.update.is_pending()
    }
}
