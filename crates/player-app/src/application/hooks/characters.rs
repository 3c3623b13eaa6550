//! Characters hook - list/detail queries and create/update/delete triggers
//!
//! Mutations merge the returned entity into the cached list and detail
//! entries instead of refetching. The list is only edited when it is cached.

use uuid::Uuid;

use quirkverse_player_ports::outbound::ApiError;
use quirkverse_protocol::{Character, CharacterCreate, CharacterUpdate};

use crate::application::context::ClientContext;
use crate::application::query::{stale, Mutation, Query, QueryKey};
use crate::application::services::CharacterService;

pub const CHARACTERS_KEY: &str = "characters";

pub fn characters_key() -> QueryKey {
    QueryKey::new(CHARACTERS_KEY)
}

pub fn character_key(id: Uuid) -> QueryKey {
    characters_key().with(id)
}

#[derive(Clone)]
pub struct CharactersHook {
    ctx: ClientContext,
    service: CharacterService,
    create: Mutation,
    update: Mutation,
    delete: Mutation,
}

impl CharactersHook {
    pub fn new(ctx: &ClientContext) -> Self {
        let mutation = |failure: &'static str| {
            Mutation::new(ctx.queries.clone(), ctx.notifier.clone(), failure)
        };
        Self {
            ctx: ctx.clone(),
            service: ctx.character_service(),
            create: mutation("Error creating character").with_success_message("Character created"),
            update: mutation("Error updating character").with_success_message("Character updated"),
            delete: mutation("Error deleting character").with_success_message("Character deleted"),
        }
    }

    /// The signed-in user's characters
    pub fn characters(&self) -> Query<Vec<Character>> {
        let service = self.service.clone();
        Query::new(self.ctx.queries.clone(), characters_key(), move || {
            let service = service.clone();
            async move { service.get_user_characters().await }
        })
        .stale_time(stale::CHARACTERS)
        .enabled_when(self.ctx.auth_gate())
    }

    pub fn character(&self, id: Uuid) -> Query<Character> {
        let service = self.service.clone();
        Query::new(self.ctx.queries.clone(), character_key(id), move || {
            let service = service.clone();
            async move { service.get_character(id).await }
        })
        .stale_time(stale::CHARACTERS)
        .enabled_when(self.ctx.auth_gate())
    }

    pub async fn create_character(&self, data: &CharacterCreate) -> Result<Character, ApiError> {
        self.create
            .execute(
                &characters_key(),
                self.service.create_character(data),
                |cache, created| {
                    cache.update_existing(&characters_key(), |list: &mut Vec<Character>| {
                        list.push(created.clone())
                    });
                },
            )
            .await
    }

    pub async fn update_character(
        &self,
        id: Uuid,
        data: &CharacterUpdate,
    ) -> Result<Character, ApiError> {
        self.update
            .execute(
                &character_key(id),
                self.service.update_character(id, data),
                |cache, updated| {
                    cache.set_query_data(character_key(updated.id), updated.clone());
                    cache.update_existing(&characters_key(), |list: &mut Vec<Character>| {
                        for character in list.iter_mut().filter(|c| c.id == updated.id) {
                            *character = updated.clone();
                        }
                    });
                },
            )
            .await
    }

    pub async fn delete_character(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete
            .execute(
                &character_key(id),
                self.service.delete_character(id),
                |cache, _| {
                    cache.update_existing(&characters_key(), |list: &mut Vec<Character>| {
                        list.retain(|c| c.id != id)
                    });
                    cache.remove_queries(&character_key(id));
                },
            )
            .await
    }

    pub fn is_creating(&self) -> bool {
        self.create.is_pending()
    }

    pub fn is_updating(&self) -> bool {
        self.update.is_pending()
    }

    pub fn is_deleting(&self) -> bool {
        self.delete.is_pending()
    }
}
