//! Adventure hook - story steps and progress for one adventure

use uuid::Uuid;

use quirkverse_player_ports::outbound::ApiError;
use quirkverse_protocol::{CharacterProgressResponse, StoryStep};

use crate::application::context::ClientContext;
use crate::application::query::{stale, Mutation, Query, QueryKey};
use crate::application::services::AdventureService;

pub const ADVENTURE_STORY_KEY: &str = "adventure-story";
pub const ADVENTURE_PROGRESS_KEY: &str = "adventure-progress";

fn adventure_part(adventure_id: Option<Uuid>) -> String {
    adventure_id.map_or_else(|| "none".to_string(), |id| id.to_string())
}

pub fn story_key(adventure_id: Option<Uuid>) -> QueryKey {
    QueryKey::new(ADVENTURE_STORY_KEY).with(adventure_part(adventure_id))
}

pub fn progress_key(character_id: Uuid, adventure_id: Option<Uuid>) -> QueryKey {
    QueryKey::new(ADVENTURE_PROGRESS_KEY)
        .with(character_id)
        .with(adventure_part(adventure_id))
}

#[derive(Clone)]
pub struct AdventureHook {
    ctx: ClientContext,
    service: AdventureService,
    adventure_id: Option<Uuid>,
    save: Mutation,
}

impl AdventureHook {
    pub fn new(ctx: &ClientContext, adventure_id: Option<Uuid>) -> Self {
        Self {
            ctx: ctx.clone(),
            service: ctx.adventure_service(),
            adventure_id,
            save: Mutation::new(
                ctx.queries.clone(),
                ctx.notifier.clone(),
                "Error saving progress",
            )
            .with_success_message("Progress saved"),
        }
    }

    /// Story steps; disabled until an adventure is selected
    pub fn story(&self) -> Query<Vec<StoryStep>> {
        let service = self.service.clone();
        let adventure_id = self.adventure_id;
        let session = self.ctx.session.clone();

        Query::new(self.ctx.queries.clone(), story_key(adventure_id), move || {
            let service = service.clone();
            async move {
                match adventure_id {
                    Some(id) => service.get_story(id).await,
                    None => Ok(Vec::new()),
                }
            }
        })
        .stale_time(stale::STORY)
        .enabled_when(move || adventure_id.is_some() && session.is_authenticated())
    }

    /// Saved progress of a character; `None` until an adventure is selected
    pub fn progress(&self, character_id: Uuid) -> Option<Query<CharacterProgressResponse>> {
        let adventure_id = self.adventure_id?;
        let service = self.service.clone();

        let query = Query::new(
            self.ctx.queries.clone(),
            progress_key(character_id, Some(adventure_id)),
            move || {
                let service = service.clone();
                async move { service.get_progress(character_id, adventure_id).await }
            },
        )
        .stale_time(stale::PROGRESS)
        .enabled_when(self.ctx.auth_gate());
        Some(query)
    }

    pub async fn save_progress(
        &self,
        character_id: Uuid,
        current_step: u32,
        choices: Vec<u32>,
    ) -> Result<CharacterProgressResponse, ApiError> {
        let adventure_id = self.adventure_id;
        self.save
            .execute(
                &progress_key(character_id, adventure_id),
                self.service
                    .save_progress(character_id, adventure_id, current_step, choices),
                |cache, progress| {
                    cache.set_query_data(
                        progress_key(progress.character_id, adventure_id),
                        progress.clone(),
                    )
                },
            )
            .await
    }

    pub fn is_saving_progress(&self) -> bool {
        self.save.is_pending()
    }
}
