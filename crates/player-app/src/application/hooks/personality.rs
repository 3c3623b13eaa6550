//! Personality hook - quiz questions per language and submitted results

use uuid::Uuid;

use quirkverse_player_ports::outbound::ApiError;
use quirkverse_protocol::{PersonalityQuestion, PersonalityTestResults};

use crate::application::context::ClientContext;
use crate::application::query::{stale, Mutation, Query, QueryClient, QueryKey};
use crate::application::services::PersonalityService;

pub const PERSONALITY_QUESTIONS_KEY: &str = "personality-questions";
pub const PERSONALITY_RESULTS_KEY: &str = "personality-results";

pub fn questions_key(language: &str) -> QueryKey {
    QueryKey::new(PERSONALITY_QUESTIONS_KEY).with(language)
}

pub fn results_key(user_id: Option<Uuid>, language: &str) -> QueryKey {
    let user = user_id.map_or_else(|| "anonymous".to_string(), |id| id.to_string());
    QueryKey::new(PERSONALITY_RESULTS_KEY)
        .with(user)
        .with(language)
}

#[derive(Clone)]
pub struct PersonalityHook {
    ctx: ClientContext,
    service: PersonalityService,
    user_id: Option<Uuid>,
    language: String,
    submit: Mutation,
}

impl PersonalityHook {
    pub fn new(ctx: &ClientContext, user_id: Option<Uuid>, language: &str) -> Self {
        Self {
            ctx: ctx.clone(),
            service: ctx.personality_service(),
            user_id,
            language: language.to_string(),
            submit: Mutation::new(
                ctx.queries.clone(),
                ctx.notifier.clone(),
                "Error submitting answers",
            )
            .with_success_message("Personality test completed"),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Questions are public: no token needed
    pub fn questions(&self) -> Query<Vec<PersonalityQuestion>> {
        let service = self.service.clone();
        let language = self.language.clone();
        Query::new(
            self.ctx.queries.clone(),
            questions_key(&self.language),
            move || {
                let service = service.clone();
                let language = language.clone();
                async move { service.get_questions(&language).await }
            },
        )
        .stale_time(stale::QUESTIONS)
    }

    /// Results of the last submission for this user and language.
    ///
    /// There is no endpoint to read stored results back, so the query only
    /// ever serves what `submit_answers` cached.
    pub fn results(&self) -> Query<Option<PersonalityTestResults>> {
        let key = results_key(self.user_id, &self.language);
        let cache: QueryClient = self.ctx.queries.clone();
        let lookup = key.clone();
        let has_user = self.user_id.is_some();
        let session = self.ctx.session.clone();

        Query::new(self.ctx.queries.clone(), key, move || {
            let cached = cache
                .get_query_data::<Option<PersonalityTestResults>>(&lookup)
                .flatten();
            async move { Ok(cached) }
        })
        .stale_time(stale::RESULTS)
        .enabled_when(move || has_user && session.is_authenticated())
    }

    pub async fn submit_answers(
        &self,
        user_id: Uuid,
        answers: Vec<i32>,
    ) -> Result<PersonalityTestResults, ApiError> {
        let key = results_key(Some(user_id), &self.language);
        self.submit
            .execute(
                &key,
                self.service.submit_answers(user_id, answers),
                |cache, results| cache.set_query_data(key.clone(), Some(*results)),
            )
            .await
    }

    pub fn is_submitting(&self) -> bool {
        self.submit.is_pending()
    }
}
