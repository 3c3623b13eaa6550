//! Personality quiz service

use uuid::Uuid;

use quirkverse_player_ports::outbound::{ApiError, ApiRequest};
use quirkverse_protocol::{
    ApiRoutes, PersonalityQuestion, PersonalityTestResults, PersonalityTestSubmit,
};

use crate::application::api::Api;

#[derive(Clone)]
pub struct PersonalityService {
    api: Api,
}

impl PersonalityService {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    /// Quiz questions in the given language (`en`, `es`)
    pub async fn get_questions(&self, lang: &str) -> Result<Vec<PersonalityQuestion>, ApiError> {
        self.api
            .send(ApiRequest::get(ApiRoutes::PERSONALITY_QUESTIONS).with_param("lang", lang))
            .await
    }

    /// Submit the chosen option index per question
    pub async fn submit_answers(
        &self,
        user_id: Uuid,
        answers: Vec<i32>,
    ) -> Result<PersonalityTestResults, ApiError> {
        let body = PersonalityTestSubmit { user_id, answers };
        self.api
            .send(ApiRequest::post(ApiRoutes::PERSONALITY_RESULTS).with_json(&body)?)
            .await
    }
}
