//! Health check

use quirkverse_player_ports::outbound::{ApiError, ApiRequest};
use quirkverse_protocol::{ApiRoutes, HealthStatus};

use crate::application::api::Api;

#[derive(Clone)]
pub struct HealthService {
    api: Api,
}

impl HealthService {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn check(&self) -> Result<HealthStatus, ApiError> {
        self.api.send(ApiRequest::get(ApiRoutes::HEALTH)).await
    }
}
