//! Client context - everything a hook needs, created once at start-up

use std::sync::Arc;

use quirkverse_player_ports::outbound::{ApiPort, Notifier, StorageProvider};

use super::api::Api;
use super::query::QueryClient;
use super::services::{
    AdventureService, ArtifactService, AuthService, CharacterService, HealthService,
    PersonalityService,
};
use super::session::AuthSession;
use super::stores::PersonalityProgressStore;

/// Shared handles for services and hooks. Cloning is cheap.
#[derive(Clone)]
pub struct ClientContext {
    pub api: Api,
    pub session: AuthSession,
    pub queries: QueryClient,
    pub notifier: Arc<dyn Notifier>,
    pub storage: Arc<dyn StorageProvider>,
}

impl ClientContext {
    pub fn new(
        api: Arc<dyn ApiPort>,
        session: AuthSession,
        notifier: Arc<dyn Notifier>,
        storage: Arc<dyn StorageProvider>,
    ) -> Self {
        Self {
            api: Api::new(api),
            session,
            queries: QueryClient::new(),
            notifier,
            storage,
        }
    }

    pub fn auth_service(&self) -> AuthService {
        AuthService::new(self.api.clone(), self.session.clone())
    }

    pub fn character_service(&self) -> CharacterService {
        CharacterService::new(self.api.clone())
    }

    pub fn artifact_service(&self) -> ArtifactService {
        ArtifactService::new(self.api.clone())
    }

    pub fn personality_service(&self) -> PersonalityService {
        PersonalityService::new(self.api.clone())
    }

    pub fn adventure_service(&self) -> AdventureService {
        AdventureService::new(self.api.clone())
    }

    pub fn health_service(&self) -> HealthService {
        HealthService::new(self.api.clone())
    }

    /// Quiz progress, restored from storage
    pub fn personality_progress(&self) -> PersonalityProgressStore {
        PersonalityProgressStore::load(self.storage.clone())
    }

    /// `enabled` predicate for queries that need a signed-in user
    pub fn auth_gate(&self) -> impl Fn() -> bool + Send + Sync + 'static {
        let session = self.session.clone();
        move || session.is_authenticated()
    }
}
