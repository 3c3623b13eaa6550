//! Composition root: wires config, storage, transport, session and services

use std::sync::Arc;

use quirkverse_player_adapters::infrastructure::{
    ClientConfig, FileStorageProvider, ReqwestTransport, TokioSleepProvider, TracingNotifier,
};
use quirkverse_player_app::application::hooks::{AuthHook, LanguageHook};
use quirkverse_player_app::application::{ApiClient, AuthSession, ClientContext, RetryConfig};
use quirkverse_player_ports::outbound::StorageProvider;
use quirkverse_protocol::{HealthStatus, User};

/// `EnvFilter` directives used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "quirkverse_player=debug,quirkverse_player_app=debug";

/// Build the client context for `config`
pub fn build_context(config: &ClientConfig) -> ClientContext {
    let storage: Arc<dyn StorageProvider> = Arc::new(match &config.storage_path {
        Some(path) => FileStorageProvider::with_path(path),
        None => FileStorageProvider::new(),
    });
    let session = AuthSession::load(storage.clone());

    let retry = RetryConfig {
        max_attempts: config.max_attempts,
        base_delay_ms: config.retry_base_delay_ms,
        ..RetryConfig::default()
    };
    let client = ApiClient::new(
        Arc::new(ReqwestTransport::new(config.request_timeout)),
        session.clone(),
        Arc::new(TokioSleepProvider),
        &config.api_url,
        retry,
    );

    ClientContext::new(Arc::new(client), session, Arc::new(TracingNotifier), storage)
}

/// What start-up found out about the API and the stored session
#[derive(Debug, Clone, PartialEq)]
pub struct StartupReport {
    pub health: Option<HealthStatus>,
    pub language: String,
    pub profile: Option<User>,
    /// Answers saved from an unfinished personality quiz
    pub quiz_answers: usize,
}

/// Check the API and the stored session. Failures are logged, not returned.
pub async fn startup(ctx: &ClientContext) -> StartupReport {
    let health = match ctx.health_service().check().await {
        Ok(status) => {
            if status.is_ok() {
                tracing::info!(database = ?status.database, "API is healthy");
            } else {
                tracing::warn!(status = %status.status, message = ?status.message, "API reports a problem");
            }
            Some(status)
        }
        Err(e) => {
            tracing::error!(error = %e, "API health check failed");
            None
        }
    };

    let language = LanguageHook::load(ctx).current_language_code();

    let quiz = ctx.personality_progress().snapshot();
    if !quiz.answers.is_empty() && !quiz.is_test_completed {
        tracing::info!(answered = quiz.answers.len(), "Personality quiz in progress");
    }

    let auth = AuthHook::new(ctx);
    let profile = if auth.is_authenticated() {
        match auth.profile().fetch().await {
            Ok(profile) => {
                if let Some(user) = &profile {
                    tracing::info!(user_id = %user.id, name = %user.name, "Restored session");
                }
                profile
            }
            Err(e) if e.is_unauthorized() => {
                tracing::warn!("Stored token was rejected; signing out");
                auth.logout();
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load profile");
                None
            }
        }
    } else {
        tracing::info!("No stored session");
        None
    };

    StartupReport {
        health,
        language,
        profile,
        quiz_answers: if quiz.is_test_completed { 0 } else { quiz.answers.len() },
    }
}
