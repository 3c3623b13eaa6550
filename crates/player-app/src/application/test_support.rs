//! Fixtures shared by the application-layer tests

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use quirkverse_player_adapters::infrastructure::storage::MemoryStorageProvider;
use quirkverse_player_ports::outbound::{MockApiPort, Notifier, SleepProvider};
use quirkverse_protocol::{Artifact, Character, CharacterStats, User, UserWithToken};

use super::context::ClientContext;
use super::session::AuthSession;

pub(crate) const USER_ID: Uuid = Uuid::from_u128(0x123);
pub(crate) const CHARACTER_ID: Uuid = Uuid::from_u128(0x456);
pub(crate) const ARTIFACT_ID: Uuid = Uuid::from_u128(0x789);

fn timestamp() -> DateTime<Utc> {
    "2024-01-01T00:00:00Z"
        .parse()
        .expect("valid timestamp")
}

pub(crate) fn mock_user() -> User {
    User {
        id: USER_ID,
        name: "Test User".into(),
        email: "test@example.com".into(),
        image_url: None,
        provider: None,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub(crate) fn mock_user_with_token(token: &str) -> UserWithToken {
    UserWithToken::new(mock_user(), token)
}

pub(crate) fn mock_character() -> Character {
    Character {
        id: CHARACTER_ID,
        name: "Zortblob".into(),
        character_class: "Quantum Waiter".into(),
        image_url: Some("/images/zortblob.webp".into()),
        stats: CharacterStats {
            quantum_charisma: 85,
            absurdity_resistance: 70,
            sarcasm_level: 92,
            time_warping: 60,
            cosmic_luck: 78,
        },
        user_id: USER_ID,
        experience: 0,
        created_at: timestamp(),
        updated_at: timestamp(),
        artifacts: Vec::new(),
    }
}

pub(crate) fn mock_artifact() -> Artifact {
    Artifact {
        id: ARTIFACT_ID,
        name: "Rubber Duck of Debugging".into(),
        description: Some("Listens patiently".into()),
        image_url: None,
        effect: json!({ "sarcasmLevel": 5 }),
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

/// Records requested delays and returns immediately
#[derive(Clone, Default)]
pub(crate) struct RecordingSleeper {
    delays: Arc<Mutex<Vec<u64>>>,
}

impl RecordingSleeper {
    pub(crate) fn delays(&self) -> Vec<u64> {
        self.delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SleepProvider for RecordingSleeper {
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + Send + 'static>> {
        self.delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ms);
        Box::pin(async {})
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Notice {
    Success(String),
    Error(String),
}

/// Collects notifications for assertions
#[derive(Clone, Default)]
pub(crate) struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub(crate) fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn errors(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Error(msg) => Some(msg),
                Notice::Success(_) => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notice::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notice::Error(message.to_string()));
    }
}

pub(crate) struct TestContext {
    pub ctx: ClientContext,
    pub storage: MemoryStorageProvider,
    pub notifier: RecordingNotifier,
}

/// Context over a mocked API port, optionally signed in with `token`
pub(crate) fn test_context(port: MockApiPort, token: Option<&str>) -> TestContext {
    let storage = MemoryStorageProvider::new();
    let session = AuthSession::load(Arc::new(storage.clone()));
    if let Some(token) = token {
        session
            .sign_in(token, &mock_user_with_token(token))
            .expect("serializable");
    }
    let notifier = RecordingNotifier::default();
    let ctx = ClientContext::new(
        Arc::new(port),
        session,
        Arc::new(notifier.clone()),
        Arc::new(storage.clone()),
    );
    TestContext {
        ctx,
        storage,
        notifier,
    }
}
