//! Auth session - token store for the signed-in user
//!
//! The session is created once at start-up from persisted storage and then
//! passed explicitly to the API client, services and hooks. Writes go through
//! to storage; reads are served from the in-memory snapshot.
//!
//! "Authenticated" means a token is present. A stored user record without a
//! token is treated as stale: it is dropped on load and hidden by
//! [`AuthSession::current_user`].

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use quirkverse_player_ports::outbound::{storage_keys, ApiError, StorageProvider};
use serde::{de::DeserializeOwned, Serialize};

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    /// Raw JSON of the stored user record
    user: Option<String>,
}

struct SessionInner {
    storage: Arc<dyn StorageProvider>,
    state: RwLock<SessionState>,
}

/// Cloneable handle to the shared auth state
#[derive(Clone)]
pub struct AuthSession {
    inner: Arc<SessionInner>,
}

impl AuthSession {
    /// Read persisted token and user once and build the session.
    pub fn load(storage: Arc<dyn StorageProvider>) -> Self {
        let token = storage.load(storage_keys::AUTH_TOKEN);
        let mut user = storage.load(storage_keys::AUTH_USER);

        if token.is_none() && user.is_some() {
            tracing::debug!("Dropping stored user record without a token");
            storage.remove(storage_keys::AUTH_USER);
            user = None;
        }

        tracing::debug!(authenticated = token.is_some(), "Auth session loaded");

        Self {
            inner: Arc::new(SessionInner {
                storage,
                state: RwLock::new(SessionState { token, user }),
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // -------------------------------------------------------------------------
    // Token
    // -------------------------------------------------------------------------

    pub fn set_token(&self, token: &str) {
        let mut state = self.write();
        self.inner.storage.save(storage_keys::AUTH_TOKEN, token);
        state.token = Some(token.to_string());
    }

    pub fn get_token(&self) -> Option<String> {
        self.read().token.clone()
    }

    pub fn remove_token(&self) {
        let mut state = self.write();
        self.inner.storage.remove(storage_keys::AUTH_TOKEN);
        state.token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().token.is_some()
    }

    // -------------------------------------------------------------------------
    // User record
    // -------------------------------------------------------------------------

    /// Persist a user record as JSON.
    pub fn set_user<T: Serialize + ?Sized>(&self, user: &T) -> Result<(), ApiError> {
        let json = serde_json::to_string(user).map_err(|e| ApiError::Encode(e.to_string()))?;
        let mut state = self.write();
        self.inner.storage.save(storage_keys::AUTH_USER, &json);
        state.user = Some(json);
        Ok(())
    }

    /// The stored user record, or `None` if missing or not valid for `T`.
    pub fn get_user<T: DeserializeOwned>(&self) -> Option<T> {
        let state = self.read();
        let raw = state.user.as_deref()?;
        match serde_json::from_str(raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unreadable stored user");
                None
            }
        }
    }

    /// The stored user, but only while a token is present.
    pub fn current_user<T: DeserializeOwned>(&self) -> Option<T> {
        if !self.is_authenticated() {
            return None;
        }
        self.get_user()
    }

    pub fn remove_user(&self) {
        let mut state = self.write();
        self.inner.storage.remove(storage_keys::AUTH_USER);
        state.user = None;
    }

    // -------------------------------------------------------------------------
    // Combined
    // -------------------------------------------------------------------------

    /// Store token and user together; readers see both or neither.
    pub fn sign_in<T: Serialize + ?Sized>(&self, token: &str, user: &T) -> Result<(), ApiError> {
        let json = serde_json::to_string(user).map_err(|e| ApiError::Encode(e.to_string()))?;
        let mut state = self.write();
        self.inner.storage.save(storage_keys::AUTH_TOKEN, token);
        self.inner.storage.save(storage_keys::AUTH_USER, &json);
        state.token = Some(token.to_string());
        state.user = Some(json);
        Ok(())
    }

    /// Remove token and user under one lock.
    pub fn clear_all(&self) {
        let mut state = self.write();
        self.inner.storage.remove(storage_keys::AUTH_TOKEN);
        self.inner.storage.remove(storage_keys::AUTH_USER);
        *state = SessionState::default();
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
