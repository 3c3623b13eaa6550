//! Auth service - register, login and profile operations
//!
//! Register, login and social login store the returned token and user record
//! in the [`AuthSession`]. Logout is local only.

use serde_json::Value;

use quirkverse_player_ports::outbound::{ApiError, ApiRequest};
use quirkverse_protocol::{
    ApiRoutes, LoginCredentials, SocialLoginData, User, UserCreate, UserUpdate, UserWithToken,
};

use crate::application::api::{Api, FORM_CONTENT_TYPE};
use crate::application::session::AuthSession;

#[derive(Clone)]
pub struct AuthService {
    api: Api,
    session: AuthSession,
}

impl AuthService {
    pub fn new(api: Api, session: AuthSession) -> Self {
        Self { api, session }
    }

    fn persist(&self, signed_in: &UserWithToken) -> Result<(), ApiError> {
        self.session.sign_in(&signed_in.token, signed_in)?;
        tracing::info!(user_id = %signed_in.user.id, "Signed in");
        Ok(())
    }

    pub async fn register(&self, data: &UserCreate) -> Result<UserWithToken, ApiError> {
        let signed_in: UserWithToken = self
            .api
            .send(ApiRequest::post(ApiRoutes::AUTH_REGISTER).with_json(data)?)
            .await?;
        self.persist(&signed_in)?;
        Ok(signed_in)
    }

    /// Form-encoded login; the email travels as `username`.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<UserWithToken, ApiError> {
        let request = ApiRequest::post(ApiRoutes::AUTH_LOGIN)
            .with_form(credentials.form_fields())
            .with_header("Content-Type", FORM_CONTENT_TYPE);

        let signed_in: UserWithToken = self.api.send(request).await?;
        self.persist(&signed_in)?;
        Ok(signed_in)
    }

    pub async fn social_login(&self, data: &SocialLoginData) -> Result<UserWithToken, ApiError> {
        let signed_in: UserWithToken = self
            .api
            .send(ApiRequest::post(ApiRoutes::AUTH_SOCIAL_LOGIN).with_json(data)?)
            .await?;
        self.persist(&signed_in)?;
        Ok(signed_in)
    }

    pub async fn get_profile(&self) -> Result<User, ApiError> {
        self.api.send(ApiRequest::get(ApiRoutes::USER_PROFILE)).await
    }

    /// Update the profile and merge the result into the stored record.
    ///
    /// The response carries no token, so the stored one is kept.
    pub async fn update_profile(&self, data: &UserUpdate) -> Result<User, ApiError> {
        let updated: User = self
            .api
            .send(ApiRequest::put(ApiRoutes::USER_PROFILE).with_json(data)?)
            .await?;

        let mut stored = match self.session.get_user::<Value>() {
            Some(Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        stored.extend(
            updated
                .to_record()
                .map_err(|e| ApiError::Encode(e.to_string()))?,
        );
        if let Some(token) = self.session.get_token() {
            stored.insert("token".to_string(), Value::String(token));
        }
        self.session.set_user(&stored)?;

        Ok(updated)
    }

    pub fn logout(&self) {
        self.session.clear_all();
        tracing::info!("Signed out");
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{mock_user, mock_user_with_token};
    use quirkverse_player_adapters::infrastructure::storage::MemoryStorageProvider;
    use quirkverse_player_ports::outbound::{
        storage_keys, HttpMethod, MockApiPort, RequestBody, StorageProvider,
    };
    use serde_json::json;
    use std::sync::Arc;

    fn service(port: MockApiPort) -> (AuthService, MemoryStorageProvider) {
        let storage = MemoryStorageProvider::new();
        let session = AuthSession::load(Arc::new(storage.clone()));
        (AuthService::new(Api::new(Arc::new(port)), session), storage)
    }

    fn stored_user(storage: &MemoryStorageProvider) -> Value {
        let raw = storage.load(storage_keys::AUTH_USER).expect("user stored");
        serde_json::from_str(&raw).expect("valid json")
    }

    #[tokio::test]
    async fn register_stores_token_and_user() {
        let mut port = MockApiPort::new();
        port.expect_fetch()
            .withf(|req| {
                req.method == HttpMethod::Post
                    && req.url == "/api/auth/register"
                    && req.json_body()
                        == Some(&json!({
                            "name": "Test User",
                            "email": "test@example.com",
                            "password": "password123"
                        }))
            })
            .times(1)
            .returning(|_| Ok(serde_json::to_value(mock_user_with_token("test-token")).expect("json")));
        let (service, storage) = service(port);

        let result = service
            .register(&UserCreate {
                name: "Test User".into(),
                email: "test@example.com".into(),
                password: "password123".into(),
            })
            .await
            .expect("registers");

        assert_eq!(result.token, "test-token");
        assert_eq!(storage.load(storage_keys::AUTH_TOKEN).as_deref(), Some("test-token"));
        assert_eq!(stored_user(&storage)["email"], "test@example.com");
        assert_eq!(stored_user(&storage)["token"], "test-token");
    }

    #[tokio::test]
    async fn login_sends_form_and_stores_session() {
        let mut port = MockApiPort::new();
        port.expect_fetch()
            .withf(|req| {
                req.method == HttpMethod::Post
                    && req.url == "/api/auth/login"
                    && req.header("Content-Type") == Some("application/x-www-form-urlencoded")
                    && req.body
                        == RequestBody::Form(vec![
                            ("username".into(), "a@b.com".into()),
                            ("password".into(), "pw".into()),
                        ])
            })
            .times(1)
            .returning(|_| Ok(serde_json::to_value(mock_user_with_token("T")).expect("json")));
        let (service, storage) = service(port);

        assert!(!service.is_authenticated());

        service
            .login(&LoginCredentials::new("a@b.com", "pw"))
            .await
            .expect("logs in");

        assert!(service.is_authenticated());
        assert_eq!(storage.load(storage_keys::AUTH_TOKEN).as_deref(), Some("T"));
        let user = stored_user(&storage);
        assert_eq!(user["name"], "Test User");
        assert_eq!(user["token"], "T");
    }

    #[tokio::test]
    async fn failed_login_leaves_session_empty() {
        let mut port = MockApiPort::new();
        port.expect_fetch().returning(|_| {
            Err(ApiError::from_status(401, r#"{"detail":"Incorrect email or password"}"#))
        });
        let (service, storage) = service(port);

        let error = service
            .login(&LoginCredentials::new("a@b.com", "wrong"))
            .await
            .expect_err("rejected");

        assert!(error.is_unauthorized());
        assert!(!service.is_authenticated());
        assert_eq!(storage.load(storage_keys::AUTH_USER), None);
    }

    #[tokio::test]
    async fn social_login_posts_json() {
        let mut port = MockApiPort::new();
        port.expect_fetch()
            .withf(|req| {
                req.url == "/api/auth/social-login"
                    && req.json_body().and_then(|b| b.get("provider")) == Some(&json!("google"))
            })
            .times(1)
            .returning(|_| Ok(serde_json::to_value(mock_user_with_token("social-token")).expect("json")));
        let (service, storage) = service(port);

        service
            .social_login(&SocialLoginData {
                provider: "google".into(),
                token: "google-token".into(),
                email: Some("test@example.com".into()),
                name: None,
            })
            .await
            .expect("logs in");

        assert_eq!(storage.load(storage_keys::AUTH_TOKEN).as_deref(), Some("social-token"));
    }

    #[tokio::test]
    async fn get_profile_fetches_current_user() {
        let mut port = MockApiPort::new();
        port.expect_fetch()
            .withf(|req| req.method == HttpMethod::Get && req.url == "/api/users/profile")
            .times(1)
            .returning(|_| Ok(serde_json::to_value(mock_user()).expect("json")));
        let (service, _) = service(port);

        let profile = service.get_profile().await.expect("profile");

        assert_eq!(profile, mock_user());
    }

    #[tokio::test]
    async fn update_profile_merges_and_keeps_token() {
        let mut updated = mock_user();
        updated.name = "Updated Name".into();
        let response = serde_json::to_value(&updated).expect("json");

        let mut port = MockApiPort::new();
        port.expect_fetch()
            .withf(|req| {
                req.method == HttpMethod::Put
                    && req.json_body() == Some(&json!({ "name": "Updated Name" }))
            })
            .times(1)
            .returning(move |_| Ok(response.clone()));
        let (service, storage) = service(port);
        storage.save(storage_keys::AUTH_TOKEN, "old-token");
        storage.save(
            storage_keys::AUTH_USER,
            &json!({ "id": "local", "name": "Old Name", "theme": "dark", "token": "old-token" })
                .to_string(),
        );
        // Reload so the session picks up the seeded storage
        let session = AuthSession::load(Arc::new(storage.clone()));
        let service = AuthService::new(service.api.clone(), session);

        let result = service
            .update_profile(&UserUpdate {
                name: Some("Updated Name".into()),
                ..UserUpdate::default()
            })
            .await
            .expect("updates");

        assert_eq!(result.name, "Updated Name");
        let user = stored_user(&storage);
        assert_eq!(user["name"], "Updated Name");
        assert_eq!(user["id"], json!(updated.id));
        assert_eq!(user["theme"], "dark");
        assert_eq!(user["token"], "old-token");
        assert_eq!(storage.load(storage_keys::AUTH_TOKEN).as_deref(), Some("old-token"));
    }

    #[tokio::test]
    async fn update_profile_clears_fields_the_server_dropped() {
        let response = serde_json::to_value(mock_user()).expect("json");
        assert!(response.get("image_url").is_none());

        let mut port = MockApiPort::new();
        port.expect_fetch()
            .times(1)
            .returning(move |_| Ok(response.clone()));
        let storage = MemoryStorageProvider::new();
        let mut previous = serde_json::to_value(mock_user_with_token("token")).expect("json");
        previous["image_url"] = json!("/old.png");
        previous["provider"] = json!("google");
        storage.save(storage_keys::AUTH_TOKEN, "token");
        storage.save(storage_keys::AUTH_USER, &previous.to_string());
        let session = AuthSession::load(Arc::new(storage.clone()));
        let service = AuthService::new(Api::new(Arc::new(port)), session);

        let result = service
            .update_profile(&UserUpdate::default())
            .await
            .expect("updates");

        assert_eq!(result.image_url, None);
        let user = stored_user(&storage);
        assert_eq!(user["image_url"], Value::Null);
        assert_eq!(user["provider"], Value::Null);
        assert_eq!(user["token"], "token");
        let restored: Option<UserWithToken> = service.session.current_user();
        assert_eq!(restored.map(|u| u.user.image_url), Some(None));
    }

    #[tokio::test]
    async fn logout_clears_session_without_network() {
        let mut port = MockApiPort::new();
        port.expect_fetch().never();
        let (service, storage) = service(port);
        storage.save(storage_keys::AUTH_TOKEN, "test-token");
        storage.save(storage_keys::AUTH_USER, r#"{"name":"Test User"}"#);
        let service = AuthService::new(
            service.api.clone(),
            AuthSession::load(Arc::new(storage.clone())),
        );
        assert!(service.is_authenticated());

        service.logout();

        assert!(!service.is_authenticated());
        assert_eq!(storage.load(storage_keys::AUTH_TOKEN), None);
        assert_eq!(storage.load(storage_keys::AUTH_USER), None);
    }
}
