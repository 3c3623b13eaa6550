//! Auth hook - signed-in user state and auth triggers
//!
//! The user is read from the session, so a restart restores it from storage.
//! Logging out clears the session and the whole query cache.

use quirkverse_player_ports::outbound::ApiError;
use quirkverse_protocol::{
    LoginCredentials, SocialLoginData, User, UserCreate, UserUpdate, UserWithToken,
};

use crate::application::context::ClientContext;
use crate::application::query::{stale, Mutation, Query, QueryKey};
use crate::application::services::AuthService;

pub const USER_KEY: &str = "user";

pub fn user_key() -> QueryKey {
    QueryKey::new(USER_KEY)
}

#[derive(Clone)]
pub struct AuthHook {
    ctx: ClientContext,
    service: AuthService,
    login: Mutation,
    register: Mutation,
    social_login: Mutation,
    update_profile: Mutation,
}

impl AuthHook {
    pub fn new(ctx: &ClientContext) -> Self {
        let mutation = |failure: &'static str| {
            Mutation::new(ctx.queries.clone(), ctx.notifier.clone(), failure)
        };
        Self {
            ctx: ctx.clone(),
            service: ctx.auth_service(),
            login: mutation("Error signing in"),
            register: mutation("Error registering"),
            social_login: mutation("Error signing in with provider"),
            update_profile: mutation("Error updating profile")
                .with_success_message("Profile updated"),
        }
    }

    /// The stored user record, while a token is present
    pub fn user(&self) -> Option<UserWithToken> {
        self.ctx.session.current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.service.is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.login.is_pending()
            || self.register.is_pending()
            || self.social_login.is_pending()
            || self.update_profile.is_pending()
    }

    /// Profile as the server sees it
    pub fn profile(&self) -> Query<User> {
        let service = self.service.clone();
        Query::new(self.ctx.queries.clone(), user_key().with("profile"), move || {
            let service = service.clone();
            async move { service.get_profile().await }
        })
        .stale_time(stale::PROFILE)
        .enabled_when(self.ctx.auth_gate())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<UserWithToken, ApiError> {
        let credentials = LoginCredentials::new(email, password);
        self.login
            .execute(&user_key(), self.service.login(&credentials), |cache, _| {
                cache.invalidate_queries(&user_key());
            })
            .await
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserWithToken, ApiError> {
        let data = UserCreate {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.register
            .execute(&user_key(), self.service.register(&data), |cache, _| {
                cache.invalidate_queries(&user_key());
            })
            .await
    }

    pub async fn social_login(&self, data: &SocialLoginData) -> Result<UserWithToken, ApiError> {
        self.social_login
            .execute(&user_key(), self.service.social_login(data), |cache, _| {
                cache.invalidate_queries(&user_key());
            })
            .await
    }

    pub async fn update_profile(&self, data: &UserUpdate) -> Result<User, ApiError> {
        self.update_profile
            .execute(&user_key(), self.service.update_profile(data), |cache, _| {
                cache.invalidate_queries(&user_key());
            })
            .await
    }

    pub fn logout(&self) {
        self.service.logout();
        self.ctx.queries.clear();
        self.ctx.notifier.success("Signed out");
    }
}
