//! Session store and the stub authentication service around it.

use std::sync::Arc;

use course_core::model::{AuthToken, User, UserPatch};
use course_core::routes::{self, GuardDecision, Route};
use storage::repository::ClientStorageRepository;

use crate::error::SessionServiceError;
use crate::store::{CommandStatus, Reducer, Store};

/// Client storage key holding the session token.
pub const AUTH_TOKEN_KEY: &str = "token";

#[derive(Debug)]
pub enum AuthCommand {
    LoginStart,
    LoginSuccess { user: User, token: AuthToken },
    LoginFailure(String),
    Logout,
    /// Ignored while no user is signed in.
    UpdateProfile(UserPatch),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    user: Option<User>,
    token: Option<AuthToken>,
    is_authenticated: bool,
    is_loading: bool,
    error: Option<String>,
}

impl AuthState {
    /// Anonymous state carrying a token read back from client storage.
    #[must_use]
    pub fn with_token(token: Option<AuthToken>) -> Self {
        Self {
            token,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Status of the most recent login attempt.
    #[must_use]
    pub fn status(&self) -> CommandStatus {
        match (self.is_loading, &self.error) {
            (true, _) => CommandStatus::Pending,
            (false, Some(error)) => CommandStatus::Failed(error.clone()),
            (false, None) if self.is_authenticated => CommandStatus::Succeeded,
            (false, None) => CommandStatus::Idle,
        }
    }
}

impl Reducer for AuthState {
    type Command = AuthCommand;
    const NAME: &'static str = "auth";

    fn reduce(&mut self, command: AuthCommand) {
        match command {
            AuthCommand::LoginStart => {
                self.is_loading = true;
                self.error = None;
            }
            AuthCommand::LoginSuccess { user, token } => {
                self.is_loading = false;
                self.is_authenticated = true;
                self.user = Some(user);
                self.token = Some(token);
                self.error = None;
            }
            AuthCommand::LoginFailure(error) => {
                self.is_loading = false;
                self.error = Some(error);
            }
            AuthCommand::Logout => {
                self.is_loading = false;
                self.user = None;
                self.token = None;
                self.is_authenticated = false;
                self.error = None;
            }
            AuthCommand::UpdateProfile(patch) => {
                if let Some(user) = self.user.as_mut() {
                    user.apply(patch);
                }
            }
        }
    }
}

/// Submitted login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Submitted registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Owns the auth store and keeps the persisted token in step with it.
#[derive(Clone)]
pub struct SessionService {
    store: Store<AuthState>,
    client: Arc<dyn ClientStorageRepository>,
}

impl SessionService {
    /// Builds the service with a token read back from client storage.
    ///
    /// A restored token does not authenticate the session.
    ///
    /// # Errors
    ///
    /// Returns `SessionServiceError` if client storage cannot be read.
    pub async fn restore(
        client: Arc<dyn ClientStorageRepository>,
    ) -> Result<Self, SessionServiceError> {
        let token = client.get_item(AUTH_TOKEN_KEY).await?.map(AuthToken::new);
        tracing::debug!(restored = token.is_some(), "session token restored");
        Ok(Self {
            store: Store::new(AuthState::with_token(token)),
            client,
        })
    }

    #[must_use]
    pub fn store(&self) -> &Store<AuthState> {
        &self.store
    }

    /// Stub login: any credentials sign in as the demo user.
    ///
    /// # Errors
    ///
    /// Returns `SessionServiceError` if the token cannot be persisted. The
    /// store then records the failure and stays anonymous.
    pub async fn login(&self, credentials: &Credentials) -> Result<User, SessionServiceError> {
        self.store.dispatch(AuthCommand::LoginStart);

        let user = User::demo(credentials.email.as_str());
        let token = AuthToken::demo();

        if let Err(err) = self.client.set_item(AUTH_TOKEN_KEY, token.expose()).await {
            tracing::warn!(error = %err, "failed to persist session token");
            self.store.dispatch(AuthCommand::LoginFailure(err.to_string()));
            return Err(err.into());
        }

        self.store.dispatch(AuthCommand::LoginSuccess {
            user: user.clone(),
            token,
        });
        tracing::info!(email = %user.email, "signed in");
        Ok(user)
    }

    /// Stub registration. Nothing is stored and the session stays
    /// anonymous; the caller continues at the returned route.
    #[must_use]
    pub fn register(&self, draft: &RegistrationDraft) -> Route {
        tracing::info!(email = %draft.email.trim(), "registration accepted");
        Route::Login
    }

    /// Clears the session, then discards the persisted token.
    ///
    /// # Errors
    ///
    /// Returns `SessionServiceError` if the stored token cannot be removed.
    /// In-memory state is already cleared when this happens.
    pub async fn logout(&self) -> Result<(), SessionServiceError> {
        self.store.dispatch(AuthCommand::Logout);
        self.client.remove_item(AUTH_TOKEN_KEY).await?;
        tracing::info!("signed out");
        Ok(())
    }

    pub fn update_profile(&self, patch: UserPatch) {
        self.store.dispatch(AuthCommand::UpdateProfile(patch));
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.store.select(AuthState::is_authenticated)
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.store.select(|state| state.user().cloned())
    }

    /// Route guard decision for the current session. Reads only.
    #[must_use]
    pub fn guard(&self, route: Route) -> GuardDecision {
        routes::guard(route, self.is_authenticated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use course_core::model::SkillLevel;
    use storage::repository::{InMemoryRepository, StorageError};

    fn credentials(email: &str) -> Credentials {
        Credentials {
            email: email.to_owned(),
            password: "hunter2".to_owned(),
        }
    }

    async fn service() -> (SessionService, Arc<InMemoryRepository>) {
        let repo = Arc::new(InMemoryRepository::new());
        let client: Arc<dyn ClientStorageRepository> = repo.clone();
        let service = SessionService::restore(client).await.unwrap();
        (service, repo)
    }

    struct ReadOnlyClient;

    #[async_trait]
    impl ClientStorageRepository for ReadOnlyClient {
        async fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        async fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Connection("read-only".into()))
        }

        async fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Connection("read-only".into()))
        }
    }

    #[test]
    fn reducer_walks_the_login_states() {
        let mut state = AuthState::default();
        assert_eq!(state.status(), CommandStatus::Idle);

        state.reduce(AuthCommand::LoginStart);
        assert_eq!(state.status(), CommandStatus::Pending);

        state.reduce(AuthCommand::LoginFailure("bad password".into()));
        assert_eq!(state.status(), CommandStatus::Failed("bad password".into()));
        assert!(!state.is_authenticated());

        state.reduce(AuthCommand::LoginStart);
        assert_eq!(state.error(), None);
        state.reduce(AuthCommand::LoginSuccess {
            user: User::demo("a@example.com"),
            token: AuthToken::demo(),
        });
        assert_eq!(state.status(), CommandStatus::Succeeded);
    }

    #[test]
    fn logout_during_pending_login_returns_to_idle() {
        let mut state = AuthState::default();
        state.reduce(AuthCommand::LoginStart);
        state.reduce(AuthCommand::Logout);

        assert!(!state.is_loading());
        assert_eq!(state.status(), CommandStatus::Idle);
        assert_eq!(state, AuthState::default());
    }

    #[test]
    fn profile_update_without_user_is_ignored() {
        let mut state = AuthState::default();
        state.reduce(AuthCommand::UpdateProfile(UserPatch {
            full_name: Some("Rose".into()),
            ..UserPatch::default()
        }));
        assert_eq!(state, AuthState::default());
    }

    #[tokio::test]
    async fn login_accepts_any_credentials_and_persists_token() {
        let (service, repo) = service().await;
        let user = service.login(&credentials("grandpa@example.com")).await.unwrap();

        assert_eq!(user.email, "grandpa@example.com");
        assert_eq!(user.display_name(), User::DEMO_NAME);
        assert!(service.is_authenticated());

        let state = service.store().snapshot();
        assert_eq!(state.token().map(AuthToken::expose), Some(AuthToken::DEMO));
        assert!(!state.is_loading());
        assert_eq!(
            repo.get_item(AUTH_TOKEN_KEY).await.unwrap().as_deref(),
            Some(AuthToken::DEMO)
        );
    }

    #[tokio::test]
    async fn logout_clears_session_and_stored_token() {
        let (service, repo) = service().await;
        service.login(&credentials("a@example.com")).await.unwrap();
        service.logout().await.unwrap();

        let state = service.store().snapshot();
        assert!(state.user().is_none());
        assert!(state.token().is_none());
        assert!(!state.is_authenticated());
        assert!(state.error().is_none());
        assert!(repo.get_item(AUTH_TOKEN_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn logout_clears_memory_even_when_storage_fails() {
        let service = SessionService::restore(Arc::new(ReadOnlyClient)).await.unwrap();
        service.store().dispatch(AuthCommand::LoginSuccess {
            user: User::demo("a@example.com"),
            token: AuthToken::demo(),
        });

        assert!(service.logout().await.is_err());
        assert!(!service.is_authenticated());
        assert!(service.user().is_none());
    }

    #[tokio::test]
    async fn login_storage_failure_is_recorded() {
        let service = SessionService::restore(Arc::new(ReadOnlyClient)).await.unwrap();
        let err = service.login(&credentials("a@example.com")).await.unwrap_err();

        assert!(matches!(err, SessionServiceError::Storage(_)));
        let state = service.store().snapshot();
        assert!(!state.is_authenticated());
        assert!(matches!(state.status(), CommandStatus::Failed(_)));
    }

    #[tokio::test]
    async fn restored_token_does_not_authenticate() {
        let repo = Arc::new(InMemoryRepository::new());
        repo.set_item(AUTH_TOKEN_KEY, "earlier-token").await.unwrap();

        let service = SessionService::restore(repo).await.unwrap();
        let state = service.store().snapshot();
        assert_eq!(state.token().map(AuthToken::expose), Some("earlier-token"));
        assert!(!state.is_authenticated());
        assert_eq!(
            service.guard(Route::Dashboard),
            GuardDecision::Redirect(Route::Login)
        );
    }

    #[tokio::test]
    async fn logout_from_restored_token_clears_everything() {
        let repo = Arc::new(InMemoryRepository::new());
        repo.set_item(AUTH_TOKEN_KEY, "earlier-token").await.unwrap();
        let service = SessionService::restore(repo.clone()).await.unwrap();

        service.logout().await.unwrap();

        let state = service.store().snapshot();
        assert!(state.token().is_none());
        assert!(!state.is_loading());
        assert_eq!(state.status(), CommandStatus::Idle);
        assert_eq!(state, AuthState::default());
        assert!(repo.get_item(AUTH_TOKEN_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn register_routes_to_login_without_signing_in() {
        let (service, repo) = service().await;
        let next = service.register(&RegistrationDraft {
            full_name: "Rose Tyler".into(),
            email: "rose@example.com".into(),
            password: "pw".into(),
            confirm_password: "pw".into(),
        });

        assert_eq!(next, Route::Login);
        assert!(!service.is_authenticated());
        assert!(repo.get_item(AUTH_TOKEN_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn profile_update_merges_into_signed_in_user() {
        let (service, _) = service().await;
        service.login(&credentials("a@example.com")).await.unwrap();
        service.update_profile(UserPatch {
            full_name: Some("Ada Lovelace".into()),
            skill_level: Some(SkillLevel::Intermediate),
            ..UserPatch::default()
        });

        let user = service.user().unwrap();
        assert_eq!(user.full_name, "Ada Lovelace");
        assert_eq!(user.skill_level, SkillLevel::Intermediate);
        assert_eq!(user.email, "a@example.com");
    }
}
