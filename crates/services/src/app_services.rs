use std::sync::Arc;

use course_core::{AppConfig, Catalog};
use storage::repository::Storage;

use crate::Clock;
use crate::assistant::AssistantService;
use crate::auth::SessionService;
use crate::error::AppServicesError;
use crate::learning::LearningState;
use crate::store::Store;
use crate::ui_state::UiState;

/// Composition root: the catalog plus one handle per store.
///
/// Cloning shares every store; nothing here is a global.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<Catalog>,
    learning: Store<LearningState>,
    ui: Store<UiState>,
    session: Arc<SessionService>,
    assistant: Arc<AssistantService>,
}

impl AppServices {
    /// Build services backed by `SQLite` client storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization, session restore
    /// or catalog loading fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        config: AppConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(storage, clock, config).await
    }

    /// Build services with volatile storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the built-in catalog fails validation.
    pub async fn in_memory(clock: Clock, config: AppConfig) -> Result<Self, AppServicesError> {
        Self::from_storage(Storage::in_memory(), clock, config).await
    }

    /// # Errors
    ///
    /// Returns `AppServicesError` if the persisted session cannot be read or
    /// the built-in catalog fails validation.
    pub async fn from_storage(
        storage: Storage,
        clock: Clock,
        config: AppConfig,
    ) -> Result<Self, AppServicesError> {
        let catalog = Arc::new(Catalog::builtin()?);
        let learning = Store::new(LearningState::from_catalog(
            &catalog,
            config.progress_policy(),
        ));
        let session = Arc::new(SessionService::restore(Arc::clone(&storage.client)).await?);
        let assistant = Arc::new(AssistantService::new(clock, config.reply_delay()));

        tracing::debug!(
            modules = catalog.modules().len(),
            policy = ?config.progress_policy(),
            "app services ready"
        );

        Ok(Self {
            catalog,
            learning,
            ui: Store::new(UiState::default()),
            session,
            assistant,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn learning(&self) -> Store<LearningState> {
        self.learning.clone()
    }

    #[must_use]
    pub fn ui(&self) -> Store<UiState> {
        self.ui.clone()
    }

    #[must_use]
    pub fn session(&self) -> Arc<SessionService> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn assistant(&self) -> Arc<AssistantService> {
        Arc::clone(&self.assistant)
    }
}
