//! Shared error types for the services crate.

use thiserror::Error;

use course_core::CatalogError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `SessionService`.
///
/// The login and registration stubs accept any input, so only the token
/// persistence step can fail.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AssistantService`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AssistantError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("no async runtime available to schedule the reply")]
    NoRuntime,
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Session(#[from] SessionServiceError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
