#![forbid(unsafe_code)]

pub mod app_services;
pub mod assistant;
pub mod auth;
pub mod error;
pub mod learning;
pub mod overview;
pub mod store;
pub mod ui_state;

pub use course_core::Clock;

pub use app_services::AppServices;
pub use assistant::{AiCommand, AiState, AssistantService, ReplyHandle};
pub use auth::{AuthCommand, AuthState, Credentials, RegistrationDraft, SessionService};
pub use error::{AppServicesError, AssistantError, SessionServiceError};
pub use learning::{LearningCommand, LearningState};
pub use overview::{DashboardSummary, ModuleCard, ModuleOverview};
pub use store::{CommandStatus, Reducer, Store};
pub use ui_state::{UiCommand, UiState};
