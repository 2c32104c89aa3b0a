mod chat;
mod ids;
mod lesson;
mod module;
mod percent;
mod user;

pub use ids::{LessonId, LessonRef, MessageId, ModuleId, ParseIdError, UserId};

pub use chat::{ChatMessage, ChatRole, Sentiment};
pub use lesson::Lesson;
pub use module::{Difficulty, Module, ModuleDraft, ModuleError};
pub use percent::{Percent, PercentError};
pub use user::{AccessibilitySettings, AuthToken, ProfileFontSize, SkillLevel, User, UserPatch};
