//! Route table and the authentication guard in front of protected views.
//!
//! The guard reads only the authenticated flag it is given. It never touches
//! store state, so a redirect leaves every store exactly as it was.

use std::fmt;

use crate::model::{LessonId, LessonRef, ModuleId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    Modules,
    ModuleDetail(ModuleId),
    Lesson(LessonRef),
    Progress,
    AiAssistant,
    Settings,
}

impl Route {
    /// Views that require an authenticated session.
    #[must_use]
    pub fn is_protected(self) -> bool {
        !matches!(self, Route::Home | Route::Login | Route::Register)
    }

    #[must_use]
    pub fn path(self) -> String {
        match self {
            Route::Home => "/".to_owned(),
            Route::Login => "/login".to_owned(),
            Route::Register => "/register".to_owned(),
            Route::Dashboard => "/dashboard".to_owned(),
            Route::Modules => "/modules".to_owned(),
            Route::ModuleDetail(id) => format!("/modules/{id}"),
            Route::Lesson(lesson) => {
                format!("/modules/{}/lessons/{}", lesson.module, lesson.lesson)
            }
            Route::Progress => "/progress".to_owned(),
            Route::AiAssistant => "/ai-assistant".to_owned(),
            Route::Settings => "/settings".to_owned(),
        }
    }

    /// Parses a path produced by `path`. Trailing slashes are ignored.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Some(Route::Home),
            ["login"] => Some(Route::Login),
            ["register"] => Some(Route::Register),
            ["dashboard"] => Some(Route::Dashboard),
            ["modules"] => Some(Route::Modules),
            ["modules", id] => id.parse::<ModuleId>().ok().map(Route::ModuleDetail),
            ["modules", module, "lessons", lesson] => {
                let module = module.parse::<ModuleId>().ok()?;
                let lesson = lesson.parse::<LessonId>().ok()?;
                Some(Route::Lesson(LessonRef::new(module, lesson)))
            }
            ["progress"] => Some(Route::Progress),
            ["ai-assistant"] => Some(Route::AiAssistant),
            ["settings"] => Some(Route::Settings),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Route),
}

/// Permits public routes, and protected routes only when authenticated.
#[must_use]
pub fn guard(route: Route, is_authenticated: bool) -> GuardDecision {
    if route.is_protected() && !is_authenticated {
        return GuardDecision::Redirect(Route::Login);
    }
    GuardDecision::Allow
}
