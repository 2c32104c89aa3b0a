use serde::{Deserialize, Serialize};

use crate::model::ids::LessonId;

/// An atomic content unit inside a module.
///
/// `locked` is authored data. Completing earlier lessons never unlocks later
/// ones; unlocking is the job of whoever authors the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    id: LessonId,
    title: String,
    description: String,
    duration: String,
    completed: bool,
    locked: bool,
}

impl Lesson {
    /// Creates an open, not yet completed lesson.
    #[must_use]
    pub fn new(
        id: LessonId,
        title: impl Into<String>,
        description: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            duration: duration.into(),
            completed: false,
            locked: false,
        }
    }

    #[must_use]
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    #[must_use]
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    #[must_use]
    pub fn id(&self) -> LessonId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Display string such as `"15 min"`.
    #[must_use]
    pub fn duration(&self) -> &str {
        &self.duration
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Neither completed nor locked.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        !self.completed && !self.locked
    }

    /// Marks the lesson completed. Returns `false` if it already was.
    pub fn mark_completed(&mut self) -> bool {
        let changed = !self.completed;
        self.completed = true;
        changed
    }
}
