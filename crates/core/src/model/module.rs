use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::{LessonId, ModuleId};
use crate::model::lesson::Lesson;
use crate::model::percent::Percent;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModuleError {
    #[error("module title cannot be empty")]
    EmptyTitle,

    #[error("lesson {lesson} in module {module} has an empty title")]
    EmptyLessonTitle { module: ModuleId, lesson: LessonId },

    #[error("lesson id {lesson} appears more than once in module {module}")]
    DuplicateLesson { module: ModuleId, lesson: LessonId },

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = ModuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(ModuleError::UnknownDifficulty(s.to_owned())),
        }
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Authored module content before validation.
#[derive(Debug, Clone)]
pub struct ModuleDraft {
    pub id: ModuleId,
    pub title: String,
    pub description: String,
    pub detailed_description: String,
    pub difficulty: Difficulty,
    pub estimated_time: String,
    pub icon: String,
    pub color: String,
    pub objectives: Vec<String>,
    pub lessons: Vec<Lesson>,
    pub progress: Percent,
}

impl ModuleDraft {
    /// Validate the draft into a `Module`.
    ///
    /// # Errors
    ///
    /// Returns `ModuleError` if the title or a lesson title is blank, or a
    /// lesson id is repeated inside the module.
    pub fn validate(self) -> Result<Module, ModuleError> {
        let title = self.title.trim().to_owned();
        if title.is_empty() {
            return Err(ModuleError::EmptyTitle);
        }

        let mut seen = HashSet::with_capacity(self.lessons.len());
        for lesson in &self.lessons {
            if lesson.title().trim().is_empty() {
                return Err(ModuleError::EmptyLessonTitle {
                    module: self.id,
                    lesson: lesson.id(),
                });
            }
            if !seen.insert(lesson.id()) {
                return Err(ModuleError::DuplicateLesson {
                    module: self.id,
                    lesson: lesson.id(),
                });
            }
        }

        Ok(Module {
            id: self.id,
            title,
            description: self.description,
            detailed_description: self.detailed_description,
            difficulty: self.difficulty,
            estimated_time: self.estimated_time,
            icon: self.icon,
            color: self.color,
            objectives: self.objectives,
            lessons: self.lessons,
            progress: self.progress,
        })
    }
}

//
// ─── MODULE ────────────────────────────────────────────────────────────────────
//

/// A thematic unit of content holding an ordered lesson sequence.
///
/// `progress` is whatever was last stored: the authored value for catalog
/// data, or a recomputed value once a progress store derives it.
/// `derived_progress` always computes it from lesson completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    id: ModuleId,
    title: String,
    description: String,
    detailed_description: String,
    difficulty: Difficulty,
    estimated_time: String,
    icon: String,
    color: String,
    objectives: Vec<String>,
    lessons: Vec<Lesson>,
    progress: Percent,
}

impl Module {
    #[must_use]
    pub fn id(&self) -> ModuleId {
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

    #[must_use]
    pub fn detailed_description(&self) -> &str {
        &self.detailed_description
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn estimated_time(&self) -> &str {
        &self.estimated_time
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    #[must_use]
    pub fn objectives(&self) -> &[String] {
        &self.objectives
    }

    /// Lessons in authored order.
    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn lesson(&self, id: LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| lesson.id() == id)
    }

    /// 1-based position of a lesson in the sequence.
    #[must_use]
    pub fn lesson_number(&self, id: LessonId) -> Option<usize> {
        self.lessons
            .iter()
            .position(|lesson| lesson.id() == id)
            .map(|idx| idx + 1)
    }

    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.lessons.iter().filter(|l| l.is_completed()).count()
    }

    #[must_use]
    pub fn progress(&self) -> Percent {
        self.progress
    }

    #[must_use]
    pub fn derived_progress(&self) -> Percent {
        Percent::ratio(self.completed_count(), self.lesson_count())
    }

    pub fn set_progress(&mut self, progress: Percent) {
        self.progress = progress;
    }

    /// Replaces stored progress with the derived value.
    pub fn recompute_progress(&mut self) {
        self.progress = self.derived_progress();
    }

    /// Marks a lesson completed.
    ///
    /// Returns `None` if no such lesson exists in this module, otherwise
    /// whether the flag changed.
    pub fn complete_lesson(&mut self, id: LessonId) -> Option<bool> {
        self.lessons
            .iter_mut()
            .find(|lesson| lesson.id() == id)
            .map(Lesson::mark_completed)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
