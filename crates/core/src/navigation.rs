//! Derives the next lesson, the module call-to-action and per-lesson status.
//!
//! Everything here is a pure function of lesson flags and module progress.

use crate::model::{Lesson, LessonId, LessonRef, Module, ModuleId, Percent};
use crate::routes::Route;

/// First lesson in authored order that is neither completed nor locked.
#[must_use]
pub fn next_actionable(lessons: &[Lesson]) -> Option<&Lesson> {
    lessons.iter().find(|lesson| lesson.is_actionable())
}

//
// ─── MODULE ACTION ─────────────────────────────────────────────────────────────
//

/// What the module page offers as its primary control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleAction {
    Start { lesson: LessonId },
    Continue { lesson: LessonId },
    /// Progress is 100: show an acknowledgment instead of a control.
    Completed,
    /// Every remaining lesson is locked or completed: no control.
    Unavailable,
}

impl ModuleAction {
    #[must_use]
    pub fn label(self) -> Option<&'static str> {
        match self {
            ModuleAction::Start { .. } => Some("Start Learning"),
            ModuleAction::Continue { .. } => Some("Continue Learning"),
            ModuleAction::Completed | ModuleAction::Unavailable => None,
        }
    }

    #[must_use]
    pub fn lesson(self) -> Option<LessonId> {
        match self {
            ModuleAction::Start { lesson } | ModuleAction::Continue { lesson } => Some(lesson),
            ModuleAction::Completed | ModuleAction::Unavailable => None,
        }
    }

    #[must_use]
    pub fn shows_control(self) -> bool {
        self.label().is_some()
    }
}

#[must_use]
pub fn module_action(progress: Percent, lessons: &[Lesson]) -> ModuleAction {
    if progress.is_full() {
        return ModuleAction::Completed;
    }
    let Some(next) = next_actionable(lessons) else {
        return ModuleAction::Unavailable;
    };
    if progress.is_zero() {
        ModuleAction::Start { lesson: next.id() }
    } else {
        ModuleAction::Continue { lesson: next.id() }
    }
}

/// Where the primary control navigates to, if anywhere.
#[must_use]
pub fn action_target(module: &Module) -> Option<Route> {
    module_action(module.progress(), module.lessons())
        .lesson()
        .map(|lesson| Route::Lesson(LessonRef::new(module.id(), lesson)))
}

//
// ─── LESSON STATUS ─────────────────────────────────────────────────────────────
//

/// Row status, evaluated per lesson and independent of its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LessonStatus {
    Completed,
    Locked,
    Start,
}

impl LessonStatus {
    #[must_use]
    pub fn of(lesson: &Lesson) -> Self {
        if lesson.is_completed() {
            LessonStatus::Completed
        } else if lesson.is_locked() {
            LessonStatus::Locked
        } else {
            LessonStatus::Start
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            LessonStatus::Completed => "Completed",
            LessonStatus::Locked => "Locked",
            LessonStatus::Start => "Start",
        }
    }
}

/// Locked lessons are out of the tab order and reported as disabled.
#[must_use]
pub fn is_focusable(lesson: &Lesson) -> bool {
    !lesson.is_locked()
}

/// Navigation target for activating a lesson row. Locked rows do nothing.
#[must_use]
pub fn activate(module: ModuleId, lesson: &Lesson) -> Option<Route> {
    if lesson.is_locked() {
        return None;
    }
    Some(Route::Lesson(LessonRef::new(module, lesson.id())))
}

/// Screen reader label for a lesson row.
#[must_use]
pub fn lesson_label(number: usize, lesson: &Lesson) -> String {
    format!(
        "Lesson {number}: {}, {}, {}",
        lesson.title(),
        lesson.duration(),
        LessonStatus::of(lesson).label()
    )
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub completed: usize,
    pub start: usize,
    pub locked: usize,
}

impl StatusCounts {
    #[must_use]
    pub fn tally(lessons: &[Lesson]) -> Self {
        lessons
            .iter()
            .fold(Self::default(), |mut counts, lesson| {
                match LessonStatus::of(lesson) {
                    LessonStatus::Completed => counts.completed += 1,
                    LessonStatus::Locked => counts.locked += 1,
                    LessonStatus::Start => counts.start += 1,
                }
                counts
            })
    }
}

//
// ─── MODULE BADGE ──────────────────────────────────────────────────────────────
//

/// Status badge shown on module cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleBadge {
    NotStarted,
    InProgress,
    Completed,
}

impl ModuleBadge {
    #[must_use]
    pub fn of(progress: Percent) -> Self {
        if progress.is_zero() {
            ModuleBadge::NotStarted
        } else if progress.is_full() {
            ModuleBadge::Completed
        } else {
            ModuleBadge::InProgress
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ModuleBadge::NotStarted => "Not Started",
            ModuleBadge::InProgress => "In Progress",
            ModuleBadge::Completed => "Completed",
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
