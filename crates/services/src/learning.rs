//! Progress store: lesson completion, partial progress and time spent.

use std::collections::BTreeMap;

use course_core::model::{LessonRef, Module, ModuleId, Percent};
use course_core::{Catalog, ProgressPolicy};

use crate::store::Reducer;

#[derive(Debug)]
pub enum LearningCommand {
    SetModules(Vec<Module>),
    SetCurrentModule(Option<ModuleId>),
    SetCurrentLesson(Option<LessonRef>),
    /// Partial progress. Values outside `0..=100` are clipped.
    UpdateLessonProgress { lesson: LessonRef, percent: i32 },
    CompleteLesson(LessonRef),
    AddTimeSpent(u32),
    /// Derive module and overall progress from completion counts now.
    RecomputeProgress,
    SetLoading(bool),
    SetError(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearningState {
    modules: Vec<Module>,
    current_module: Option<ModuleId>,
    current_lesson: Option<LessonRef>,
    lesson_progress: BTreeMap<LessonRef, Percent>,
    completed_lessons: Vec<LessonRef>,
    total_progress: Percent,
    time_spent: u32,
    is_loading: bool,
    error: Option<String>,
    policy: ProgressPolicy,
}

impl LearningState {
    #[must_use]
    pub fn new(policy: ProgressPolicy) -> Self {
        Self {
            modules: Vec::new(),
            current_module: None,
            current_lesson: None,
            lesson_progress: BTreeMap::new(),
            completed_lessons: Vec::new(),
            total_progress: Percent::ZERO,
            time_spent: 0,
            is_loading: false,
            error: None,
            policy,
        }
    }

    /// Seeds the store from catalog content, carrying over lessons the
    /// catalog already marks completed.
    #[must_use]
    pub fn from_catalog(catalog: &Catalog, policy: ProgressPolicy) -> Self {
        let mut state = Self::new(policy);
        state.replace_modules(catalog.modules().to_vec());
        state
    }

    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    #[must_use]
    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        self.modules.iter().find(|module| module.id() == id)
    }

    #[must_use]
    pub fn current_module(&self) -> Option<ModuleId> {
        self.current_module
    }

    #[must_use]
    pub fn current_lesson(&self) -> Option<LessonRef> {
        self.current_lesson
    }

    /// Completed lessons in completion order, without duplicates.
    #[must_use]
    pub fn completed_lessons(&self) -> &[LessonRef] {
        &self.completed_lessons
    }

    #[must_use]
    pub fn is_completed(&self, lesson: LessonRef) -> bool {
        self.completed_lessons.contains(&lesson)
    }

    /// Per-lesson progress; untouched lessons read as 0.
    #[must_use]
    pub fn lesson_progress(&self, lesson: LessonRef) -> Percent {
        self.lesson_progress
            .get(&lesson)
            .copied()
            .unwrap_or(Percent::ZERO)
    }

    #[must_use]
    pub fn total_progress(&self) -> Percent {
        self.total_progress
    }

    /// Minutes spent learning.
    #[must_use]
    pub fn time_spent(&self) -> u32 {
        self.time_spent
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Swaps in new content. Per-lesson progress and the completed set are
    /// rebuilt from the lessons' own completion flags.
    fn replace_modules(&mut self, modules: Vec<Module>) {
        self.lesson_progress.clear();
        self.completed_lessons.clear();
        for module in &modules {
            for lesson in module.lessons().iter().filter(|l| l.is_completed()) {
                let key = LessonRef::new(module.id(), lesson.id());
                self.completed_lessons.push(key);
                self.lesson_progress.insert(key, Percent::FULL);
            }
        }
        self.modules = modules;
        self.refresh_aggregates();
    }

    fn lesson_exists(&self, lesson: LessonRef) -> bool {
        self.module(lesson.module)
            .is_some_and(|module| module.lesson(lesson.lesson).is_some())
    }

    fn complete_lesson(&mut self, lesson: LessonRef) {
        let Some(module) = self.modules.iter_mut().find(|m| m.id() == lesson.module) else {
            tracing::warn!(%lesson, "complete_lesson: unknown module");
            return;
        };
        if module.complete_lesson(lesson.lesson).is_none() {
            tracing::warn!(%lesson, "complete_lesson: unknown lesson");
            return;
        }

        self.lesson_progress.insert(lesson, Percent::FULL);
        if !self.completed_lessons.contains(&lesson) {
            self.completed_lessons.push(lesson);
        }
        if self.policy == ProgressPolicy::Derived {
            self.refresh_aggregates();
        }
    }

    fn update_lesson_progress(&mut self, lesson: LessonRef, percent: i32) {
        if !self.lesson_exists(lesson) {
            tracing::warn!(%lesson, "update_lesson_progress: unknown lesson");
            return;
        }
        let clipped = Percent::clamped(i64::from(percent));
        if i64::from(clipped.value()) != i64::from(percent) {
            tracing::warn!(%lesson, requested = percent, applied = clipped.value(), "lesson progress clipped");
        }
        self.lesson_progress.insert(lesson, clipped);
    }

    fn refresh_aggregates(&mut self) {
        if self.policy == ProgressPolicy::Snapshot {
            return;
        }
        self.recompute_all();
    }

    fn recompute_all(&mut self) {
        let mut completed = 0;
        let mut total = 0;
        for module in &mut self.modules {
            module.recompute_progress();
            completed += module.completed_count();
            total += module.lesson_count();
        }
        self.total_progress = Percent::ratio(completed, total);
    }
}

impl Default for LearningState {
    fn default() -> Self {
        Self::new(ProgressPolicy::default())
    }
}

impl Reducer for LearningState {
    type Command = LearningCommand;
    const NAME: &'static str = "learning";

    fn reduce(&mut self, command: LearningCommand) {
        match command {
            LearningCommand::SetModules(modules) => self.replace_modules(modules),
            LearningCommand::SetCurrentModule(module) => self.current_module = module,
            LearningCommand::SetCurrentLesson(lesson) => self.current_lesson = lesson,
            LearningCommand::UpdateLessonProgress { lesson, percent } => {
                self.update_lesson_progress(lesson, percent);
            }
            LearningCommand::CompleteLesson(lesson) => self.complete_lesson(lesson),
            LearningCommand::AddTimeSpent(minutes) => {
                self.time_spent = self.time_spent.saturating_add(minutes);
            }
            LearningCommand::RecomputeProgress => self.recompute_all(),
            LearningCommand::SetLoading(loading) => self.is_loading = loading,
            LearningCommand::SetError(error) => self.error = error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overview::DashboardSummary;
    use course_core::model::LessonId;

    fn lesson(module: u64, lesson: u64) -> LessonRef {
        LessonRef::new(ModuleId::new(module), LessonId::new(lesson))
    }

    fn seeded(policy: ProgressPolicy) -> LearningState {
        LearningState::from_catalog(&Catalog::builtin().unwrap(), policy)
    }

    #[test]
    fn seeding_records_authored_completions() {
        let state = seeded(ProgressPolicy::Derived);
        // 4 + 1 + 0 + 6 + 1 + 0 completed lessons in the shipped catalog
        assert_eq!(state.completed_lessons().len(), 12);
        assert!(state.is_completed(lesson(4, 6)));
        assert_eq!(state.lesson_progress(lesson(1, 1)), Percent::FULL);
    }

    #[test]
    fn derived_policy_replaces_authored_progress() {
        let state = seeded(ProgressPolicy::Derived);
        let email = state.module(ModuleId::new(1)).unwrap();
        assert_eq!(email.progress().value(), 50);
        // 12 of 48 lessons
        assert_eq!(state.total_progress().value(), 25);
    }

    #[test]
    fn snapshot_policy_keeps_authored_progress() {
        let mut state = seeded(ProgressPolicy::Snapshot);
        state.reduce(LearningCommand::CompleteLesson(lesson(1, 5)));
        let email = state.module(ModuleId::new(1)).unwrap();
        assert_eq!(email.progress().value(), 45);
        assert_eq!(email.derived_progress().value(), 63);
        assert_eq!(state.total_progress(), Percent::ZERO);

        state.reduce(LearningCommand::RecomputeProgress);
        assert_eq!(state.module(ModuleId::new(1)).unwrap().progress().value(), 63);
        assert_eq!(state.total_progress().value(), 27);
    }

    #[test]
    fn complete_lesson_is_idempotent() {
        let mut once = seeded(ProgressPolicy::Derived);
        once.reduce(LearningCommand::CompleteLesson(lesson(1, 5)));

        let mut twice = once.clone();
        twice.reduce(LearningCommand::CompleteLesson(lesson(1, 5)));

        assert_eq!(once, twice);
        assert_eq!(
            twice.completed_lessons().iter().filter(|l| **l == lesson(1, 5)).count(),
            1
        );
        assert_eq!(twice.lesson_progress(lesson(1, 5)), Percent::FULL);
    }

    #[test]
    fn complete_lesson_only_touches_its_module() {
        let mut state = seeded(ProgressPolicy::Derived);
        state.reduce(LearningCommand::CompleteLesson(lesson(3, 1)));

        let banking = state.module(ModuleId::new(3)).unwrap();
        assert!(banking.lesson(LessonId::new(1)).unwrap().is_completed());
        let health = state.module(ModuleId::new(6)).unwrap();
        assert!(!health.lesson(LessonId::new(1)).unwrap().is_completed());
    }

    #[test]
    fn completing_unknown_lesson_changes_nothing() {
        let mut state = seeded(ProgressPolicy::Derived);
        let before = state.clone();
        state.reduce(LearningCommand::CompleteLesson(lesson(1, 99)));
        state.reduce(LearningCommand::CompleteLesson(lesson(99, 1)));
        assert_eq!(state, before);
    }

    #[test]
    fn completing_locked_lesson_leaves_lock_in_place() {
        let mut state = seeded(ProgressPolicy::Derived);
        state.reduce(LearningCommand::CompleteLesson(lesson(1, 6)));
        let email = state.module(ModuleId::new(1)).unwrap();
        assert!(email.lesson(LessonId::new(7)).unwrap().is_locked());
    }

    #[test]
    fn lesson_progress_is_clamped_and_not_completion() {
        let mut state = seeded(ProgressPolicy::Derived);
        state.reduce(LearningCommand::UpdateLessonProgress {
            lesson: lesson(1, 5),
            percent: 140,
        });
        assert_eq!(state.lesson_progress(lesson(1, 5)), Percent::FULL);
        assert!(!state.is_completed(lesson(1, 5)));

        state.reduce(LearningCommand::UpdateLessonProgress {
            lesson: lesson(1, 6),
            percent: -5,
        });
        assert_eq!(state.lesson_progress(lesson(1, 6)), Percent::ZERO);

        state.reduce(LearningCommand::UpdateLessonProgress {
            lesson: lesson(1, 6),
            percent: 30,
        });
        assert_eq!(state.lesson_progress(lesson(1, 6)).value(), 30);
    }

    #[test]
    fn time_spent_accumulates_and_saturates() {
        let mut state = LearningState::default();
        state.reduce(LearningCommand::AddTimeSpent(15));
        state.reduce(LearningCommand::AddTimeSpent(20));
        assert_eq!(state.time_spent(), 35);

        state.reduce(LearningCommand::AddTimeSpent(u32::MAX));
        assert_eq!(state.time_spent(), u32::MAX);
    }

    #[test]
    fn navigation_fields_are_plain_replacement() {
        let mut state = LearningState::default();
        state.reduce(LearningCommand::SetCurrentModule(Some(ModuleId::new(2))));
        state.reduce(LearningCommand::SetCurrentLesson(Some(lesson(2, 3))));
        assert_eq!(state.current_module(), Some(ModuleId::new(2)));
        assert_eq!(state.current_lesson(), Some(lesson(2, 3)));

        state.reduce(LearningCommand::SetCurrentLesson(None));
        assert_eq!(state.current_lesson(), None);
    }

    #[test]
    fn set_modules_replaces_content() {
        let catalog = Catalog::builtin().unwrap();
        let mut state = LearningState::new(ProgressPolicy::Derived);
        assert!(state.modules().is_empty());

        state.reduce(LearningCommand::SetModules(catalog.modules()[..1].to_vec()));
        assert_eq!(state.modules().len(), 1);
        assert_eq!(state.total_progress().value(), 50);
    }

    #[test]
    fn set_modules_rebuilds_completion_from_lessons() {
        let catalog = Catalog::builtin().unwrap();
        let mut state = LearningState::new(ProgressPolicy::Derived);
        state.reduce(LearningCommand::SetModules(catalog.modules()[..1].to_vec()));

        let email = &catalog.modules()[0];
        for item in email.lessons() {
            let key = LessonRef::new(email.id(), item.id());
            assert_eq!(state.is_completed(key), item.is_completed(), "{key}");
            if item.is_completed() {
                assert_eq!(state.lesson_progress(key), Percent::FULL);
            } else {
                assert_eq!(state.lesson_progress(key), Percent::ZERO);
            }
        }
        assert_eq!(state.completed_lessons().len(), 4);
        assert!(!state.is_completed(lesson(2, 1)));

        let summary = DashboardSummary::from_state(&state);
        assert_eq!(summary.completed_lessons, 4);
        assert_eq!(summary.total_lessons, 8);
        assert_eq!(summary.total_progress, Percent::ratio(4, 8));
    }

    #[test]
    fn set_modules_drops_progress_for_removed_lessons() {
        let mut state = seeded(ProgressPolicy::Derived);
        state.reduce(LearningCommand::UpdateLessonProgress {
            lesson: lesson(1, 5),
            percent: 40,
        });
        state.reduce(LearningCommand::SetModules(Vec::new()));

        assert!(state.completed_lessons().is_empty());
        assert_eq!(state.lesson_progress(lesson(1, 1)), Percent::ZERO);
        assert_eq!(state.lesson_progress(lesson(1, 5)), Percent::ZERO);

        let summary = DashboardSummary::from_state(&state);
        assert_eq!(summary.completed_lessons, 0);
        assert_eq!(summary.total_lessons, 0);
        assert_eq!(summary.total_progress, Percent::ZERO);
    }

    #[test]
    fn loading_and_error_flags() {
        let mut state = LearningState::default();
        state.reduce(LearningCommand::SetLoading(true));
        state.reduce(LearningCommand::SetError(Some("offline".into())));
        assert!(state.is_loading());
        assert_eq!(state.error(), Some("offline"));
    }
}
