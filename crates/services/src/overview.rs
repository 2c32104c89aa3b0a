//! Presentation-agnostic read models built from progress state.
//!
//! These carry derived values (status, labels, targets) but no layout or
//! styling decisions. Views format and arrange them as they see fit.

use course_core::model::{Difficulty, LessonId, Module, ModuleId, Percent};
use course_core::navigation::{
    self, LessonStatus, ModuleAction, ModuleBadge, StatusCounts,
};
use course_core::routes::Route;

use crate::learning::LearningState;

/// Summary of one module, as shown in module listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleCard {
    pub id: ModuleId,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub estimated_time: String,
    pub lesson_count: usize,
    pub completed_count: usize,
    pub progress: Percent,
    pub badge: ModuleBadge,
    pub action: ModuleAction,
    pub target: Option<Route>,
}

impl ModuleCard {
    #[must_use]
    pub fn from_module(module: &Module) -> Self {
        Self {
            id: module.id(),
            title: module.title().to_owned(),
            description: module.description().to_owned(),
            difficulty: module.difficulty(),
            estimated_time: module.estimated_time().to_owned(),
            lesson_count: module.lesson_count(),
            completed_count: module.completed_count(),
            progress: module.progress(),
            badge: ModuleBadge::of(module.progress()),
            action: navigation::module_action(module.progress(), module.lessons()),
            target: navigation::action_target(module),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonRow {
    /// 1-based position in the module.
    pub number: usize,
    pub id: LessonId,
    pub title: String,
    pub duration: String,
    pub status: LessonStatus,
    pub focusable: bool,
    pub label: String,
    /// `None` for locked lessons.
    pub target: Option<Route>,
}

/// Module detail page model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleOverview {
    pub card: ModuleCard,
    pub detailed_description: String,
    pub objectives: Vec<String>,
    pub lessons: Vec<LessonRow>,
    pub counts: StatusCounts,
}

impl ModuleOverview {
    #[must_use]
    pub fn from_module(module: &Module) -> Self {
        let lessons = module
            .lessons()
            .iter()
            .enumerate()
            .map(|(idx, lesson)| LessonRow {
                number: idx + 1,
                id: lesson.id(),
                title: lesson.title().to_owned(),
                duration: lesson.duration().to_owned(),
                status: LessonStatus::of(lesson),
                focusable: navigation::is_focusable(lesson),
                label: navigation::lesson_label(idx + 1, lesson),
                target: navigation::activate(module.id(), lesson),
            })
            .collect();

        Self {
            card: ModuleCard::from_module(module),
            detailed_description: module.detailed_description().to_owned(),
            objectives: module.objectives().to_vec(),
            lessons,
            counts: StatusCounts::tally(module.lessons()),
        }
    }
}

/// Dashboard and progress page totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_progress: Percent,
    pub completed_lessons: usize,
    pub total_lessons: usize,
    pub time_spent_minutes: u32,
    pub modules_not_started: usize,
    pub modules_in_progress: usize,
    pub modules_completed: usize,
    /// Where "continue learning" goes: the current module if it has a next
    /// lesson, else the first module in progress that does.
    pub resume: Option<Route>,
}

impl DashboardSummary {
    #[must_use]
    pub fn from_state(state: &LearningState) -> Self {
        let mut summary = Self {
            total_progress: state.total_progress(),
            completed_lessons: state.completed_lessons().len(),
            total_lessons: state.modules().iter().map(Module::lesson_count).sum(),
            time_spent_minutes: state.time_spent(),
            modules_not_started: 0,
            modules_in_progress: 0,
            modules_completed: 0,
            resume: None,
        };

        for module in state.modules() {
            match ModuleBadge::of(module.progress()) {
                ModuleBadge::NotStarted => summary.modules_not_started += 1,
                ModuleBadge::InProgress => summary.modules_in_progress += 1,
                ModuleBadge::Completed => summary.modules_completed += 1,
            }
        }

        let current = state
            .current_module()
            .and_then(|id| state.module(id))
            .and_then(navigation::action_target);
        summary.resume = current.or_else(|| {
            state
                .modules()
                .iter()
                .filter(|module| ModuleBadge::of(module.progress()) == ModuleBadge::InProgress)
                .find_map(navigation::action_target)
        });
        summary
    }
}

#[must_use]
pub fn module_cards(state: &LearningState) -> Vec<ModuleCard> {
    state.modules().iter().map(ModuleCard::from_module).collect()
}
