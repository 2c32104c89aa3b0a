//! Read-only registry of learning modules.

use std::collections::HashSet;

use thiserror::Error;

use crate::model::{Lesson, LessonRef, Module, ModuleError, ModuleId};

mod builtin;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("module {0} not found")]
    ModuleNotFound(ModuleId),

    #[error("lesson {0} not found")]
    LessonNotFound(LessonRef),

    #[error("module id {0} appears more than once")]
    DuplicateModule(ModuleId),

    #[error(transparent)]
    Module(#[from] ModuleError),
}

/// Immutable module list, shared by every consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    modules: Vec<Module>,
}

impl Catalog {
    /// Builds a catalog from modules in display order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateModule` if two modules share an id.
    pub fn new(modules: Vec<Module>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(modules.len());
        for module in &modules {
            if !seen.insert(module.id()) {
                return Err(CatalogError::DuplicateModule(module.id()));
            }
        }
        Ok(Self { modules })
    }

    /// The six modules shipped with the app.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the authored content fails validation.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(builtin::modules()?)
    }

    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Lookup that misses with `None`, for callers that render a fallback.
    #[must_use]
    pub fn module_by_id(&self, id: ModuleId) -> Option<&Module> {
        self.modules.iter().find(|module| module.id() == id)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::ModuleNotFound` if no module has this id.
    pub fn require_module(&self, id: ModuleId) -> Result<&Module, CatalogError> {
        self.module_by_id(id)
            .ok_or(CatalogError::ModuleNotFound(id))
    }

    /// # Errors
    ///
    /// Returns `CatalogError::LessonNotFound` if the module or lesson is missing.
    pub fn require_lesson(&self, lesson: LessonRef) -> Result<&Lesson, CatalogError> {
        self.module_by_id(lesson.module)
            .and_then(|module| module.lesson(lesson.lesson))
            .ok_or(CatalogError::LessonNotFound(lesson))
    }
}
