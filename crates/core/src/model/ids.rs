use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a learning Module
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleId(u64);

impl ModuleId {
    /// Creates a new `ModuleId`
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Identifier for a Lesson, unique only within its module
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LessonId(u64);

impl LessonId {
    /// Creates a new `LessonId`
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Unique identifier for a User
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(u64);

impl UserId {
    /// Creates a new `UserId`
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Unique identifier for a chat message.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Generates a fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Fully qualified lesson address.
///
/// Lesson ids restart at 1 in every module, so anything that tracks
/// progress across the catalog keys on the `(module, lesson)` pair.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LessonRef {
    pub module: ModuleId,
    pub lesson: LessonId,
}

impl LessonRef {
    #[must_use]
    pub fn new(module: ModuleId, lesson: LessonId) -> Self {
        Self { module, lesson }
    }
}

impl fmt::Debug for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleId({})", self.0)
    }
}

impl fmt::Debug for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LessonId({})", self.0)
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Debug for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageId({})", self.0)
    }
}

impl fmt::Debug for LessonRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LessonRef({}/{})", self.module.0, self.lesson.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LessonRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.module, self.lesson)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl ParseIdError {
    fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_owned(),
        }
    }
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for ModuleId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(ModuleId::new)
            .map_err(|_| ParseIdError::new("ModuleId"))
    }
}

impl FromStr for LessonId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(LessonId::new)
            .map_err(|_| ParseIdError::new("LessonId"))
    }
}

impl FromStr for UserId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(UserId::new)
            .map_err(|_| ParseIdError::new("UserId"))
    }
}

impl FromStr for LessonRef {
    type Err = ParseIdError;

    /// Parses the `module/lesson` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (module, lesson) = s
            .split_once('/')
            .ok_or_else(|| ParseIdError::new("LessonRef"))?;
        let module = module
            .parse::<ModuleId>()
            .map_err(|_| ParseIdError::new("LessonRef"))?;
        let lesson = lesson
            .parse::<LessonId>()
            .map_err(|_| ParseIdError::new("LessonRef"))?;
        Ok(Self::new(module, lesson))
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_id_display() {
        let id = ModuleId::new(42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn module_id_from_str() {
        let id: ModuleId = "6".parse().unwrap();
        assert_eq!(id, ModuleId::new(6));
    }

    #[test]
    fn lesson_id_from_str_invalid() {
        let result = "not-a-number".parse::<LessonId>();
        assert!(result.is_err());
    }

    #[test]
    fn user_id_from_str() {
        let id: UserId = "1".parse().unwrap();
        assert_eq!(id.value(), 1);
    }

    #[test]
    fn lesson_ref_parses_display_form() {
        let lesson = LessonRef::new(ModuleId::new(1), LessonId::new(5));
        assert_eq!(lesson.to_string(), "1/5");
        assert_eq!("1/5".parse::<LessonRef>().unwrap(), lesson);
    }

    #[test]
    fn lesson_ref_rejects_missing_separator() {
        assert!("15".parse::<LessonRef>().is_err());
        assert!("1/x".parse::<LessonRef>().is_err());
    }

    #[test]
    fn lesson_refs_in_different_modules_differ() {
        let a = LessonRef::new(ModuleId::new(1), LessonId::new(1));
        let b = LessonRef::new(ModuleId::new(2), LessonId::new(1));
        assert_ne!(a, b);
        assert!(a < b);
    }

    #[test]
    fn message_ids_are_unique() {
        assert_ne!(MessageId::generate(), MessageId::generate());
    }
}
