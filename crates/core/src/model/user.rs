use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::ids::UserId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// Font size preference stored on the user profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileFontSize {
    #[default]
    Normal,
    Large,
    XLarge,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct AccessibilitySettings {
    pub font_size: ProfileFontSize,
    pub high_contrast: bool,
    pub screen_reader: bool,
    pub reduced_motion: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub skill_level: SkillLevel,
    pub accessibility: Option<AccessibilitySettings>,
}

impl User {
    pub const DEMO_NAME: &'static str = "Demo User";

    /// The profile handed out by the stub login for any submitted email.
    #[must_use]
    pub fn demo(email: impl Into<String>) -> Self {
        Self {
            id: UserId::new(1),
            email: email.into().trim().to_owned(),
            full_name: Self::DEMO_NAME.to_owned(),
            skill_level: SkillLevel::Beginner,
            accessibility: Some(AccessibilitySettings::default()),
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.full_name
    }

    /// Overwrites the fields present in the patch.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(full_name) = patch.full_name {
            self.full_name = full_name;
        }
        if let Some(skill_level) = patch.skill_level {
            self.skill_level = skill_level;
        }
        if let Some(accessibility) = patch.accessibility {
            self.accessibility = Some(accessibility);
        }
    }
}

/// Partial profile update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub skill_level: Option<SkillLevel>,
    pub accessibility: Option<AccessibilitySettings>,
}

/// Opaque session token. Never printed in full.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub const DEMO: &'static str = "demo-token";

    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn demo() -> Self {
        Self::new(Self::DEMO)
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}
