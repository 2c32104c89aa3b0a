//! Presentation preferences and transient UI state.

use course_core::model::{AccessibilitySettings, ProfileFontSize};

use crate::store::Reducer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Normal,
    HighContrast,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Normal => "normal",
            Theme::HighContrast => "high-contrast",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontSize {
    #[default]
    Normal,
    Large,
    ExtraLarge,
}

impl FontSize {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FontSize::Normal => "normal",
            FontSize::Large => "large",
            FontSize::ExtraLarge => "extra-large",
        }
    }
}

impl From<ProfileFontSize> for FontSize {
    fn from(size: ProfileFontSize) -> Self {
        match size {
            ProfileFontSize::Normal => FontSize::Normal,
            ProfileFontSize::Large => FontSize::Large,
            ProfileFontSize::XLarge => FontSize::ExtraLarge,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub visible: bool,
}

#[derive(Debug)]
pub enum UiCommand {
    SetTheme(Theme),
    SetFontSize(FontSize),
    ToggleSidebar,
    SetSidebarOpen(bool),
    OpenModal(String),
    CloseModal,
    ShowNotification { message: String, kind: NotificationKind },
    /// Keeps the last notification around, only hidden.
    HideNotification,
    SetReducedMotion(bool),
    /// Copies a profile's accessibility preferences into the UI.
    ApplyAccessibility(AccessibilitySettings),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    theme: Theme,
    font_size: FontSize,
    sidebar_open: bool,
    modal: Option<String>,
    notification: Option<Notification>,
    reduced_motion: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            theme: Theme::Normal,
            font_size: FontSize::Normal,
            sidebar_open: true,
            modal: None,
            notification: None,
            reduced_motion: false,
        }
    }
}

impl UiState {
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub fn font_size(&self) -> FontSize {
        self.font_size
    }

    #[must_use]
    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    #[must_use]
    pub fn modal_open(&self) -> bool {
        self.modal.is_some()
    }

    #[must_use]
    pub fn modal_content(&self) -> Option<&str> {
        self.modal.as_deref()
    }

    #[must_use]
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    #[must_use]
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}

impl Reducer for UiState {
    type Command = UiCommand;
    const NAME: &'static str = "ui";

    fn reduce(&mut self, command: UiCommand) {
        match command {
            UiCommand::SetTheme(theme) => self.theme = theme,
            UiCommand::SetFontSize(size) => self.font_size = size,
            UiCommand::ToggleSidebar => self.sidebar_open = !self.sidebar_open,
            UiCommand::SetSidebarOpen(open) => self.sidebar_open = open,
            UiCommand::OpenModal(content) => self.modal = Some(content),
            UiCommand::CloseModal => self.modal = None,
            UiCommand::ShowNotification { message, kind } => {
                self.notification = Some(Notification {
                    message,
                    kind,
                    visible: true,
                });
            }
            UiCommand::HideNotification => {
                if let Some(notification) = self.notification.as_mut() {
                    notification.visible = false;
                }
            }
            UiCommand::SetReducedMotion(reduced) => self.reduced_motion = reduced,
            UiCommand::ApplyAccessibility(settings) => {
                self.font_size = settings.font_size.into();
                self.theme = if settings.high_contrast {
                    Theme::HighContrast
                } else {
                    Theme::Normal
                };
                self.reduced_motion = settings.reduced_motion;
            }
        }
    }
}
