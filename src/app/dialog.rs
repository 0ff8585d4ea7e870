use ratatui::style::Color;

use crate::data::CreateOutcome;
use crate::ui::theme::{COLOR_ACCENT, COLOR_HOT};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogLevel {
    Info,
    Error,
}

impl DialogLevel {
    pub fn title(self) -> &'static str {
        match self {
            DialogLevel::Info => "Info",
            DialogLevel::Error => "Error",
        }
    }

    pub fn color(self) -> Color {
        match self {
            DialogLevel::Info => COLOR_ACCENT,
            DialogLevel::Error => COLOR_HOT,
        }
    }
}

/// Modal message box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dialog {
    pub level: DialogLevel,
    pub message: String,
}

impl Dialog {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: DialogLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: DialogLevel::Error,
            message: message.into(),
        }
    }
}

impl From<&CreateOutcome> for Dialog {
    fn from(outcome: &CreateOutcome) -> Self {
        if outcome.is_error() {
            Dialog::error(outcome.message())
        } else {
            Dialog::info(outcome.message())
        }
    }
}
