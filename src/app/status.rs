use std::time::{Duration, Instant};

use ratatui::style::Style;

use crate::ui::theme::{COLOR_ACCENT, COLOR_GOOD, COLOR_WARN};

const STATUS_TTL: Duration = Duration::from_secs(3);

pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
    expires_at: Option<Instant>,
}

impl StatusMessage {
    pub fn new(level: StatusLevel, text: String) -> Self {
        Self {
            level,
            text,
            expires_at: Some(Instant::now() + STATUS_TTL),
        }
    }

    /// A message that stays until replaced, used while work is in flight.
    pub fn sticky(level: StatusLevel, text: String) -> Self {
        Self {
            level,
            text,
            expires_at: None,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|expires_at| Instant::now() >= expires_at)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Busy,
    Warn,
}

impl StatusLevel {
    pub fn style(self) -> Style {
        match self {
            StatusLevel::Info => Style::default().fg(COLOR_GOOD),
            StatusLevel::Busy => Style::default().fg(COLOR_ACCENT),
            StatusLevel::Warn => Style::default().fg(COLOR_WARN),
        }
    }
}
