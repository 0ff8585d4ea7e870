use crossterm::event::KeyEvent;

use crate::data::ListSnapshot;

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// Terminal key press
    Key(KeyEvent),
    /// Periodic tick
    Tick,
    /// Terminal resize
    Resize(u16, u16),
    /// Fresh container list from the poller
    ListUpdate(ListSnapshot),
    /// Request to quit
    Quit,
}

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running
    Continue,
    /// Exit the application
    Exit,
}

impl EventResult {
    pub fn should_exit(self) -> bool {
        matches!(self, EventResult::Exit)
    }
}
